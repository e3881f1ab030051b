use crate::core::store::MarketStore;
use crate::domain::model::{
    ContractStatus, ContractUpdate, CropStatus, CropUpdate, Milestone, MilestoneStatus,
    NewContract, NewCrop, NewUser, NewVerificationTask, TaskPriority, UserRole,
};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Ids of the seeded records, for callers that want to walk the sample flow.
pub struct SeedIds {
    pub tomato_crop: String,
    pub rice_crop: String,
    pub paddy_crop: String,
    pub tomato_contract: String,
    pub paddy_task: String,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

/// Seeds the demo data set: two farmers with one crop each, a distributor
/// holding an active three-milestone contract on the tomato crop, and an
/// agent with a pending verification task on the rice crop. Everything goes
/// through the public add/update operations so seeding takes the same
/// validation path as any other caller.
pub fn seed_sample_data(store: &mut MarketStore) -> Result<SeedIds> {
    let ravi = store.add_user(NewUser {
        name: "Ravi Kumar".to_string(),
        phone: "+91 98480 12345".to_string(),
        role: UserRole::Farmer,
        location: "Guntur, AP".to_string(),
        wallet_balance: 12500.0,
        bio: Some("Third-generation tomato farmer".to_string()),
    })?;
    let lakshmi = store.add_user(NewUser {
        name: "Lakshmi Devi".to_string(),
        phone: "+91 98480 23456".to_string(),
        role: UserRole::Farmer,
        location: "Krishna, AP".to_string(),
        wallet_balance: 8200.0,
        bio: None,
    })?;
    let distributor = store.add_user(NewUser {
        name: "Anand Traders".to_string(),
        phone: "+91 98480 34567".to_string(),
        role: UserRole::Distributor,
        location: "Hyderabad, TS".to_string(),
        wallet_balance: 450000.0,
        bio: Some("Wholesale produce distribution across Telangana".to_string()),
    })?;
    let agent = store.add_user(NewUser {
        name: "Suresh Reddy".to_string(),
        phone: "+91 98480 45678".to_string(),
        role: UserRole::Agent,
        location: "Vijayawada, AP".to_string(),
        wallet_balance: 0.0,
        bio: None,
    })?;

    let tomato = store.add_crop(NewCrop {
        farmer_id: ravi.id.clone(),
        crop_name: "Tomato".to_string(),
        location: "Guntur, AP".to_string(),
        area: 2.5,
        seed_date: date(2024, 3, 15),
        expected_harvest: date(2024, 6, 15),
        price: 45000.0,
        images: vec!["https://images.unsplash.com/photo-1618160702438-9b02ab6515c9?w=400".to_string()],
        agent_notes: vec![
            "Crop looking healthy".to_string(),
            "Good soil moisture".to_string(),
        ],
    })?;
    let rice = store.add_crop(NewCrop {
        farmer_id: lakshmi.id.clone(),
        crop_name: "Rice".to_string(),
        location: "Krishna, AP".to_string(),
        area: 5.0,
        seed_date: date(2024, 2, 20),
        expected_harvest: date(2024, 7, 20),
        price: 125000.0,
        images: vec!["https://images.unsplash.com/photo-1618160702438-9b02ab6515c9?w=400".to_string()],
        agent_notes: vec![
            "Excellent variety".to_string(),
            "Ready for investment".to_string(),
        ],
    })?;

    // Sample statuses past `pending` are written through the regular update
    // path (pending -> verified -> growing stays on the strict graph).
    store.update_crop(
        &rice.id,
        CropUpdate {
            status: Some(CropStatus::Verified),
            ..Default::default()
        },
    )?;
    store.update_crop(
        &tomato.id,
        CropUpdate {
            status: Some(CropStatus::Verified),
            ..Default::default()
        },
    )?;
    store.update_crop(
        &tomato.id,
        CropUpdate {
            status: Some(CropStatus::Growing),
            ..Default::default()
        },
    )?;

    let contract = store.add_contract(NewContract {
        crop_id: tomato.id.clone(),
        farmer_id: ravi.id.clone(),
        distributor_id: distributor.id.clone(),
        agent_id: None,
        price: 45000.0,
        status: ContractStatus::Draft,
        terms: "Standard purchase agreement with quality guarantee".to_string(),
        milestones: vec![
            Milestone {
                id: "1".to_string(),
                title: "Advance Payment".to_string(),
                amount: 15000.0,
                status: MilestoneStatus::Completed,
                date: Some(date(2024, 3, 20)),
            },
            Milestone {
                id: "2".to_string(),
                title: "Mid-stage Payment".to_string(),
                amount: 15000.0,
                status: MilestoneStatus::Pending,
                date: None,
            },
            Milestone {
                id: "3".to_string(),
                title: "Final Payment".to_string(),
                amount: 15000.0,
                status: MilestoneStatus::Pending,
                date: None,
            },
        ],
    })?;
    store.update_contract(
        &contract.id,
        ContractUpdate {
            status: Some(ContractStatus::Active),
            ..Default::default()
        },
    )?;
    store.update_crop(
        &tomato.id,
        CropUpdate {
            contract_id: Some(contract.id.clone()),
            ..Default::default()
        },
    )?;

    // Fresh listing from Lakshmi that still needs an agent visit.
    let paddy = store.add_crop(NewCrop {
        farmer_id: lakshmi.id.clone(),
        crop_name: "Paddy (BPT 5204)".to_string(),
        location: "Krishna, AP".to_string(),
        area: 3.0,
        seed_date: date(2024, 4, 1),
        expected_harvest: date(2024, 8, 15),
        price: 78000.0,
        images: vec![],
        agent_notes: vec![],
    })?;
    let task = store.add_verification_task(NewVerificationTask {
        crop_id: paddy.id.clone(),
        agent_id: agent.id.clone(),
        farmer_id: lakshmi.id.clone(),
        priority: TaskPriority::High,
        notes: "Initial verification required".to_string(),
        photos: vec![],
        location: "Krishna, AP".to_string(),
        scheduled_date: date(2024, 5, 29),
    })?;

    tracing::info!(
        "seeded {} users, {} crops, {} contracts, {} tasks",
        store.users().len(),
        store.crops().len(),
        store.contracts().len(),
        store.verification_tasks().len()
    );

    Ok(SeedIds {
        tomato_crop: tomato.id,
        rice_crop: rice.id,
        paddy_crop: paddy.id,
        tomato_contract: contract.id,
        paddy_task: task.id,
    })
}
