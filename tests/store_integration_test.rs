use agrilink::{
    ContractStatus, CropStatus, CropUpdate, MarketError, MarketStore, Milestone, MilestoneStatus,
    NewContract, NewCrop, NewUser, StoreConfig, TaskUpdate, TaskStatus, UserRole, UserUpdate,
};
use chrono::{NaiveDate, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_user(store: &mut MarketStore, name: &str, role: UserRole) -> String {
    store
        .add_user(NewUser {
            name: name.to_string(),
            phone: "+91 98480 00000".to_string(),
            role,
            location: "Guntur, AP".to_string(),
            wallet_balance: 1000.0,
            bio: None,
        })
        .unwrap()
        .id
}

fn rice_listing(farmer_id: &str) -> NewCrop {
    NewCrop {
        farmer_id: farmer_id.to_string(),
        crop_name: "Rice".to_string(),
        location: "Krishna, AP".to_string(),
        area: 2.0,
        seed_date: date(2024, 1, 1),
        expected_harvest: date(2024, 5, 1),
        price: 10000.0,
        images: vec![],
        agent_notes: vec![],
    }
}

#[test]
fn consecutive_adds_produce_distinct_ids() {
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);

    let first = store.add_crop(rice_listing(&farmer)).unwrap();
    let second = store.add_crop(rice_listing(&farmer)).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.crops().len(), 2);
}

#[test]
fn new_crop_defaults_to_pending_and_appears_in_listing() {
    // Scenario A
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);

    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    assert_eq!(crop.status, CropStatus::Pending);
    assert!(crop.verification_date.is_none());
    assert!(store.crops().iter().any(|c| c.id == crop.id));
}

#[test]
fn update_sets_given_fields_and_keeps_the_rest() {
    // Scenario B
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    let verified_at = Utc::now();
    store
        .update_crop(
            &crop.id,
            CropUpdate {
                status: Some(CropStatus::Verified),
                verification_date: Some(verified_at),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = store.crop(&crop.id).unwrap();
    assert_eq!(stored.status, CropStatus::Verified);
    assert_eq!(stored.verification_date, Some(verified_at));
    assert_eq!(stored.area, crop.area);
    assert_eq!(stored.price, crop.price);
    assert_eq!(stored.images, crop.images);
}

#[test]
fn repeated_status_update_is_idempotent() {
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    let patch = CropUpdate {
        status: Some(CropStatus::Verified),
        ..Default::default()
    };
    let once = store.update_crop(&crop.id, patch.clone()).unwrap();
    let twice = store.update_crop(&crop.id, patch).unwrap();

    assert_eq!(once.status, twice.status);
    assert_eq!(once.agent_notes, twice.agent_notes);
    assert_eq!(store.crops().len(), 1);
}

#[test]
fn contract_milestones_are_preserved_verbatim() {
    // Scenario C
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let distributor = add_user(&mut store, "Anand Traders", UserRole::Distributor);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    let milestones = vec![Milestone {
        id: "1".to_string(),
        title: "Advance".to_string(),
        amount: 3000.0,
        status: MilestoneStatus::Pending,
        date: None,
    }];
    let contract = store
        .add_contract(NewContract {
            crop_id: crop.id.clone(),
            farmer_id: farmer.clone(),
            distributor_id: distributor,
            agent_id: None,
            price: 10000.0,
            status: ContractStatus::Draft,
            terms: "Standard purchase agreement".to_string(),
            milestones: milestones.clone(),
        })
        .unwrap();

    assert!(!contract.id.is_empty());
    assert_ne!(contract.id, crop.id);
    assert_eq!(contract.milestones, milestones);
    assert_eq!(contract.status, ContractStatus::Draft);
    assert_eq!(store.contract(&contract.id).unwrap().milestones, milestones);
}

#[test]
fn updating_missing_task_fails_and_changes_nothing() {
    // Scenario D
    let mut store = MarketStore::new(StoreConfig::default());

    let err = store
        .update_verification_task(
            "missing-id",
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        MarketError::NotFound {
            entity: "verification task",
            ..
        }
    ));
    assert!(store.verification_tasks().is_empty());
}

#[test]
fn updating_missing_crop_leaves_collection_unchanged() {
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    let err = store
        .update_crop(
            "missing-id",
            CropUpdate {
                price: Some(99999.0),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, MarketError::NotFound { entity: "crop", .. }));
    assert_eq!(store.crops().len(), 1);
    assert_eq!(store.crop(&crop.id).unwrap().price, 10000.0);
}

#[test]
fn user_update_merges_fields_but_never_role() {
    let mut store = MarketStore::new(StoreConfig::default());
    let id = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);

    let updated = store
        .update_user(
            &id,
            UserUpdate {
                location: Some("Vijayawada, AP".to_string()),
                wallet_balance: Some(2500.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.location, "Vijayawada, AP");
    assert_eq!(updated.wallet_balance, 2500.0);
    assert_eq!(updated.name, "Ravi Kumar");
    assert_eq!(updated.role, UserRole::Farmer);
}

#[test]
fn invalid_update_leaves_record_untouched() {
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    let err = store
        .update_crop(
            &crop.id,
            CropUpdate {
                area: Some(-1.0),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, MarketError::InvalidFieldValue { .. }));
    assert_eq!(store.crop(&crop.id).unwrap().area, 2.0);
}

#[test]
fn contract_requires_matching_farmer_and_distributor_role() {
    let mut store = MarketStore::new(StoreConfig::default());
    let farmer = add_user(&mut store, "Ravi Kumar", UserRole::Farmer);
    let other_farmer = add_user(&mut store, "Lakshmi Devi", UserRole::Farmer);
    let distributor = add_user(&mut store, "Anand Traders", UserRole::Distributor);
    let crop = store.add_crop(rice_listing(&farmer)).unwrap();

    // wrong farmer for the crop
    let err = store
        .add_contract(NewContract {
            crop_id: crop.id.clone(),
            farmer_id: other_farmer.clone(),
            distributor_id: distributor.clone(),
            agent_id: None,
            price: 10000.0,
            status: ContractStatus::Draft,
            terms: "Terms".to_string(),
            milestones: vec![],
        })
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidFieldValue { .. }));

    // farmer standing in as distributor
    let err = store
        .add_contract(NewContract {
            crop_id: crop.id,
            farmer_id: farmer,
            distributor_id: other_farmer,
            agent_id: None,
            price: 10000.0,
            status: ContractStatus::Draft,
            terms: "Terms".to_string(),
            milestones: vec![],
        })
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidFieldValue { .. }));
    assert!(store.contracts().is_empty());
}
