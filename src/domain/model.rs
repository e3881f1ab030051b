use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a listed crop. Transitions are caller-driven; the strict
/// graph is only enforced when the store runs with `strict_transitions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropStatus {
    Pending,
    Verified,
    Growing,
    Ready,
    Sold,
}

impl CropStatus {
    /// Strict transition graph. Rejection keeps a crop at `pending`, and
    /// every status may be re-written with itself so repeated updates stay
    /// idempotent.
    pub fn can_transition_to(self, next: CropStatus) -> bool {
        use CropStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Verified) | (Verified, Growing) | (Growing, Ready) | (Ready, Sold)
        )
    }
}

impl fmt::Display for CropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CropStatus::Pending => "pending",
            CropStatus::Verified => "verified",
            CropStatus::Growing => "growing",
            CropStatus::Ready => "ready",
            CropStatus::Sold => "sold",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn can_transition_to(self, next: ContractStatus) -> bool {
        use ContractStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Draft, Active) | (Draft, Cancelled) | (Active, Completed) | (Active, Cancelled)
        )
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Farmer,
    Distributor,
    Agent,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Farmer => "farmer",
            UserRole::Distributor => "distributor",
            UserRole::Agent => "agent",
        };
        write!(f, "{}", s)
    }
}

/// A farmer-listed planting/harvest cycle with its sale price and
/// verification state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: String,
    pub farmer_id: String,
    pub crop_name: String,
    pub location: String,
    /// Cultivated area in acres.
    pub area: f64,
    pub seed_date: NaiveDate,
    pub expected_harvest: NaiveDate,
    pub status: CropStatus,
    pub price: f64,
    pub images: Vec<String>,
    /// Append-only inspection notes; grown via `MarketStore::append_agent_note`.
    pub agent_notes: Vec<String>,
    pub verification_date: Option<DateTime<Utc>>,
    pub contract_id: Option<String>,
}

/// Fields-minus-id input for a new crop listing. Status always starts at
/// `pending`; only an agent decision moves it forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCrop {
    pub farmer_id: String,
    pub crop_name: String,
    pub location: String,
    pub area: f64,
    pub seed_date: NaiveDate,
    pub expected_harvest: NaiveDate,
    pub price: f64,
    pub images: Vec<String>,
    pub agent_notes: Vec<String>,
}

/// Shallow-merge patch: `Some` fields win, `None` fields keep their prior
/// value. `agent_notes` is deliberately absent (append-only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropUpdate {
    pub crop_name: Option<String>,
    pub location: Option<String>,
    pub area: Option<f64>,
    pub seed_date: Option<NaiveDate>,
    pub expected_harvest: Option<NaiveDate>,
    pub status: Option<CropStatus>,
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub verification_date: Option<DateTime<Utc>>,
    pub contract_id: Option<String>,
}

impl CropUpdate {
    /// Copy-with-fields merge; never mutates the original record.
    pub fn apply(&self, crop: &Crop) -> Crop {
        Crop {
            id: crop.id.clone(),
            farmer_id: crop.farmer_id.clone(),
            crop_name: self.crop_name.clone().unwrap_or_else(|| crop.crop_name.clone()),
            location: self.location.clone().unwrap_or_else(|| crop.location.clone()),
            area: self.area.unwrap_or(crop.area),
            seed_date: self.seed_date.unwrap_or(crop.seed_date),
            expected_harvest: self.expected_harvest.unwrap_or(crop.expected_harvest),
            status: self.status.unwrap_or(crop.status),
            price: self.price.unwrap_or(crop.price),
            images: self.images.clone().unwrap_or_else(|| crop.images.clone()),
            agent_notes: crop.agent_notes.clone(),
            verification_date: self.verification_date.or(crop.verification_date),
            contract_id: self.contract_id.clone().or_else(|| crop.contract_id.clone()),
        }
    }
}

/// A partial payment line item within a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub status: MilestoneStatus,
    pub date: Option<NaiveDate>,
}

/// A price agreement between a farmer and a distributor for one crop,
/// broken into milestone payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub crop_id: String,
    pub farmer_id: String,
    pub distributor_id: String,
    pub agent_id: Option<String>,
    pub price: f64,
    pub status: ContractStatus,
    pub terms: String,
    pub milestones: Vec<Milestone>,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContract {
    pub crop_id: String,
    pub farmer_id: String,
    pub distributor_id: String,
    pub agent_id: Option<String>,
    pub price: f64,
    pub status: ContractStatus,
    pub terms: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractUpdate {
    pub agent_id: Option<String>,
    pub price: Option<f64>,
    pub status: Option<ContractStatus>,
    pub terms: Option<String>,
    pub milestones: Option<Vec<Milestone>>,
}

impl ContractUpdate {
    pub fn apply(&self, contract: &Contract) -> Contract {
        Contract {
            id: contract.id.clone(),
            crop_id: contract.crop_id.clone(),
            farmer_id: contract.farmer_id.clone(),
            distributor_id: contract.distributor_id.clone(),
            agent_id: self.agent_id.clone().or_else(|| contract.agent_id.clone()),
            price: self.price.unwrap_or(contract.price),
            status: self.status.unwrap_or(contract.status),
            terms: self.terms.clone().unwrap_or_else(|| contract.terms.clone()),
            milestones: self
                .milestones
                .clone()
                .unwrap_or_else(|| contract.milestones.clone()),
            created_at: contract.created_at,
        }
    }
}

/// A marketplace participant. Wallet balance is plain account state, not a
/// blockchain balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub location: String,
    pub wallet_balance: f64,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub location: String,
    pub wallet_balance: f64,
    pub bio: Option<String>,
}

/// Role is immutable: changing it would silently break the referential
/// checks on crops, contracts, and tasks that were created against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub wallet_balance: Option<f64>,
    pub bio: Option<String>,
}

impl UserUpdate {
    pub fn apply(&self, user: &User) -> User {
        User {
            id: user.id.clone(),
            name: self.name.clone().unwrap_or_else(|| user.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| user.phone.clone()),
            role: user.role,
            location: self.location.clone().unwrap_or_else(|| user.location.clone()),
            wallet_balance: self.wallet_balance.unwrap_or(user.wallet_balance),
            bio: self.bio.clone().or_else(|| user.bio.clone()),
        }
    }
}

/// An agent's assignment to inspect and approve or reject a crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationTask {
    pub id: String,
    pub crop_id: String,
    pub agent_id: String,
    pub farmer_id: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub notes: String,
    pub photos: Vec<String>,
    pub location: String,
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVerificationTask {
    pub crop_id: String,
    pub agent_id: String,
    pub farmer_id: String,
    pub priority: TaskPriority,
    pub notes: String,
    pub photos: Vec<String>,
    pub location: String,
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
    pub location: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

impl TaskUpdate {
    pub fn apply(&self, task: &VerificationTask) -> VerificationTask {
        VerificationTask {
            id: task.id.clone(),
            crop_id: task.crop_id.clone(),
            agent_id: task.agent_id.clone(),
            farmer_id: task.farmer_id.clone(),
            status: self.status.unwrap_or(task.status),
            priority: self.priority.unwrap_or(task.priority),
            notes: self.notes.clone().unwrap_or_else(|| task.notes.clone()),
            photos: self.photos.clone().unwrap_or_else(|| task.photos.clone()),
            location: self.location.clone().unwrap_or_else(|| task.location.clone()),
            scheduled_date: self.scheduled_date.unwrap_or(task.scheduled_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_status_strict_graph() {
        use CropStatus::*;
        assert!(Pending.can_transition_to(Verified));
        assert!(Verified.can_transition_to(Growing));
        assert!(Growing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Sold));

        assert!(!Pending.can_transition_to(Sold));
        assert!(!Sold.can_transition_to(Pending));
        assert!(!Verified.can_transition_to(Pending));
    }

    #[test]
    fn test_crop_status_self_transition_allowed() {
        for status in [
            CropStatus::Pending,
            CropStatus::Verified,
            CropStatus::Growing,
            CropStatus::Ready,
            CropStatus::Sold,
        ] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_contract_status_graph() {
        use ContractStatus::*;
        assert!(Draft.can_transition_to(Active));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Draft));
    }

    #[test]
    fn test_crop_update_merges_only_given_fields() {
        let crop = Crop {
            id: "c1".to_string(),
            farmer_id: "f1".to_string(),
            crop_name: "Tomato".to_string(),
            location: "Guntur, AP".to_string(),
            area: 2.5,
            seed_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            expected_harvest: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            status: CropStatus::Pending,
            price: 45000.0,
            images: vec!["https://images.example.com/tomato.jpg".to_string()],
            agent_notes: vec!["Initial listing".to_string()],
            verification_date: None,
            contract_id: None,
        };

        let patch = CropUpdate {
            status: Some(CropStatus::Verified),
            ..Default::default()
        };
        let merged = patch.apply(&crop);

        assert_eq!(merged.status, CropStatus::Verified);
        assert_eq!(merged.crop_name, "Tomato");
        assert_eq!(merged.area, 2.5);
        assert_eq!(merged.price, 45000.0);
        assert_eq!(merged.images, crop.images);
        assert_eq!(merged.agent_notes, crop.agent_notes);
        // original untouched
        assert_eq!(crop.status, CropStatus::Pending);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&CropStatus::Verified).unwrap(),
            "\"verified\""
        );
        let parsed: TaskPriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, TaskPriority::High);
    }
}
