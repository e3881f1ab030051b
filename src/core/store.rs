use crate::config::StoreConfig;
use crate::domain::model::{
    Contract, ContractUpdate, Crop, CropStatus, CropUpdate, Milestone, NewContract, NewCrop,
    NewUser, NewVerificationTask, TaskStatus, TaskUpdate, User, UserRole, UserUpdate,
    VerificationTask,
};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{
    validate_date_order, validate_non_empty_string, validate_non_negative_amount,
    validate_positive_amount, validate_uri, validate_uri_list,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Single source of truth for the marketplace collections. One instance per
/// process, constructed at startup and passed by reference to whichever
/// layer needs it. All operations are synchronous and in-memory; collections
/// keep insertion order.
pub struct MarketStore {
    config: StoreConfig,
    users: Vec<User>,
    crops: Vec<Crop>,
    contracts: Vec<Contract>,
    tasks: Vec<VerificationTask>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    users: &'a [User],
    crops: &'a [Crop],
    contracts: &'a [Contract],
    verification_tasks: &'a [VerificationTask],
}

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

impl MarketStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            users: Vec::new(),
            crops: Vec::new(),
            contracts: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- users ----

    pub fn add_user(&mut self, input: NewUser) -> Result<User> {
        validate_non_empty_string("name", &input.name)?;
        validate_non_empty_string("phone", &input.phone)?;
        validate_non_empty_string("location", &input.location)?;
        validate_non_negative_amount("wallet_balance", input.wallet_balance)?;

        let user = User {
            id: next_id(),
            name: input.name,
            phone: input.phone,
            role: input.role,
            location: input.location,
            wallet_balance: input.wallet_balance,
            bio: input.bio,
        };
        tracing::debug!("added {} user {} ({})", user.role, user.id, user.name);
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn update_user(&mut self, id: &str, patch: UserUpdate) -> Result<User> {
        let idx = self.user_index(id)?;
        let merged = patch.apply(&self.users[idx]);

        validate_non_empty_string("name", &merged.name)?;
        validate_non_empty_string("phone", &merged.phone)?;
        validate_non_empty_string("location", &merged.location)?;
        validate_non_negative_amount("wallet_balance", merged.wallet_balance)?;

        self.users[idx] = merged.clone();
        Ok(merged)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    // ---- crops ----

    pub fn add_crop(&mut self, input: NewCrop) -> Result<Crop> {
        self.require_role(&input.farmer_id, UserRole::Farmer, "farmer_id")?;
        validate_non_empty_string("crop_name", &input.crop_name)?;
        validate_non_empty_string("location", &input.location)?;
        validate_positive_amount("area", input.area)?;
        validate_positive_amount("price", input.price)?;
        validate_date_order("expected_harvest", input.seed_date, input.expected_harvest)?;
        validate_uri_list("images", &input.images, self.config.max_crop_images)?;

        let crop = Crop {
            id: next_id(),
            farmer_id: input.farmer_id,
            crop_name: input.crop_name,
            location: input.location,
            area: input.area,
            seed_date: input.seed_date,
            expected_harvest: input.expected_harvest,
            status: CropStatus::Pending,
            price: input.price,
            images: input.images,
            agent_notes: input.agent_notes,
            verification_date: None,
            contract_id: None,
        };
        tracing::info!("listed crop {} ({})", crop.id, crop.crop_name);
        self.crops.push(crop.clone());
        Ok(crop)
    }

    pub fn update_crop(&mut self, id: &str, patch: CropUpdate) -> Result<Crop> {
        let idx = self.crop_index(id)?;

        if let Some(next) = patch.status {
            self.check_crop_transition(self.crops[idx].status, next)?;
        }

        let merged = patch.apply(&self.crops[idx]);
        validate_non_empty_string("crop_name", &merged.crop_name)?;
        validate_positive_amount("area", merged.area)?;
        validate_positive_amount("price", merged.price)?;
        validate_date_order("expected_harvest", merged.seed_date, merged.expected_harvest)?;
        validate_uri_list("images", &merged.images, self.config.max_crop_images)?;

        self.crops[idx] = merged.clone();
        Ok(merged)
    }

    /// Agent notes are append-only; this is the only way to grow them.
    pub fn append_agent_note(&mut self, crop_id: &str, note: &str) -> Result<Crop> {
        validate_non_empty_string("agent_note", note)?;
        let idx = self.crop_index(crop_id)?;
        self.crops[idx].agent_notes.push(note.to_string());
        Ok(self.crops[idx].clone())
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn crop(&self, id: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.id == id)
    }

    // ---- contracts ----

    pub fn add_contract(&mut self, input: NewContract) -> Result<Contract> {
        let crop = self
            .crop(&input.crop_id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "crop",
                id: input.crop_id.clone(),
            })?;
        if crop.farmer_id != input.farmer_id {
            return Err(MarketError::InvalidFieldValue {
                field: "farmer_id".to_string(),
                value: input.farmer_id.clone(),
                reason: format!("Crop {} belongs to a different farmer", input.crop_id),
            });
        }
        self.require_role(&input.distributor_id, UserRole::Distributor, "distributor_id")?;
        if let Some(agent_id) = &input.agent_id {
            self.require_role(agent_id, UserRole::Agent, "agent_id")?;
        }
        validate_positive_amount("price", input.price)?;
        validate_non_empty_string("terms", &input.terms)?;
        self.validate_milestones(&input.milestones, input.price)?;

        let contract = Contract {
            id: next_id(),
            crop_id: input.crop_id,
            farmer_id: input.farmer_id,
            distributor_id: input.distributor_id,
            agent_id: input.agent_id,
            price: input.price,
            status: input.status,
            terms: input.terms,
            milestones: input.milestones,
            created_at: Utc::now().date_naive(),
        };
        tracing::info!(
            "created {} contract {} for crop {}",
            contract.status,
            contract.id,
            contract.crop_id
        );
        self.contracts.push(contract.clone());
        Ok(contract)
    }

    pub fn update_contract(&mut self, id: &str, patch: ContractUpdate) -> Result<Contract> {
        let idx = self.contract_index(id)?;

        if let Some(next) = patch.status {
            let current = self.contracts[idx].status;
            if self.config.strict_transitions && !current.can_transition_to(next) {
                return Err(MarketError::InvalidTransition {
                    entity: "contract",
                    from: current.to_string(),
                    to: next.to_string(),
                });
            }
        }
        if let Some(agent_id) = &patch.agent_id {
            self.require_role(agent_id, UserRole::Agent, "agent_id")?;
        }

        let merged = patch.apply(&self.contracts[idx]);
        validate_positive_amount("price", merged.price)?;
        validate_non_empty_string("terms", &merged.terms)?;
        self.validate_milestones(&merged.milestones, merged.price)?;

        self.contracts[idx] = merged.clone();
        Ok(merged)
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn contract(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    // ---- verification tasks ----

    pub fn add_verification_task(&mut self, input: NewVerificationTask) -> Result<VerificationTask> {
        let crop = self
            .crop(&input.crop_id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "crop",
                id: input.crop_id.clone(),
            })?;
        if crop.farmer_id != input.farmer_id {
            return Err(MarketError::InvalidFieldValue {
                field: "farmer_id".to_string(),
                value: input.farmer_id.clone(),
                reason: format!("Crop {} belongs to a different farmer", input.crop_id),
            });
        }
        self.require_role(&input.agent_id, UserRole::Agent, "agent_id")?;
        validate_non_empty_string("location", &input.location)?;
        for photo in &input.photos {
            validate_uri("photos", photo)?;
        }

        let task = VerificationTask {
            id: next_id(),
            crop_id: input.crop_id,
            agent_id: input.agent_id,
            farmer_id: input.farmer_id,
            status: TaskStatus::Pending,
            priority: input.priority,
            notes: input.notes,
            photos: input.photos,
            location: input.location,
            scheduled_date: input.scheduled_date,
        };
        tracing::debug!("assigned verification task {} to agent {}", task.id, task.agent_id);
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update_verification_task(&mut self, id: &str, patch: TaskUpdate) -> Result<VerificationTask> {
        let idx = self.task_index(id)?;
        let merged = patch.apply(&self.tasks[idx]);

        validate_non_empty_string("location", &merged.location)?;
        for photo in &merged.photos {
            validate_uri("photos", photo)?;
        }

        self.tasks[idx] = merged.clone();
        Ok(merged)
    }

    pub fn verification_tasks(&self) -> &[VerificationTask] {
        &self.tasks
    }

    pub fn verification_task(&self, id: &str) -> Option<&VerificationTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Serialized snapshot of all four collections, insertion order.
    pub fn export_json(&self) -> Result<String> {
        let snapshot = Snapshot {
            users: &self.users,
            crops: &self.crops,
            contracts: &self.contracts,
            verification_tasks: &self.tasks,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    // ---- internals ----

    fn user_index(&self, id: &str) -> Result<usize> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "user",
                id: id.to_string(),
            })
    }

    fn crop_index(&self, id: &str) -> Result<usize> {
        self.crops
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "crop",
                id: id.to_string(),
            })
    }

    fn contract_index(&self, id: &str) -> Result<usize> {
        self.contracts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "contract",
                id: id.to_string(),
            })
    }

    fn task_index(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| MarketError::NotFound {
                entity: "verification task",
                id: id.to_string(),
            })
    }

    fn require_role(&self, user_id: &str, role: UserRole, field_name: &str) -> Result<()> {
        let user = self.user(user_id).ok_or_else(|| MarketError::NotFound {
            entity: "user",
            id: user_id.to_string(),
        })?;
        if user.role != role {
            return Err(MarketError::InvalidFieldValue {
                field: field_name.to_string(),
                value: user_id.to_string(),
                reason: format!("User has role {}, expected {}", user.role, role),
            });
        }
        Ok(())
    }

    fn check_crop_transition(&self, current: CropStatus, next: CropStatus) -> Result<()> {
        if self.config.strict_transitions && !current.can_transition_to(next) {
            return Err(MarketError::InvalidTransition {
                entity: "crop",
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        Ok(())
    }

    fn validate_milestones(&self, milestones: &[Milestone], price: f64) -> Result<()> {
        for milestone in milestones {
            validate_non_empty_string("milestones.title", &milestone.title)?;
            validate_positive_amount("milestones.amount", milestone.amount)?;
        }

        if self.config.enforce_milestone_totals && !milestones.is_empty() {
            let total: f64 = milestones.iter().map(|m| m.amount).sum();
            if (total - price).abs() > 0.01 {
                return Err(MarketError::InvalidFieldValue {
                    field: "milestones".to_string(),
                    value: total.to_string(),
                    reason: format!("Milestone amounts must sum to contract price {}", price),
                });
            }
        }

        Ok(())
    }
}
