pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{AppConfig, StoreConfig};
pub use core::{seed_sample_data, MarketStore, VerificationDecision, VerificationOutcome};
pub use domain::model::{
    Contract, ContractStatus, ContractUpdate, Crop, CropStatus, CropUpdate, Milestone,
    MilestoneStatus, NewContract, NewCrop, NewUser, NewVerificationTask, TaskPriority, TaskStatus,
    TaskUpdate, User, UserRole, UserUpdate, VerificationTask,
};
pub use utils::error::{MarketError, Result};
