// Domain layer: marketplace entities and their patch types. No behavior
// beyond status transition rules and patch application.

pub mod model;

pub use crate::domain::model::{
    Contract, ContractStatus, ContractUpdate, Crop, CropStatus, CropUpdate, Milestone,
    MilestoneStatus, NewContract, NewCrop, NewUser, NewVerificationTask, TaskPriority, TaskStatus,
    TaskUpdate, User, UserRole, UserUpdate, VerificationTask,
};
