use crate::core::store::MarketStore;
use crate::domain::model::{Crop, CropStatus, CropUpdate, TaskStatus, TaskUpdate, VerificationTask};
use crate::utils::error::{MarketError, Result};
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationDecision {
    Approve,
    Reject,
}

/// Result of a verification decision. `task` is `None` when no pending task
/// was assigned for the crop.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub crop: Crop,
    pub task: Option<VerificationTask>,
}

impl MarketStore {
    /// Records an agent's inspection decision in one call: the crop status,
    /// its verification date and note, and the matching pending task all
    /// change together. Approval moves the crop to `verified`; rejection
    /// leaves it at `pending` with only the note recording the outcome.
    ///
    /// All lookups happen before the first write, so a missing crop leaves
    /// the store untouched.
    pub fn complete_verification(
        &mut self,
        crop_id: &str,
        decision: VerificationDecision,
        notes: Option<&str>,
    ) -> Result<VerificationOutcome> {
        let crop = self.crop(crop_id).ok_or_else(|| MarketError::NotFound {
            entity: "crop",
            id: crop_id.to_string(),
        })?;
        if crop.status != CropStatus::Pending {
            return Err(MarketError::InvalidTransition {
                entity: "crop",
                from: crop.status.to_string(),
                to: CropStatus::Verified.to_string(),
            });
        }

        let task_id = self
            .verification_tasks()
            .iter()
            .find(|t| t.crop_id == crop_id && t.status == TaskStatus::Pending)
            .map(|t| t.id.clone());

        let note = match notes {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => match decision {
                VerificationDecision::Approve => "Approved by agent".to_string(),
                VerificationDecision::Reject => "Rejected by agent".to_string(),
            },
        };

        let new_status = match decision {
            VerificationDecision::Approve => CropStatus::Verified,
            VerificationDecision::Reject => CropStatus::Pending,
        };

        self.update_crop(
            crop_id,
            CropUpdate {
                status: Some(new_status),
                verification_date: Some(Utc::now()),
                ..Default::default()
            },
        )?;
        let crop = self.append_agent_note(crop_id, &note)?;

        let task = match task_id {
            Some(id) => Some(self.update_verification_task(
                &id,
                TaskUpdate {
                    status: Some(TaskStatus::Completed),
                    notes: Some(note.clone()),
                    ..Default::default()
                },
            )?),
            None => None,
        };

        tracing::info!(
            "crop {} {} ({})",
            crop.id,
            match decision {
                VerificationDecision::Approve => "approved",
                VerificationDecision::Reject => "rejected",
            },
            note
        );

        Ok(VerificationOutcome { crop, task })
    }
}
