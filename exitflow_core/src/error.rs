use thiserror::Error;

use crate::workflow::state::{OverallStatus, StepStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("{0}")]
    Definition(String),

    #[error("{0}")]
    Parsing(String),

    #[error("Unknown workflow {0}")]
    UnknownWorkflow(String),

    #[error("Step {step_id} does not exist in this workflow")]
    UnknownStep { step_id: u32 },

    #[error("Step {step_id} has already been decided ({status})")]
    StepNotPending { step_id: u32, status: StepStatus },

    #[error("Step {step_id} is not the current step (current: {current:?})")]
    NotCurrentStep { step_id: u32, current: Option<u32> },

    #[error("Workflow is closed ({status})")]
    WorkflowClosed { status: OverallStatus },

    #[error("Step {step_id} has no eligible approver")]
    UnresolvedApprover { step_id: u32 },

    #[error("User '{actor_id}' is not authorized to act on step {step_id}")]
    Unauthorized { actor_id: String, step_id: u32 },

    #[error("Rejecting step {step_id} requires comments")]
    MissingRationale { step_id: u32 },

    #[error("Unknown department '{0}'")]
    UnknownDepartment(String),

    #[error("Department '{department}' has no clearance item '{item}'")]
    UnknownClearanceItem { department: String, item: String },
}

impl WorkflowError {
    /// Refusals caused by acting on a step that cannot move right now.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            WorkflowError::UnknownStep { .. }
                | WorkflowError::StepNotPending { .. }
                | WorkflowError::NotCurrentStep { .. }
                | WorkflowError::WorkflowClosed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_classification() {
        assert!(WorkflowError::UnknownStep { step_id: 9 }.is_conflict());
        assert!(
            WorkflowError::WorkflowClosed {
                status: OverallStatus::Rejected
            }
            .is_conflict()
        );
        assert!(!WorkflowError::MissingRationale { step_id: 1 }.is_conflict());
        assert!(
            !WorkflowError::Unauthorized {
                actor_id: "u1".to_string(),
                step_id: 1
            }
            .is_conflict()
        );
    }

    #[test]
    fn test_messages() {
        let err = WorkflowError::StepNotPending {
            step_id: 2,
            status: StepStatus::Approved,
        };
        assert_eq!(err.to_string(), "Step 2 has already been decided (Approved)");

        let err = WorkflowError::UnresolvedApprover { step_id: 3 };
        assert_eq!(err.to_string(), "Step 3 has no eligible approver");
    }
}
