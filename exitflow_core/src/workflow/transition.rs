use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::Workflow;
use super::state::{OverallStatus, StepStatus};

use crate::error::WorkflowError;

const DEFAULT_APPROVAL_COMMENT: &str = "Approved";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

/// What a single decision did to a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub step_id: u32,
    pub decision: Decision,
    pub from_state: StepStatus,
    pub to_state: StepStatus,
    pub decided_by: String,
    pub decided_at: DateTime<Utc>,
    pub overall_status: OverallStatus,
    pub next_step: Option<u32>,
}

impl Workflow {
    pub fn approve(
        &mut self,
        step_id: u32,
        approver_name: &str,
        comments: &str,
    ) -> Result<Transition, WorkflowError> {
        self.approve_at(step_id, approver_name, comments, Utc::now())
    }

    pub fn approve_at(
        &mut self,
        step_id: u32,
        approver_name: &str,
        comments: &str,
        at: DateTime<Utc>,
    ) -> Result<Transition, WorkflowError> {
        let comments = if comments.trim().is_empty() {
            DEFAULT_APPROVAL_COMMENT
        } else {
            comments
        };
        self.decide(step_id, Decision::Approve, approver_name, comments, at)?;

        self.refresh_current();
        if self.current_approval_step.is_none() {
            self.overall_status = OverallStatus::Approved;
            self.completed_date = Some(at);
        } else {
            self.overall_status = OverallStatus::InProgress;
        }

        Ok(self.outcome(step_id, Decision::Approve, approver_name, at))
    }

    /// Rejects a step and closes the workflow.
    ///
    /// Comments are taken as given; refusing blank rationale is the caller's
    /// job.
    pub fn reject(
        &mut self,
        step_id: u32,
        approver_name: &str,
        comments: &str,
    ) -> Result<Transition, WorkflowError> {
        self.reject_at(step_id, approver_name, comments, Utc::now())
    }

    pub fn reject_at(
        &mut self,
        step_id: u32,
        approver_name: &str,
        comments: &str,
        at: DateTime<Utc>,
    ) -> Result<Transition, WorkflowError> {
        self.decide(step_id, Decision::Reject, approver_name, comments, at)?;

        self.overall_status = OverallStatus::Rejected;
        self.completed_date = Some(at);
        self.refresh_current();

        Ok(self.outcome(step_id, Decision::Reject, approver_name, at))
    }

    /// Fails unless `step_id` is the pending current step of an open workflow.
    pub fn ensure_actionable(&self, step_id: u32) -> Result<(), WorkflowError> {
        if self.overall_status.is_terminal() {
            return Err(WorkflowError::WorkflowClosed {
                status: self.overall_status,
            });
        }

        let step = self
            .step(step_id)
            .ok_or(WorkflowError::UnknownStep { step_id })?;

        if !step.is_pending() {
            return Err(WorkflowError::StepNotPending {
                step_id,
                status: step.status,
            });
        }

        if self.current_approval_step != Some(step_id) {
            return Err(WorkflowError::NotCurrentStep {
                step_id,
                current: self.current_approval_step,
            });
        }

        Ok(())
    }

    fn decide(
        &mut self,
        step_id: u32,
        decision: Decision,
        approver_name: &str,
        comments: &str,
        at: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        self.ensure_actionable(step_id)?;

        let step = self
            .step_mut(step_id)
            .ok_or(WorkflowError::UnknownStep { step_id })?;

        step.status = match decision {
            Decision::Approve => StepStatus::Approved,
            Decision::Reject => StepStatus::Rejected,
        };
        step.approved_by = Some(approver_name.to_owned());
        step.approved_date = Some(at);
        step.comments = Some(comments.to_owned());

        Ok(())
    }

    fn outcome(
        &self,
        step_id: u32,
        decision: Decision,
        approver_name: &str,
        at: DateTime<Utc>,
    ) -> Transition {
        let to_state = self
            .step(step_id)
            .map(|step| step.status)
            .unwrap_or_default();

        Transition {
            step_id,
            decision,
            from_state: StepStatus::Pending,
            to_state,
            decided_by: approver_name.to_owned(),
            decided_at: at,
            overall_status: self.overall_status,
            next_step: self.current_approval_step,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::TimeZone;

    use super::*;
    use crate::core::request::{ExitRequest, FormType, Responsibility};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, hour, 0, 0).unwrap()
    }

    fn responsibility(id: &str) -> Responsibility {
        Responsibility {
            responsible_person_id: id.to_string(),
            ..Default::default()
        }
    }

    /// Emergency exit with two handover contacts and HOD `H1`: seven steps.
    fn emergency_workflow() -> Workflow {
        let mut request = ExitRequest::new("EX-9", "e1", "Asha", FormType::Emergency);
        request.responsibilities = vec![responsibility("r1"), responsibility("r2")];
        request.dep_hod = Some("H1".to_string());
        Workflow::start_at(&request, at(8)).unwrap()
    }

    #[test]
    fn test_approve_first_step() {
        let mut workflow = emergency_workflow();

        let transition = workflow.approve_at(1, "Ravi", "", at(9)).unwrap();

        assert_eq!(transition.to_state, StepStatus::Approved);
        assert_eq!(transition.next_step, Some(2));
        assert_eq!(transition.overall_status, OverallStatus::InProgress);

        let step = workflow.step(1).unwrap();
        assert_eq!(step.approved_by.as_deref(), Some("Ravi"));
        assert_eq!(step.approved_date, Some(at(9)));
        assert_eq!(step.comments.as_deref(), Some("Approved"));
        assert_eq!(workflow.current_approval_step, Some(2));
        assert!(workflow.completed_date.is_none());
    }

    #[test]
    fn test_full_emergency_scenario() {
        let mut workflow = emergency_workflow();
        assert_eq!(workflow.steps.len(), 7);
        assert_eq!(workflow.progress(), 0);

        for step_id in 1..=6 {
            workflow
                .approve_at(step_id, "approver", "ok", at(10))
                .unwrap();
        }
        assert_eq!(workflow.progress(), 86);
        assert_eq!(workflow.overall_status, OverallStatus::InProgress);
        assert!(workflow.completed_date.is_none());
        assert!(!workflow.is_complete());

        workflow.approve_at(7, "admin", "done", at(11)).unwrap();
        assert_eq!(workflow.progress(), 100);
        assert!(workflow.is_complete());
        assert_eq!(workflow.overall_status, OverallStatus::Approved);
        assert_eq!(workflow.completed_date, Some(at(11)));
        assert!(workflow.current_approval_step.is_none());
    }

    #[test]
    fn test_progress_is_full_only_when_complete() {
        let mut workflow = emergency_workflow();
        for step_id in 1..=7 {
            assert_eq!(workflow.progress() == 100, workflow.is_complete());
            workflow.approve_at(step_id, "a", "", at(12)).unwrap();
        }
        assert_eq!(workflow.progress() == 100, workflow.is_complete());
    }

    #[test]
    fn test_reject_closes_workflow() {
        for position in 1..=7 {
            let mut workflow = emergency_workflow();
            for step_id in 1..position {
                workflow.approve_at(step_id, "a", "", at(9)).unwrap();
            }

            let transition = workflow
                .reject_at(position, "Hari", "assets missing", at(10))
                .unwrap();

            assert_eq!(transition.overall_status, OverallStatus::Rejected);
            assert_eq!(transition.next_step, None);
            assert_eq!(workflow.overall_status, OverallStatus::Rejected);
            assert_eq!(workflow.completed_date, Some(at(10)));
            assert!(workflow.is_rejected());
            assert!(workflow.current_step().is_none());
        }
    }

    #[test]
    fn test_no_approvals_after_rejection() {
        let mut workflow = emergency_workflow();
        workflow.reject_at(1, "Ravi", "not handed over", at(9)).unwrap();

        for step_id in 2..=7 {
            let err = workflow.approve_at(step_id, "a", "", at(10)).unwrap_err();
            assert!(matches!(
                err,
                WorkflowError::WorkflowClosed {
                    status: OverallStatus::Rejected
                }
            ));
        }
        assert_eq!(workflow.step(2).unwrap().status, StepStatus::Pending);
    }

    #[test]
    fn test_decided_step_cannot_move_again() {
        let mut workflow = emergency_workflow();
        workflow.approve_at(1, "Ravi", "", at(9)).unwrap();

        let err = workflow.approve_at(1, "Ravi", "", at(10)).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::StepNotPending {
                step_id: 1,
                status: StepStatus::Approved
            }
        ));
        assert!(err.is_conflict());
        assert_eq!(workflow.step(1).unwrap().approved_date, Some(at(9)));
    }

    #[test]
    fn test_unknown_step() {
        let mut workflow = emergency_workflow();
        let before = workflow.clone();

        let err = workflow.approve_at(42, "x", "", at(9)).unwrap_err();

        assert!(matches!(err, WorkflowError::UnknownStep { step_id: 42 }));
        assert_eq!(workflow, before);
    }

    #[test]
    fn test_steps_are_sequential() {
        let mut workflow = emergency_workflow();

        let err = workflow.approve_at(3, "x", "", at(9)).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::NotCurrentStep {
                step_id: 3,
                current: Some(1)
            }
        ));
        assert_eq!(workflow.overall_status, OverallStatus::Pending);
    }

    #[test]
    fn test_reject_keeps_given_comments() {
        let mut workflow = emergency_workflow();
        workflow.reject_at(1, "Ravi", "", at(9)).unwrap();

        assert_eq!(workflow.step(1).unwrap().comments.as_deref(), Some(""));
    }
}
