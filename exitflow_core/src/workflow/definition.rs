use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{DepartmentApproval, catalog};
use super::factory::{StepFactory, department_key};
use super::state::{OverallStatus, StepStatus};
use super::step::ApprovalStep;

use crate::core::request::ExitRequest;
use crate::error::WorkflowError;

/// Approval workflow of one exit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub exit_id: String,
    pub steps: Vec<ApprovalStep>,
    pub department_approvals: Vec<DepartmentApproval>,
    pub current_approval_step: Option<u32>,
    pub overall_status: OverallStatus,
    pub submitted_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
}

impl Workflow {
    pub fn new(
        exit_id: &str,
        steps: Vec<ApprovalStep>,
        department_approvals: Vec<DepartmentApproval>,
        submitted_date: DateTime<Utc>,
    ) -> Result<Self, WorkflowError> {
        if exit_id.trim().is_empty() {
            return Err(WorkflowError::Definition(
                "Workflow must reference an exit request".to_string(),
            ));
        }

        let mut workflow = Workflow {
            exit_id: exit_id.to_owned(),
            steps,
            department_approvals,
            current_approval_step: None,
            overall_status: OverallStatus::Pending,
            submitted_date,
            completed_date: None,
        };
        workflow.steps.sort_by_key(|step| step.order);
        workflow.current_approval_step = workflow.find_current().map(|step| step.step_id);

        Ok(workflow)
    }

    /// Generates the steps for a freshly submitted request.
    pub fn start(request: &ExitRequest) -> Result<Self, WorkflowError> {
        Self::start_at(request, Utc::now())
    }

    pub fn start_at(
        request: &ExitRequest,
        submitted_date: DateTime<Utc>,
    ) -> Result<Self, WorkflowError> {
        let steps = StepFactory::generate(request, 1);
        let workflow = Workflow::new(&request.exit_id, steps, catalog(), submitted_date)?;

        for step in workflow.unresolved_steps() {
            warn!(
                exit_id = %workflow.exit_id,
                step_id = step.step_id,
                step = %step.step_name,
                "Step has no eligible approver"
            );
        }

        info!(
            exit_id = %workflow.exit_id,
            form_type = request.form_type.label(),
            steps = workflow.steps.len(),
            "Workflow started"
        );

        Ok(workflow)
    }

    fn find_current(&self) -> Option<&ApprovalStep> {
        if self.overall_status.is_terminal() || self.is_rejected() {
            return None;
        }
        // steps are kept sorted by order
        self.steps.iter().find(|step| step.is_pending())
    }

    pub(crate) fn refresh_current(&mut self) {
        self.current_approval_step = self.find_current().map(|step| step.step_id);
    }

    pub fn current_step(&self) -> Option<&ApprovalStep> {
        let id = self.current_approval_step?;
        self.step(id)
    }

    pub fn step(&self, step_id: u32) -> Option<&ApprovalStep> {
        self.steps.iter().find(|step| step.step_id == step_id)
    }

    pub(crate) fn step_mut(&mut self, step_id: u32) -> Option<&mut ApprovalStep> {
        self.steps.iter_mut().find(|step| step.step_id == step_id)
    }

    fn required(&self) -> impl Iterator<Item = &ApprovalStep> {
        self.steps.iter().filter(|step| step.is_required)
    }

    pub fn approved_required_count(&self) -> usize {
        self.required()
            .filter(|step| step.status == StepStatus::Approved)
            .count()
    }

    pub fn required_count(&self) -> usize {
        self.required().count()
    }

    /// Share of required steps approved, rounded to a whole percent.
    pub fn progress(&self) -> u8 {
        let total = self.required_count();
        if total == 0 {
            return 0;
        }

        let pct = (self.approved_required_count() as f64 / total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.required()
            .all(|step| step.status == StepStatus::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.status == StepStatus::Rejected)
    }

    pub fn unresolved_steps(&self) -> Vec<&ApprovalStep> {
        self.steps
            .iter()
            .filter(|step| step.is_unresolved())
            .collect()
    }

    pub fn progress_text(&self) -> String {
        format!(
            "{} of {} steps approved ({}%)",
            self.approved_required_count(),
            self.required_count(),
            self.progress()
        )
    }

    pub fn status_text(&self) -> &'static str {
        self.overall_status.label()
    }

    /// Clearance checklist by department id or name.
    pub fn department(&self, department: &str) -> Option<&DepartmentApproval> {
        let key = department_key(department);
        self.department_approvals
            .iter()
            .find(|d| d.department_id == key)
    }

    /// Mutable clearance checklist; closed workflows refuse edits.
    pub fn department_mut(
        &mut self,
        department: &str,
    ) -> Result<&mut DepartmentApproval, WorkflowError> {
        if self.overall_status.is_terminal() {
            return Err(WorkflowError::WorkflowClosed {
                status: self.overall_status,
            });
        }

        let key = department_key(department);
        self.department_approvals
            .iter_mut()
            .find(|d| d.department_id == key)
            .ok_or_else(|| WorkflowError::UnknownDepartment(department.to_owned()))
    }
}
