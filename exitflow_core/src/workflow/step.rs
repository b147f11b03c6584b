use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::StepStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApproverType {
    ResponsiblePerson,
    ProjectManager,
    Hod,
    Department,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStep {
    pub step_id: u32,
    pub step_name: String,
    pub approver_type: ApproverType,
    /// For department steps this holds the single department key.
    pub approver_ids: Vec<String>,
    pub approver_names: Vec<String>,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Option<String>,
    pub is_required: bool,
    pub order: u32,
}

impl ApprovalStep {
    pub fn new(
        step_id: u32,
        step_name: &str,
        approver_type: ApproverType,
        approver_ids: Vec<String>,
        approver_names: Vec<String>,
    ) -> Self {
        Self {
            step_id,
            step_name: step_name.to_owned(),
            approver_type,
            approver_ids,
            approver_names,
            status: StepStatus::Pending,
            approved_by: None,
            approved_date: None,
            comments: None,
            is_required: true,
            order: step_id,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == StepStatus::Pending
    }

    /// A step nobody can act on: no approver id, or only blank ones.
    pub fn is_unresolved(&self) -> bool {
        self.approver_ids.iter().all(|id| id.trim().is_empty())
    }

    /// Department key of a department step.
    pub fn department_key(&self) -> Option<&str> {
        match self.approver_type {
            ApproverType::Department => self.approver_ids.first().map(String::as_str),
            _ => None,
        }
    }

    pub fn approvers_label(&self) -> String {
        if self.approver_names.is_empty() {
            "-".to_string()
        } else {
            self.approver_names.join(", ")
        }
    }
}
