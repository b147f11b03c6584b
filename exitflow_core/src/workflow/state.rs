use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending Approval",
            StepStatus::Approved => "Approved",
            StepStatus::Rejected => "Rejected",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form, the long label is for display screens
        let text = match self {
            StepStatus::Pending => "Pending",
            StepStatus::Approved => "Approved",
            StepStatus::Rejected => "Rejected",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    #[default]
    Pending,
    InProgress,
    Approved,
    Rejected,
}

impl OverallStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Pending => "Pending Approval",
            OverallStatus::InProgress => "In Progress",
            OverallStatus::Approved => "Approved",
            OverallStatus::Rejected => "Rejected",
        }
    }

    /// Approved and rejected workflows accept no further decisions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OverallStatus::Approved | OverallStatus::Rejected)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display text for a raw status value as stored by callers.
pub fn status_text(raw: &str) -> &'static str {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PENDING" => "Pending Approval",
        "APPROVED" => "Approved",
        "REJECTED" => "Rejected",
        "IN_PROGRESS" => "In Progress",
        _ => "Unknown",
    }
}
