pub mod catalog;
pub mod definition;
pub mod engine;
pub mod factory;
pub mod state;
pub mod step;
pub mod transition;
pub mod validators;

pub use catalog::{DepartmentApproval, DepartmentApprovalItem, ItemType, catalog};
pub use definition::Workflow;
pub use engine::{Engine, act};
pub use factory::{StepFactory, department_key};
pub use state::{OverallStatus, StepStatus, status_text};
pub use step::{ApprovalStep, ApproverType};
pub use transition::{Decision, Transition};
pub use validators::can_act;
