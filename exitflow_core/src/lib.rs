#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]

pub mod core;
pub mod error;
pub mod workflow;

pub use crate::core::{Actor, ExitRequest, FormType, Responsibility};
pub use error::WorkflowError;
pub use workflow::{ApprovalStep, Decision, Engine, OverallStatus, StepStatus, Workflow};
