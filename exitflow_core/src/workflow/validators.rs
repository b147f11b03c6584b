use crate::core::user::Actor;

use super::factory::department_key;
use super::step::{ApprovalStep, ApproverType};

/// Roles that may clear any department step.
const DEPARTMENT_OVERRIDE_ROLES: [&str; 2] = ["admin", "hod"];

#[derive(Debug, Clone)]
pub enum Validator {
    /// Actor id listed on the step.
    IsApprover,
    /// Actor belongs to the step's department, or holds an override role.
    InDepartment,
}

impl Validator {
    pub fn for_step(step: &ApprovalStep) -> Vec<Validator> {
        match step.approver_type {
            ApproverType::Department => vec![Validator::IsApprover, Validator::InDepartment],
            _ => vec![Validator::IsApprover],
        }
    }

    pub fn validate(&self, step: &ApprovalStep, actor: &Actor) -> bool {
        match self {
            Validator::IsApprover => step.approver_ids.iter().any(|id| *id == actor.id),
            Validator::InDepartment => {
                let Some(key) = step.department_key().map(department_key) else {
                    return false;
                };
                if key.is_empty() {
                    return false;
                }

                // case-insensitive substring test on letters only: the
                // actor's department is keyed exactly like the step's, so
                // "I.T." and "Facility Management/Transport" both match
                department_key(&actor.department).contains(&key)
                    || DEPARTMENT_OVERRIDE_ROLES
                        .iter()
                        .any(|role| actor.has_role(role))
            }
        }
    }
}

/// Whether `actor` may approve or reject `step`.
///
/// Steps without any approver are never actionable.
pub fn can_act(step: &ApprovalStep, actor: &Actor) -> bool {
    if step.is_unresolved() {
        return false;
    }

    Validator::for_step(step)
        .iter()
        .any(|validator| validator.validate(step, actor))
}
