use serde::{Deserialize, Serialize};

/// The person trying to act on a workflow step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
}

impl Actor {
    pub fn new(id: &str, name: &str, department: &str, role: &str) -> Self {
        Actor {
            id: id.to_owned(),
            name: name.to_owned(),
            department: department.to_owned(),
            role: role.to_owned(),
        }
    }

    /// Case-insensitive substring match on the role string.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.to_lowercase().contains(&role.to_lowercase())
    }

    /// Name used when stamping decisions, falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
