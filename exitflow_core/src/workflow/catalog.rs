use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WorkflowError;

use super::factory::department_key;
use super::state::StepStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Checkbox,
    Text,
    Number,
}

impl ItemType {
    fn empty_value(&self) -> Value {
        match self {
            ItemType::Checkbox => Value::Bool(false),
            ItemType::Text => Value::String(String::new()),
            ItemType::Number => Value::from(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentApprovalItem {
    pub item_name: String,
    pub item_type: ItemType,
    pub value: Value,
    pub is_cleared: bool,
    #[serde(default)]
    pub comments: String,
}

/// One department's clearance checklist.
///
/// Tracked next to the approval steps; its status never gates the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentApproval {
    pub department_id: String,
    pub department_name: String,
    pub status: StepStatus,
    pub items: Vec<DepartmentApprovalItem>,
}

impl DepartmentApproval {
    /// The id is the department's step key, so clearance and approval
    /// steps resolve to the same entry.
    fn new(department_name: &str, items: &[(&str, ItemType)]) -> Self {
        Self {
            department_id: department_key(department_name),
            department_name: department_name.to_owned(),
            status: StepStatus::Pending,
            items: items
                .iter()
                .map(|(name, item_type)| DepartmentApprovalItem {
                    item_name: (*name).to_owned(),
                    item_type: *item_type,
                    value: item_type.empty_value(),
                    is_cleared: false,
                    comments: String::new(),
                })
                .collect(),
        }
    }

    /// Records an item's value and marks it cleared.
    pub fn clear_item(
        &mut self,
        item_name: &str,
        value: Option<Value>,
        comments: &str,
    ) -> Result<(), WorkflowError> {
        let department = self.department_id.clone();
        let item = self
            .items
            .iter_mut()
            .find(|item| item.item_name.eq_ignore_ascii_case(item_name.trim()))
            .ok_or_else(|| WorkflowError::UnknownClearanceItem {
                department,
                item: item_name.to_owned(),
            })?;

        item.value = match (item.item_type, value) {
            (_, Some(value)) => value,
            (ItemType::Checkbox, None) => Value::Bool(true),
            (_, None) => item.value.clone(),
        };
        item.is_cleared = true;
        item.comments = comments.to_owned();

        self.refresh_status();
        Ok(())
    }

    /// Approved once every item is cleared. A rejected department stays rejected.
    pub fn refresh_status(&mut self) {
        if self.status == StepStatus::Rejected {
            return;
        }

        self.status = if self.items.iter().all(|item| item.is_cleared) {
            StepStatus::Approved
        } else {
            StepStatus::Pending
        };
    }

    pub fn reject(&mut self, comments: &str) {
        self.status = StepStatus::Rejected;
        for item in self.items.iter_mut().filter(|item| !item.is_cleared) {
            item.comments = comments.to_owned();
        }
    }

    pub fn cleared_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_cleared).count()
    }
}

/// The fixed clearance checklist attached to every workflow.
pub fn catalog() -> Vec<DepartmentApproval> {
    use ItemType::{Checkbox, Number, Text};

    vec![
        DepartmentApproval::new(
            "IT",
            &[
                ("Laptop/Desktop returned", Checkbox),
                ("Asset tag number", Text),
                ("Email account deactivated", Checkbox),
                ("VPN and system access revoked", Checkbox),
                ("Software licenses reclaimed", Checkbox),
            ],
        ),
        DepartmentApproval::new(
            "Finance",
            &[
                ("Outstanding advance amount", Number),
                ("Loan recovery amount", Number),
                ("Expense claims settled", Checkbox),
                ("Final settlement remarks", Text),
            ],
        ),
        DepartmentApproval::new(
            "Facility Management/Transport",
            &[
                ("Transport pass returned", Checkbox),
                ("Locker keys returned", Checkbox),
                ("Parking sticker returned", Checkbox),
            ],
        ),
        DepartmentApproval::new(
            "HR",
            &[
                ("Exit interview conducted", Checkbox),
                ("ID card returned", Checkbox),
                ("Notice period days served", Number),
                ("Relieving letter issued", Checkbox),
            ],
        ),
        DepartmentApproval::new(
            "Admin",
            &[
                ("Stationery returned", Checkbox),
                ("Mobile phone/SIM returned", Checkbox),
                ("Company accommodation vacated", Checkbox),
            ],
        ),
        DepartmentApproval::new(
            "Security",
            &[
                ("Access card deactivated", Checkbox),
                ("Gate pass surrendered", Checkbox),
                ("Biometric access removed", Checkbox),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use serde_json::json;

    fn department(id: &str) -> DepartmentApproval {
        catalog()
            .into_iter()
            .find(|d| d.department_id == id)
            .expect("department in catalog")
    }

    #[test]
    fn test_catalog_shape() {
        let departments = catalog();

        assert_eq!(departments.len(), 6);
        for department in &departments {
            assert!((3..=5).contains(&department.items.len()));
            assert_eq!(department.status, StepStatus::Pending);
            assert!(department.items.iter().all(|item| !item.is_cleared));
        }
    }

    #[test]
    fn test_ids_are_department_keys() {
        let ids: Vec<String> = catalog().into_iter().map(|d| d.department_id).collect();

        assert_eq!(
            ids,
            vec!["it", "finance", "facilitymanagementtransport", "hr", "admin", "security"]
        );
    }

    #[test]
    fn test_catalog_is_fresh_each_call() {
        let mut first = catalog();
        first[0].items[0].is_cleared = true;

        assert_eq!(catalog()[0].cleared_count(), 0);
    }

    #[test]
    fn test_empty_values_follow_item_type() {
        let finance = department("finance");
        assert_eq!(finance.items[0].value, json!(0));
        assert_eq!(finance.items[2].value, json!(false));
        assert_eq!(finance.items[3].value, json!(""));
    }

    #[test]
    fn test_clearing_every_item_approves_department() {
        let mut facility = department("facilitymanagementtransport");

        facility
            .clear_item("transport pass returned", None, "")
            .unwrap();
        facility.clear_item("Locker keys returned", None, "").unwrap();
        assert_eq!(facility.status, StepStatus::Pending);
        assert_eq!(facility.items[0].value, json!(true));

        facility
            .clear_item("Parking sticker returned", None, "handed to desk")
            .unwrap();
        assert_eq!(facility.status, StepStatus::Approved);
        assert_eq!(facility.items[2].comments, "handed to desk");
    }

    #[test]
    fn test_clear_item_records_value() {
        let mut finance = department("finance");
        finance
            .clear_item("Outstanding advance amount", Some(json!(1500)), "recovered")
            .unwrap();

        assert_eq!(finance.items[0].value, json!(1500));
        assert!(finance.items[0].is_cleared);
    }

    #[test]
    fn test_unknown_item() {
        let mut hr = department("hr");
        let err = hr.clear_item("Car keys", None, "").unwrap_err();

        assert!(matches!(err, WorkflowError::UnknownClearanceItem { .. }));
        assert_eq!(hr.cleared_count(), 0);
    }

    #[test]
    fn test_rejected_department_stays_rejected() {
        let mut admin = department("admin");
        admin.reject("SIM not returned");

        admin.clear_item("Stationery returned", None, "").unwrap();
        assert_eq!(admin.status, StepStatus::Rejected);
        assert_eq!(admin.items[1].comments, "SIM not returned");
    }
}
