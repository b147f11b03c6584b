use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which exit form the employee submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    #[serde(rename = "E")]
    Emergency,
    #[serde(rename = "P")]
    PlannedLeave,
    #[serde(rename = "R")]
    Resignation,
}

impl FormType {
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Emergency => "Emergency Exit",
            FormType::PlannedLeave => "Planned Leave",
            FormType::Resignation => "Resignation",
        }
    }
}

/// A piece of work handed over to a colleague on an emergency exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Responsibility {
    pub project: String,
    pub activity: String,
    pub responsible_person_id: String,
    pub responsible_person_name: String,
}

/// A submitted exit, leave or resignation request.
///
/// Owned by the submission side; the engine only reads it when a workflow is
/// generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitRequest {
    pub exit_id: String,
    pub employee_id: String,
    pub employee_name: String,
    #[serde(default)]
    pub email_id: String,
    pub form_type: FormType,
    #[serde(default)]
    pub department: String,

    #[serde(default)]
    pub date_of_leaving: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_return: Option<NaiveDate>,
    #[serde(default)]
    pub reason: String,

    /// Handover list, used by emergency exits.
    #[serde(default)]
    pub responsibilities: Vec<Responsibility>,
    /// Single handover person, used by planned leave and resignation.
    #[serde(default)]
    pub responsibilities_handed_over_to: Option<String>,
    #[serde(default)]
    pub responsibilities_handed_over_to_id: Option<String>,

    #[serde(default)]
    pub dep_hod: Option<String>,
    #[serde(default)]
    pub hod_name: Option<String>,
    #[serde(default)]
    pub project_site_incharge: Option<String>,
    #[serde(default)]
    pub project_site_incharge_name: Option<String>,

    #[serde(default)]
    pub declarations: Vec<String>,
}

impl ExitRequest {
    pub fn new(exit_id: &str, employee_id: &str, employee_name: &str, form_type: FormType) -> Self {
        Self {
            exit_id: exit_id.to_owned(),
            employee_id: employee_id.to_owned(),
            employee_name: employee_name.to_owned(),
            email_id: String::new(),
            form_type,
            department: String::new(),
            date_of_leaving: None,
            date_of_return: None,
            reason: String::new(),
            responsibilities: Vec::new(),
            responsibilities_handed_over_to: None,
            responsibilities_handed_over_to_id: None,
            dep_hod: None,
            hod_name: None,
            project_site_incharge: None,
            project_site_incharge_name: None,
            declarations: Vec::new(),
        }
    }

    /// Copy of the request with every approver identifier normalized.
    ///
    /// Callers apply this where requests enter the system; the engine itself
    /// compares identifiers exactly.
    pub fn normalized(&self) -> Self {
        let mut request = self.clone();
        request.exit_id = self.exit_id.trim().to_owned();
        request.employee_id = normalize_identifier(&self.employee_id);

        for item in &mut request.responsibilities {
            item.responsible_person_id = normalize_identifier(&item.responsible_person_id);
        }

        // a bare name stands in as the approver id, so it is keyed like one;
        // the name itself stays as entered for display
        request.responsibilities_handed_over_to_id = approver_id(
            self.responsibilities_handed_over_to_id.as_deref(),
            self.responsibilities_handed_over_to.as_deref(),
        );
        request.dep_hod = approver_id(self.dep_hod.as_deref(), self.hod_name.as_deref());
        request.project_site_incharge = self
            .project_site_incharge
            .as_deref()
            .map(normalize_identifier);

        request
    }
}

pub fn normalize_identifier(id: &str) -> String {
    id.trim().to_lowercase()
}

fn approver_id(id: Option<&str>, name: Option<&str>) -> Option<String> {
    non_blank(id).or(non_blank(name)).map(normalize_identifier)
}

/// Treat missing and blank values the same way.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_from_portal_payload() {
        let payload = json!({
            "exitId": "EX-100",
            "employeeId": "E042",
            "employeeName": "Asha Rao",
            "formType": "E",
            "dateOfLeaving": "2026-03-01",
            "responsibilities": [
                {"project": "Depot", "activity": "Shift rota", "responsiblePersonId": "E7", "responsiblePersonName": "Kim"}
            ],
            "depHod": "H1"
        });

        let request: ExitRequest = serde_json::from_value(payload).unwrap();

        assert_eq!(request.form_type, FormType::Emergency);
        assert_eq!(request.responsibilities.len(), 1);
        assert_eq!(request.responsibilities[0].responsible_person_id, "E7");
        assert_eq!(request.dep_hod.as_deref(), Some("H1"));
        assert_eq!(
            request.date_of_leaving,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert!(request.project_site_incharge.is_none());
    }

    #[test]
    fn test_unknown_form_type_is_rejected() {
        let payload = json!({
            "exitId": "EX-1",
            "employeeId": "E1",
            "employeeName": "X",
            "formType": "Z"
        });

        assert!(serde_json::from_value::<ExitRequest>(payload).is_err());
    }

    #[test]
    fn test_normalized_identifiers() {
        let mut request = ExitRequest::new(" EX-2 ", "E1", "Someone", FormType::PlannedLeave);
        request.dep_hod = Some("  HOD-9 ".to_string());
        request.project_site_incharge = Some("Pm1".to_string());
        request.responsibilities_handed_over_to_id = Some(" E5".to_string());

        let normalized = request.normalized();

        assert_eq!(normalized.exit_id, "EX-2");
        assert_eq!(normalized.dep_hod.as_deref(), Some("hod-9"));
        assert_eq!(normalized.project_site_incharge.as_deref(), Some("pm1"));
        assert_eq!(
            normalized.responsibilities_handed_over_to_id.as_deref(),
            Some("e5")
        );
        // display names are left alone
        assert_eq!(normalized.employee_name, "Someone");
    }

    #[test]
    fn test_normalized_name_fallbacks() {
        let mut request = ExitRequest::new("EX-3", "E1", "Someone", FormType::Resignation);
        request.hod_name = Some("Hema".to_string());
        request.responsibilities_handed_over_to = Some(" Nia ".to_string());
        request.responsibilities_handed_over_to_id = Some("  ".to_string());

        let normalized = request.normalized();

        assert_eq!(normalized.dep_hod.as_deref(), Some("hema"));
        assert_eq!(
            normalized.responsibilities_handed_over_to_id.as_deref(),
            Some("nia")
        );
        assert_eq!(normalized.hod_name.as_deref(), Some("Hema"));
        assert_eq!(
            normalized.responsibilities_handed_over_to.as_deref(),
            Some(" Nia ")
        );
    }

    #[test]
    fn test_normalized_keeps_missing_ids_missing() {
        let request = ExitRequest::new("EX-4", "E1", "Someone", FormType::Resignation);

        let normalized = request.normalized();

        assert!(normalized.dep_hod.is_none());
        assert!(normalized.responsibilities_handed_over_to_id.is_none());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" a ")), Some("a"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
