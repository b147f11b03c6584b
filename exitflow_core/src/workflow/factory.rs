use tracing::debug;

use crate::core::request::{ExitRequest, FormType, non_blank};

use super::step::{ApprovalStep, ApproverType};

/// Departments that clear every exit, in approval order.
pub const CLEARANCE_DEPARTMENTS: [&str; 4] = ["IT", "Finance", "Facility Management/Transport", "HR"];

/// Key of the final administrative step.
pub const ADMIN_KEY: &str = "admin";

/// Lower-cased department name with everything but letters removed.
pub fn department_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Builds the ordered approval steps for a request.
///
/// Ids and order share one running counter so a single call always yields a
/// contiguous sequence.
pub struct StepFactory {
    next: u32,
    steps: Vec<ApprovalStep>,
}

impl StepFactory {
    pub fn generate(request: &ExitRequest, start_order: u32) -> Vec<ApprovalStep> {
        let mut factory = StepFactory {
            next: start_order,
            steps: Vec::new(),
        };

        match request.form_type {
            FormType::Emergency => factory.emergency_steps(request),
            FormType::PlannedLeave | FormType::Resignation => factory.handover_steps(request),
        }
        factory.clearance_steps();

        debug!(
            exit_id = %request.exit_id,
            form_type = request.form_type.label(),
            steps = factory.steps.len(),
            "Generated approval steps"
        );

        factory.steps
    }

    fn push(
        &mut self,
        name: &str,
        approver_type: ApproverType,
        ids: Vec<String>,
        names: Vec<String>,
    ) {
        self.steps
            .push(ApprovalStep::new(self.next, name, approver_type, ids, names));
        self.next += 1;
    }

    fn emergency_steps(&mut self, request: &ExitRequest) {
        // one step shared by every handover contact, any of them may approve
        if !request.responsibilities.is_empty() {
            let ids = request
                .responsibilities
                .iter()
                .map(|r| r.responsible_person_id.clone())
                .collect();
            let names = request
                .responsibilities
                .iter()
                .map(|r| {
                    if r.responsible_person_name.trim().is_empty() {
                        r.responsible_person_id.clone()
                    } else {
                        r.responsible_person_name.clone()
                    }
                })
                .collect();
            self.push(
                "Responsibility Handover",
                ApproverType::ResponsiblePerson,
                ids,
                names,
            );
        }

        let (ids, names) = hod_approver(request);
        self.push("HOD Approval", ApproverType::Hod, ids, names);
    }

    fn handover_steps(&mut self, request: &ExitRequest) {
        let handover_id = non_blank(request.responsibilities_handed_over_to_id.as_deref());
        let handover_name = non_blank(request.responsibilities_handed_over_to.as_deref());
        if let Some(id) = handover_id.or(handover_name) {
            let name = handover_name.unwrap_or(id);
            self.push(
                "Responsibility Handover",
                ApproverType::ResponsiblePerson,
                vec![id.to_owned()],
                vec![name.to_owned()],
            );
        }

        let manager_id = non_blank(request.project_site_incharge.as_deref());
        if let Some(id) = manager_id {
            let name =
                non_blank(request.project_site_incharge_name.as_deref()).unwrap_or(id);
            self.push(
                "Project Manager Approval",
                ApproverType::ProjectManager,
                vec![id.to_owned()],
                vec![name.to_owned()],
            );
        }

        // the same person never holds two consecutive gates
        let (ids, names) = hod_approver(request);
        let same_as_manager = match (manager_id, ids.first()) {
            (Some(manager), Some(hod)) => manager == hod.as_str(),
            _ => false,
        };
        if !same_as_manager {
            self.push("HOD Approval", ApproverType::Hod, ids, names);
        }
    }

    fn clearance_steps(&mut self) {
        for department in CLEARANCE_DEPARTMENTS {
            self.push(
                &format!("{department} Clearance"),
                ApproverType::Department,
                vec![department_key(department)],
                vec![department.to_owned()],
            );
        }

        self.push(
            "Admin Final Approval",
            ApproverType::Department,
            vec![ADMIN_KEY.to_owned()],
            vec!["Admin".to_owned()],
        );
    }
}

/// HOD id, falling back to the HOD name when no id was recorded.
///
/// Empty when neither is known; the step is still emitted.
fn hod_approver(request: &ExitRequest) -> (Vec<String>, Vec<String>) {
    let id = non_blank(request.dep_hod.as_deref());
    let name = non_blank(request.hod_name.as_deref());

    match id.or(name) {
        Some(approver) => (
            vec![approver.to_owned()],
            vec![name.unwrap_or(approver).to_owned()],
        ),
        None => (Vec::new(), Vec::new()),
    }
}
