use anyhow::{Context, Result, bail};
use exitflow_core::{Decision, ExitRequest, Workflow, workflow::ApprovalStep};
use serde_json::Value;
use std::path::Path;

use crate::{config::Config, user_store::UserStore, workflow_store::WorkflowStore};

pub fn start<P: AsRef<Path>>(config: &Config, file: P) -> Result<()> {
    let file_path = file.as_ref();

    println!("Loading exit request from: {}", file_path.display());
    let request = read_request(file_path)?.normalized();

    let store = WorkflowStore::open(config);
    let mut engine = store.load_engine()?;
    let workflow = engine
        .start_workflow(&request)
        .context("Could not start workflow")?;

    let path = store.save(workflow)?;

    println!("Workflow started for {} ({})", request.employee_name, request.form_type.label());
    print_workflow(workflow);

    let unresolved = workflow.unresolved_steps();
    if !unresolved.is_empty() {
        println!();
        for step in unresolved {
            println!(
                "WARNING: step {} ({}) has no eligible approver, correct the request data",
                step.step_id, step.step_name
            );
        }
    }

    println!("\nWorkflow saved to: {}", path.display());
    Ok(())
}

pub fn show(config: &Config, exit_id: &str) -> Result<()> {
    let workflow = WorkflowStore::open(config).load(exit_id)?;
    print_workflow(&workflow);
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let engine = WorkflowStore::open(config).load_engine()?;

    if engine.workflows.is_empty() {
        println!("No workflows found.");
        println!("Start one with: exitflow workflow start <request file>");
        return Ok(());
    }

    let mut workflows: Vec<&Workflow> = engine.workflows.values().collect();
    workflows.sort_by(|a, b| a.exit_id.cmp(&b.exit_id));

    println!("Workflows ({}):\n", workflows.len());
    for workflow in workflows {
        println!(
            "{:<16} {:<18} {}",
            workflow.exit_id,
            workflow.status_text(),
            workflow.progress_text()
        );
    }

    Ok(())
}

pub fn decide(
    config: &Config,
    exit_id: &str,
    step_id: u32,
    user_id: &str,
    decision: Decision,
    comments: &str,
) -> Result<()> {
    let actor = UserStore::open(config).load_user(user_id)?;
    let store = WorkflowStore::open(config);
    let mut engine = store.load_engine()?;
    let exit_id = exit_id.trim();

    let transition = engine
        .act(exit_id, step_id, &actor, decision, comments)
        .with_context(|| format!("Could not record decision on step {}", step_id))?;

    let workflow = engine.get_workflow(exit_id)?;
    store.save(workflow)?;

    println!(
        "Step {} {} by {}",
        transition.step_id,
        transition.to_state.label(),
        transition.decided_by
    );
    println!("Workflow is now: {}", transition.overall_status);
    println!("Progress: {}", workflow.progress_text());

    Ok(())
}

pub fn inbox(config: &Config, user_id: &str) -> Result<()> {
    let actor = UserStore::open(config).load_user(user_id)?;
    let engine = WorkflowStore::open(config).load_engine()?;

    let pending = engine.inbox(&actor);
    if pending.is_empty() {
        println!("Nothing waiting for {}.", actor.id);
        return Ok(());
    }

    println!("Waiting for {} ({}):\n", actor.id, pending.len());
    for (exit_id, step) in pending {
        println!("{:<16} step {:<3} {}", exit_id, step.step_id, step.step_name);
    }

    Ok(())
}

pub fn clear(
    config: &Config,
    exit_id: &str,
    department: &str,
    item: &str,
    value: Option<&str>,
    comments: &str,
) -> Result<()> {
    let store = WorkflowStore::open(config);
    let mut workflow = store.load(exit_id)?;

    let department = workflow.department_mut(department)?;
    department.clear_item(item, value.map(parse_value), comments)?;

    println!(
        "{}: {} of {} items cleared ({})",
        department.department_name,
        department.cleared_count(),
        department.items.len(),
        department.status.label()
    );

    store.save(&workflow)?;
    Ok(())
}

/// Reads an exit request from a JSON or YAML file.
pub fn read_request(file_path: &Path) -> Result<ExitRequest> {
    if !file_path.exists() {
        bail!("Request file not found: {}", file_path.display());
    }

    let content = std::fs::read_to_string(file_path).context("Failed to read request file")?;

    let request_json: Value = match file_path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).context("Failed to parse JSON request")?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).context("Failed to parse YAML request")?
        }
        _ => {
            bail!("Unsupported file format. Use .json, .yaml, or .yml");
        }
    };

    serde_json::from_value(request_json).context("Request file is not a valid exit request")
}

/// Numbers and booleans typed on the command line keep their JSON type.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn print_workflow(workflow: &Workflow) {
    println!("Exit:        {}", workflow.exit_id);
    println!("Status:      {}", workflow.status_text());
    println!("Progress:    {}", workflow.progress_text());
    println!("Submitted:   {}", workflow.submitted_date.format("%Y-%m-%d %H:%M"));
    if let Some(completed) = workflow.completed_date {
        println!("Completed:   {}", completed.format("%Y-%m-%d %H:%M"));
    }
    println!();

    for step in &workflow.steps {
        print_step(step, workflow.current_approval_step == Some(step.step_id));
    }
}

fn print_step(step: &ApprovalStep, is_current: bool) {
    let marker = if is_current { ">" } else { " " };
    println!(
        "{} {:>2}. {:<30} {:<18} {}",
        marker,
        step.step_id,
        step.step_name,
        step.status.label(),
        step.approvers_label()
    );

    if let (Some(by), Some(date)) = (&step.approved_by, step.approved_date) {
        println!(
            "       {} on {}: {}",
            by,
            date.format("%Y-%m-%d %H:%M"),
            step.comments.as_deref().unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use exitflow_core::FormType;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"exitId": "EX-1", "employeeId": "E1", "employeeName": "Asha", "formType": "R", "depHod": "H1"}"#,
        )
        .unwrap();

        let request = read_request(&path).unwrap();

        assert_eq!(request.form_type, FormType::Resignation);
        assert_eq!(request.dep_hod.as_deref(), Some("H1"));
    }

    #[test]
    fn test_read_yaml_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.yaml");
        std::fs::write(
            &path,
            "exitId: EX-2\nemployeeId: E2\nemployeeName: Bo\nformType: E\nresponsibilities:\n  - responsiblePersonId: R1\n    responsiblePersonName: Ravi\n",
        )
        .unwrap();

        let request = read_request(&path).unwrap();

        assert_eq!(request.form_type, FormType::Emergency);
        assert_eq!(request.responsibilities.len(), 1);
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.txt");
        std::fs::write(&path, "exitId: EX-3").unwrap();

        assert!(read_request(&path).is_err());
        assert!(read_request(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1500"), Value::from(1500));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("AT-221"), Value::String("AT-221".to_string()));
    }
}
