use crate::core::request::ExitRequest;
use crate::core::user::Actor;
use crate::error::WorkflowError;

use super::definition::Workflow;
use super::step::ApprovalStep;
use super::transition::{Decision, Transition};
use super::validators::can_act;

use std::collections::HashMap;

use serde_json::Value;
use tracing::{info, warn};

/// Holds workflows keyed by exit id and applies decisions to them.
///
/// Callers own exclusive access per exit id; the engine takes `&mut self` for
/// every mutation.
pub struct Engine {
    pub workflows: HashMap<String, Workflow>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            workflows: HashMap::new(),
        }
    }

    pub fn start_workflow(&mut self, request: &ExitRequest) -> Result<&Workflow, WorkflowError> {
        if self.workflows.contains_key(&request.exit_id) {
            return Err(WorkflowError::Definition(format!(
                "Workflow for exit '{}' already exists",
                request.exit_id
            )));
        }

        let workflow = Workflow::start(request)?;
        Ok(self
            .workflows
            .entry(workflow.exit_id.clone())
            .or_insert(workflow))
    }

    /// Registers a previously persisted workflow document.
    pub fn load_workflow_from_json(
        &mut self,
        workflow_json: Value,
    ) -> Result<Workflow, WorkflowError> {
        let mut workflow: Workflow = serde_json::from_value(workflow_json)
            .map_err(|e| WorkflowError::Parsing(format!("Failed to parse workflow: {}", e)))?;

        if workflow.exit_id.trim().is_empty() {
            return Err(WorkflowError::Definition(
                "Workflow must reference an exit request".to_string(),
            ));
        }

        // the stored pointer is derived state; trust the steps, not the document
        workflow.steps.sort_by_key(|step| step.order);
        workflow.refresh_current();

        self.workflows
            .insert(workflow.exit_id.clone(), workflow.clone());

        Ok(workflow)
    }

    pub fn get_workflow(&self, exit_id: &str) -> Result<&Workflow, WorkflowError> {
        self.workflows
            .get(exit_id)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(exit_id.to_owned()))
    }

    pub fn current_step(&self, exit_id: &str) -> Result<Option<&ApprovalStep>, WorkflowError> {
        Ok(self.get_workflow(exit_id)?.current_step())
    }

    /// Checks the actor against the step, then applies the decision.
    ///
    /// Any refusal leaves the workflow untouched.
    pub fn act(
        &mut self,
        exit_id: &str,
        step_id: u32,
        actor: &Actor,
        decision: Decision,
        comments: &str,
    ) -> Result<Transition, WorkflowError> {
        let workflow = self
            .workflows
            .get_mut(exit_id)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(exit_id.to_owned()))?;

        let result = act(workflow, step_id, actor, decision, comments);

        match &result {
            Ok(transition) => info!(
                exit_id,
                step_id,
                actor = %actor.id,
                decision = ?decision,
                overall_status = %transition.overall_status,
                "Decision applied"
            ),
            Err(e) => warn!(
                exit_id,
                step_id,
                actor = %actor.id,
                decision = ?decision,
                error = %e,
                "Decision refused"
            ),
        }

        result
    }

    /// Current steps across all workflows that `actor` may act on.
    pub fn inbox(&self, actor: &Actor) -> Vec<(&str, &ApprovalStep)> {
        let mut pending: Vec<(&str, &ApprovalStep)> = self
            .workflows
            .values()
            .filter_map(|workflow| {
                workflow
                    .current_step()
                    .filter(|step| can_act(step, actor))
                    .map(|step| (workflow.exit_id.as_str(), step))
            })
            .collect();

        pending.sort_by(|a, b| a.0.cmp(b.0));
        pending
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Authorizes `actor` on the step and applies the decision to `workflow`.
pub fn act(
    workflow: &mut Workflow,
    step_id: u32,
    actor: &Actor,
    decision: Decision,
    comments: &str,
) -> Result<Transition, WorkflowError> {
    workflow.ensure_actionable(step_id)?;

    let step = workflow
        .step(step_id)
        .ok_or(WorkflowError::UnknownStep { step_id })?;

    if step.is_unresolved() {
        return Err(WorkflowError::UnresolvedApprover { step_id });
    }

    if !can_act(step, actor) {
        return Err(WorkflowError::Unauthorized {
            actor_id: actor.id.clone(),
            step_id,
        });
    }

    match decision {
        Decision::Approve => workflow.approve(step_id, actor.display_name(), comments),
        Decision::Reject => {
            if comments.trim().is_empty() {
                return Err(WorkflowError::MissingRationale { step_id });
            }
            workflow.reject(step_id, actor.display_name(), comments)
        }
    }
}
