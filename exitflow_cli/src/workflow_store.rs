use anyhow::{Context, Result, bail};
use exitflow_core::{Workflow, workflow::Engine};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Workflow documents on disk, one JSON file per exit id.
pub struct WorkflowStore {
    dir: PathBuf,
}

impl WorkflowStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn open(config: &Config) -> Self {
        Self::new(config.workflows_dir())
    }

    fn workflow_file(&self, exit_id: &str) -> Result<PathBuf> {
        let exit_id = exit_id.trim();
        if exit_id.is_empty() || exit_id.contains(['/', '\\']) || exit_id.contains("..") {
            bail!("Invalid exit id '{}'", exit_id);
        }
        Ok(self.dir.join(format!("{}.json", exit_id)))
    }

    /// Loads every stored workflow into a fresh engine.
    pub fn load_engine(&self) -> Result<Engine> {
        let mut engine = Engine::new();

        if !self.dir.exists() {
            return Ok(engine);
        }

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let value = read_json(&path)?;
                engine
                    .load_workflow_from_json(value)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
            }
        }

        Ok(engine)
    }

    pub fn load(&self, exit_id: &str) -> Result<Workflow> {
        let path = self.workflow_file(exit_id)?;

        if !path.exists() {
            bail!("No workflow found for exit '{}'", exit_id.trim());
        }

        let mut engine = Engine::new();
        let workflow = engine
            .load_workflow_from_json(read_json(&path)?)
            .context("Failed to load workflow")?;

        Ok(workflow)
    }

    pub fn save(&self, workflow: &Workflow) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).context("Failed to create workflows directory")?;

        let path = self.workflow_file(&workflow.exit_id)?;
        let json_str =
            serde_json::to_string_pretty(workflow).context("Failed to serialize workflow")?;

        std::fs::write(&path, json_str).context("Failed to write workflow file")?;

        Ok(path)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).context("Failed to read workflow file")?;
    serde_json::from_str(&content).context("Failed to parse workflow JSON")
}
