use anyhow::{Context, Result, bail};
use exitflow_core::core::{Actor, normalize_identifier};
use std::path::PathBuf;

use crate::config::Config;

/// Known approvers, one JSON file per user id.
pub struct UserStore {
    dir: PathBuf,
}

impl UserStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn open(config: &Config) -> Self {
        Self::new(config.users_dir())
    }

    fn user_file(&self, user_id: &str) -> Result<PathBuf> {
        let user_id = normalize_identifier(user_id);
        if user_id.is_empty() || user_id.contains(['/', '\\']) || user_id.contains("..") {
            bail!("Invalid user id '{}'", user_id);
        }
        Ok(self.dir.join(format!("{}.json", user_id)))
    }

    pub fn create_user(&self, id: &str, name: &str, department: &str, role: &str) -> Result<Actor> {
        if self.user_exists(id)? {
            bail!("User '{}' already exists", normalize_identifier(id));
        }

        let actor = Actor::new(&normalize_identifier(id), name.trim(), department.trim(), role.trim());
        self.save_user(&actor)?;
        Ok(actor)
    }

    pub fn save_user(&self, actor: &Actor) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create users directory")?;

        let user_file = self.user_file(&actor.id)?;
        let content = serde_json::to_string_pretty(actor)?;
        std::fs::write(&user_file, content).context("Failed to write user file")?;

        Ok(())
    }

    pub fn load_user(&self, user_id: &str) -> Result<Actor> {
        let user_file = self.user_file(user_id)?;

        if !user_file.exists() {
            bail!(
                "User '{}' not found. Create with: exitflow user create {}",
                user_id,
                user_id
            );
        }

        let content = std::fs::read_to_string(&user_file).context("Failed to read user file")?;

        let actor: Actor = serde_json::from_str(&content).context("Failed to parse user file")?;

        Ok(actor)
    }

    pub fn list_users(&self) -> Result<Vec<Actor>> {
        if !self.dir.exists() {
            return Ok(vec![]);
        }

        let mut users = vec![];
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if let (Some("json"), Some(stem)) = (
                path.extension().and_then(|s| s.to_str()),
                path.file_stem().and_then(|s| s.to_str()),
            ) {
                users.push(self.load_user(stem)?);
            }
        }
        users.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(users)
    }

    pub fn delete_user(&self, user_id: &str) -> Result<()> {
        let user_file = self.user_file(user_id)?;

        if !user_file.exists() {
            bail!("User '{}' not found", user_id);
        }

        std::fs::remove_file(&user_file).context("Failed to delete user file")?;
        Ok(())
    }

    pub fn user_exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.user_file(user_id)?.exists())
    }
}
