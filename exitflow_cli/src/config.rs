use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const HOME_ENV: &str = "EXITFLOW_HOME";

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Get (~/.exitflow), or $EXITFLOW_HOME when set
    pub fn exitflow_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".exitflow"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::exitflow_dir()?.join("config.json"))
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.data_dir.join("workflows")
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_file()?;

        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Config {
                data_dir: Self::exitflow_dir()?,
                log_level: default_log_level(),
            })
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_when_missing() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "/tmp/exitflow"}"#)
            .unwrap_or_else(|e| panic!("config should parse: {e}"));

        assert_eq!(config.log_level, "info");
        assert_eq!(config.workflows_dir(), PathBuf::from("/tmp/exitflow/workflows"));
        assert_eq!(config.users_dir(), PathBuf::from("/tmp/exitflow/users"));
    }
}
