use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;

pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    println!("Initialising exitflow...\n");

    let mut config = Config::load_or_default()?;

    if let Some(custom_path) = data_dir {
        config.data_dir = custom_path;
    }

    create_directory_structure(&config)?;

    config.save()?;
    println!("Config written to: {}", Config::config_file()?.display());
    println!("Register approvers with: exitflow user create <id> --name <name> --department <dept> --role <role>");
    println!("Initialisation complete!");

    Ok(())
}

fn create_directory_structure(config: &Config) -> Result<()> {
    println!("Setting up directory...");

    let workflows_dir = config.workflows_dir();
    let users_dir = config.users_dir();

    std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;

    std::fs::create_dir_all(&users_dir).context("Failed to create users directory")?;

    std::fs::create_dir_all(&workflows_dir).context("Failed to create workflows directory")?;

    println!("Created: {}", config.data_dir.display());
    println!("Created: {}", users_dir.display());
    println!("Created: {}", workflows_dir.display());

    Ok(())
}
