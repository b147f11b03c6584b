mod commands;
mod config;
mod logging;
mod user_store;
mod workflow_store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exitflow_core::Decision;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "exitflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// log level when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Init {
        /// custom data directory (default: ~/.exitflow)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// approver management
    #[command(subcommand)]
    User(UserCommands),

    #[command(subcommand)]
    Workflow(WorkflowCommands),

    /// print the department clearance checklist
    Catalog,
}

#[derive(Subcommand)]
enum UserCommands {
    Create {
        id: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        department: String,

        #[arg(long, default_value = "")]
        role: String,
    },

    List,

    Show { id: String },

    Delete { id: String },
}

#[derive(Subcommand)]
enum WorkflowCommands {
    /// generate a workflow from a JSON/YAML exit request
    Start { file: PathBuf },

    Show { exit_id: String },

    List,

    Approve {
        exit_id: String,

        #[arg(short, long)]
        step: u32,

        #[arg(long = "as")]
        user: String,

        #[arg(short, long, default_value = "")]
        comments: String,
    },

    Reject {
        exit_id: String,

        #[arg(short, long)]
        step: u32,

        #[arg(long = "as")]
        user: String,

        #[arg(short, long)]
        comments: String,
    },

    /// steps waiting on a user
    Inbox {
        #[arg(long = "as")]
        user: String,
    },

    /// mark a clearance checklist item as done
    Clear {
        exit_id: String,

        #[arg(short, long)]
        department: String,

        #[arg(short, long)]
        item: String,

        #[arg(short, long)]
        value: Option<String>,

        #[arg(short, long, default_value = "")]
        comments: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init_logging(level)?;

    match cli.command {
        Commands::Init { data_dir } => {
            commands::init::run(data_dir)?;
        }

        Commands::User(command) => match command {
            UserCommands::Create {
                id,
                name,
                department,
                role,
            } => {
                commands::user::create(&config, &id, &name, &department, &role)?;
            }
            UserCommands::List => {
                commands::user::list(&config)?;
            }
            UserCommands::Show { id } => {
                commands::user::show(&config, &id)?;
            }
            UserCommands::Delete { id } => {
                commands::user::delete(&config, &id)?;
            }
        },

        Commands::Workflow(command) => match command {
            WorkflowCommands::Start { file } => {
                commands::workflow::start(&config, file)?;
            }
            WorkflowCommands::Show { exit_id } => {
                commands::workflow::show(&config, &exit_id)?;
            }
            WorkflowCommands::List => {
                commands::workflow::list(&config)?;
            }
            WorkflowCommands::Approve {
                exit_id,
                step,
                user,
                comments,
            } => {
                commands::workflow::decide(
                    &config,
                    &exit_id,
                    step,
                    &user,
                    Decision::Approve,
                    &comments,
                )?;
            }
            WorkflowCommands::Reject {
                exit_id,
                step,
                user,
                comments,
            } => {
                commands::workflow::decide(
                    &config,
                    &exit_id,
                    step,
                    &user,
                    Decision::Reject,
                    &comments,
                )?;
            }
            WorkflowCommands::Inbox { user } => {
                commands::workflow::inbox(&config, &user)?;
            }
            WorkflowCommands::Clear {
                exit_id,
                department,
                item,
                value,
                comments,
            } => {
                commands::workflow::clear(
                    &config,
                    &exit_id,
                    &department,
                    &item,
                    value.as_deref(),
                    &comments,
                )?;
            }
        },

        Commands::Catalog => {
            commands::catalog::run()?;
        }
    }
    Ok(())
}
