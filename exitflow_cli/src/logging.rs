use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter for our own crates at `level`, used when RUST_LOG is not set.
fn default_filter(level: &str) -> String {
    format!("exitflow_core={level},exitflow_cli={level}")
}

pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(level)))
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "exitflow_core=debug,exitflow_cli=debug");
    }
}
