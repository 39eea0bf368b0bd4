use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "LIFEOS_LOG";

fn filter(default_filter: &str) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|_| ConfigError::LogFilter(default_filter.to_string())),
    }
}

/// Send tracing output to `path`. The terminal belongs to the UI.
pub fn init(path: &Path, default_filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_filter_is_rejected() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        assert!(matches!(filter("lifeos=loudest"), Err(ConfigError::LogFilter(_))));
        assert!(filter("lifeos=debug").is_ok());
    }
}
