//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_npm(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    if config.git.branch.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.branch".to_string(),
            message: "branch cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_npm(config: &Config) -> Result<()> {
    if config.npm.program.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "npm.program".to_string(),
            message: "program cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(registry) = &config.npm.registry {
        if !registry.starts_with("http://") && !registry.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "npm.registry".to_string(),
                message: "must be an http(s) URL".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
