//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::CONFIG_FILE_NAMES;
use super::types::Config;
use super::validation::validate_config;

/// Load the configuration that governs `dir`.
///
/// `dir` and then each of its ancestors is checked for one of
/// [`CONFIG_FILE_NAMES`], either directly or under `.github/`; the nearest
/// match wins. Without a file the defaults are returned along with `None`.
/// A file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    let Some(path) = dir.ancestors().find_map(config_file_in) else {
        warn!(dir = %dir.display(), "no config found, using defaults");
        return Ok((Config::default(), None));
    };

    info!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&path, &content)?;
    Ok((config, Some(path)))
}

/// Parse and validate config `content`; `path` decides TOML or YAML
pub fn parse_config(path: &Path, content: &str) -> Result<Config> {
    let config: Config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(content).map_err(ConfigError::TomlError)?,
        _ => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config validated");
    Ok(config)
}

fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .flat_map(|name| [dir.join(name), dir.join(".github").join(name)])
        .find(|candidate| candidate.is_file())
}
