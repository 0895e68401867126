//! Configuration loading.
//!
//! Settings come from `tabtint.toml`, searched in the working directory and
//! then the user config directory. Everything has a default; the file and
//! all of its keys are optional.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "tabtint.toml";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the bundled resource holding the theme rules.
    pub rules_resource: String,
    /// Contrast delta for the derived field border. Negative darkens.
    pub border_delta: i32,
    /// Default `tracing` filter directive when `TABTINT_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_resource: "urls.json".to_string(),
            border_delta: -10,
            log_filter: "info".to_string(),
        }
    }
}

/// Raw file shape before defaults are applied.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    rules_resource: Option<String>,
    border_delta: Option<i32>,
    log_filter: Option<String>,
}

/// Load configuration from disk.
///
/// `path_override` is an explicit config file path (from the --config
/// flag); it must exist. Without it, a missing config file just means
/// defaults.
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(path_override, |path| std::fs::read_to_string(path), config_root_dir)
}

fn config_root_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabtint"))
}

pub(crate) fn load_config_from_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let text = match path_override {
        Some(path) => Some(read_file(Path::new(path))?),
        None => {
            let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
            if let Some(root) = config_root() {
                candidates.push(root.join(CONFIG_FILE));
            }
            let mut found = None;
            for candidate in candidates {
                match read_file(&candidate) {
                    Ok(text) => {
                        found = Some(text);
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            found
        }
    };

    let parsed: FileConfig = match text {
        Some(text) => toml::from_str(&text)?,
        None => FileConfig::default(),
    };
    resolve(parsed)
}

fn resolve(file: FileConfig) -> Result<Config, ConfigError> {
    let defaults = Config::default();
    let config = Config {
        rules_resource: file.rules_resource.unwrap_or(defaults.rules_resource),
        border_delta: file.border_delta.unwrap_or(defaults.border_delta),
        log_filter: file.log_filter.unwrap_or(defaults.log_filter),
    };
    if config.rules_resource.is_empty() {
        return Err(ConfigError::Invalid(
            "rules_resource must not be empty".to_string(),
        ));
    }
    Ok(config)
}
