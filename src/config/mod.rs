mod schema;
mod validation;

pub use schema::Config;
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scaling::DatasetRegistry;

/// Get the config directory path (~/.config/gd-calc/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("gd-calc"))
}

/// Get the default config file path (~/.config/gd-calc/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/gd-calc/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No config file found, using built-in defaults");
                return Ok(Config::default());
            }
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config = parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    log::debug!(
        "Loaded config from {} ({} extra datasets)",
        config_path.display(),
        config.datasets.len()
    );
    Ok(config)
}

pub fn parse_config(yaml: &str) -> Result<Config> {
    // An empty file is a valid, empty config
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}

/// Build the dataset registry: built-in datasets first, then the ones
/// declared in `config`, with the configured default selected.
pub fn build_registry(config: &Config) -> Result<DatasetRegistry> {
    let mut datasets: Vec<_> = DatasetRegistry::builtin().iter().cloned().collect();

    for dataset in &config.datasets {
        for (subject, table) in &dataset.tables {
            let duplicates = table.duplicate_raw_scores();
            if !duplicates.is_empty() {
                log::warn!(
                    "Dataset '{}' lists raw scores {:?} more than once for {}; the first entry wins",
                    dataset.key,
                    duplicates,
                    subject
                );
            }
        }
        datasets.push(dataset.clone());
    }

    let registry = DatasetRegistry::new(datasets)?;
    match config.default_dataset {
        Some(ref key) => Ok(registry.with_default(key)?),
        None => Ok(registry),
    }
}
