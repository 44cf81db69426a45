//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiConfig;
use crate::domain::errors::PiiError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `${VAR_NAME}` placeholder, compiled once
static PLACEHOLDER: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}"));

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PiiConfig
/// 4. Applies environment variable overrides (PII_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PiiError::Configuration`] if the file cannot be read, a
/// referenced environment variable is missing, parsing fails or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use pii::config::loader::load_config;
///
/// let config = load_config("pii.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(PiiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        PiiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<PiiConfig> {
    // Perform environment variable substitution
    let contents = substitute_env_vars(contents)?;

    // Parse TOML
    let mut config: PiiConfig = toml::from_str(&contents)?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config)?;

    // Validate configuration
    config.validate().map_err(|e| {
        PiiError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes `${VAR_NAME}` placeholders from the environment
///
/// Comment lines are copied as is. Every missing variable is reported, not
/// just the first one.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = PLACEHOLDER
        .as_ref()
        .map_err(|e| PiiError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing: Vec<String> = Vec::new();

    let substituted: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            re.replace_all(line, |caps: &Captures<'_>| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    String::new()
                })
            })
            .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(PiiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut result = substituted.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using PII_* prefix
///
/// Environment variables follow the pattern: PII_<SECTION>_<KEY>
/// For example: PII_APPLICATION_LOG_LEVEL, PII_ANONYMIZATION_STRATEGY
fn apply_env_overrides(config: &mut PiiConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PII_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| PiiError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("PII_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PII_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PII_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
