//! Validator File Loading
//!
//! Loads a declarative validator file from disk and turns it into the
//! validated runtime model. The file format is picked by extension (YAML is
//! the native format; JSON and TOML are also accepted) and the raw document
//! is validated structurally before any command runs: a check declaring both
//! expectation kinds or an uncompilable pattern fails the whole load, fast
//! and with the offending check named.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Check, Expectation, Step, ValidationConfig, DEFAULT_TIMEOUT_SECS};

/// Structural validation errors for a parsed validator file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("check '{check}' declares both expected_output and expected_pattern")]
    ConflictingExpectations { check: String },

    #[error("check '{check}' has an invalid expected_pattern: {reason}")]
    InvalidPattern { check: String, reason: String },
}

/// Raw validator document, as serialized on disk
#[derive(Debug, Deserialize)]
struct RawDocument {
    step_validator: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    step: u32,
    title: String,
    validations: Vec<RawCheck>,
}

#[derive(Debug, Deserialize)]
struct RawCheck {
    name: String,
    command: String,
    timeout: Option<u64>,
    expected_output: Option<String>,
    expected_pattern: Option<String>,
    success_message: String,
    failure_message: String,
}

/// Validator file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a validator file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse as its
    /// format, or fails structural validation. No partial configuration is
    /// ever returned.
    pub fn load(path: &Path) -> Result<ValidationConfig> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let raw = Self::parse(path, &contents)?;
        let config = Self::validate(raw)?;

        info!(
            "Loaded {} steps ({} checks) from {}",
            config.steps.len(),
            config.check_count(),
            path.display()
        );
        Ok(config)
    }

    /// Parse file contents according to the file extension
    fn parse(path: &Path, contents: &str) -> Result<RawDocument> {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => "JSON",
            Some("toml") => "TOML",
            // YAML is the native format; anything else falls back to it
            _ => "YAML",
        };
        debug!("Parsing {} as {}", path.display(), format);

        let parse_error = |reason: String| Error::ConfigParseFailed {
            path: path.to_path_buf(),
            format: format.to_string(),
            reason,
        };

        match format {
            "JSON" => serde_json::from_str(contents).map_err(|e| parse_error(e.to_string())),
            "TOML" => toml::from_str(contents).map_err(|e| parse_error(e.to_string())),
            _ => serde_yaml::from_str(contents).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Turn the raw document into the runtime model, rejecting invalid checks
    fn validate(raw: RawDocument) -> Result<ValidationConfig> {
        let mut steps = Vec::with_capacity(raw.step_validator.len());

        for raw_step in raw.step_validator {
            let mut checks = Vec::with_capacity(raw_step.validations.len());
            for raw_check in raw_step.validations {
                checks.push(Self::validate_check(raw_check)?);
            }
            steps.push(Step {
                ordinal: raw_step.step,
                title: raw_step.title,
                checks,
            });
        }

        Ok(ValidationConfig { steps })
    }

    fn validate_check(raw: RawCheck) -> Result<Check> {
        let expectation = match (raw.expected_output, raw.expected_pattern) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingExpectations { check: raw.name }.into());
            }
            (Some(literal), None) => Expectation::Literal(literal),
            (None, Some(pattern)) => {
                let compiled = Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
                    check: raw.name.clone(),
                    reason: e.to_string(),
                })?;
                Expectation::Pattern(compiled)
            }
            // A check with neither field loads fine and fails unconditionally
            // at evaluation time.
            (None, None) => Expectation::None,
        };

        Ok(Check {
            name: raw.name,
            command: raw.command,
            timeout: raw.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
            expectation,
            success_message: raw.success_message,
            failure_message: raw.failure_message,
        })
    }
}
