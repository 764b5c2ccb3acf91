//! YAML configuration file support.
//!
//! Lets a deployment define the classification rule tables in a single
//! YAML file and load them at startup. The keyword lists are tunable
//! operational data (the scoring algorithm is the contract, the tables
//! are not), so they live in configuration rather than in code.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "eu-support-desk"
//!
//! rules:
//!   categories:
//!     - category: billing_question
//!       keywords: ["invoice", "refund", "overcharged"]
//!       boosts:
//!         high: 1
//!     - category: bug_report
//!       keywords: ["bug", "broken"]
//!   priorities:
//!     - priority: low
//!       triggers: ["no rush"]
//!     - priority: urgent
//!       triggers: ["urgent", "outage"]
//! ```
//!
//! Omitting `rules` entirely yields the reference tables.

use std::fs;
use std::path::Path;

use classify::{RuleError, RuleSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid rule tables: {0}")]
    Rules(#[from] RuleError),
}

/// Top-level YAML configuration for the triage pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Classification rule tables; defaults to the reference tables.
    #[serde(default)]
    pub rules: RuleSet,
}

impl TriageConfig {
    /// Loads and validates a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parses and validates YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TriageConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration: version gate plus rule-table checks.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            other => return Err(ConfigLoadError::UnsupportedVersion(other.to_string())),
        }
        self.rules.validate()?;
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            rules: RuleSet::default(),
        }
    }
}
