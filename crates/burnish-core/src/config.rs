//! Linter configuration
//!
//! Callers can disable individual rule ids and override severities. The
//! configuration is applied to the registry once at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;
use crate::error::BurnishError;
use crate::result::Result;

/// Configuration for a specific rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Override the default severity
    #[serde(default)]
    pub severity: Option<Severity>,
}

fn default_enabled() -> bool {
    true
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Top-level linter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Rule-specific configuration overrides, keyed by rule id
    #[serde(default)]
    rules: HashMap<String, RuleConfig>,
}

impl LintConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| BurnishError::config_error(format!("invalid configuration: {e}")))
    }

    /// Iterate over configured rules
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.rules.iter().map(|(id, cfg)| (id.as_str(), cfg))
    }

    /// Disable a rule id
    pub fn disable_rule(&mut self, id: impl Into<String>) -> &mut Self {
        self.rules.entry(id.into()).or_default().enabled = false;
        self
    }

    /// Override a rule's severity
    pub fn set_severity(&mut self, id: impl Into<String>, severity: Severity) -> &mut Self {
        self.rules.entry(id.into()).or_default().severity = Some(severity);
        self
    }
}
