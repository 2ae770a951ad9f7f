//! Error types and handling for lint and fix operations

use thiserror::Error;

/// Main error type for burnish operations
#[derive(Debug, Error)]
pub enum BurnishError {
    /// Syntax errors from the reference parser
    #[error("Parse error: {message} at {line}:{column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Rule evaluation errors
    #[error("Rule error in '{rule_id}': {message}")]
    RuleError { rule_id: String, message: String },

    /// A fix precondition did not hold at fix time; the diagnostic stays
    /// reported and no partial edit is applied
    #[error("Fix for '{rule_id}' was not applied: {message}")]
    FixError { rule_id: String, message: String },

    /// Two edits in one batch target overlapping spans
    #[error("Conflicting edits in batch: {first} overlaps {second}")]
    EditConflict { first: String, second: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Rule registration errors (invalid ids, duplicates, map validation)
    #[error("Registry error: {message}")]
    RegistryError { message: String },

    /// Cooperative cancellation between node visits
    #[error("Walk cancelled")]
    Cancelled,

    /// Internal-consistency violations (should be unreachable)
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Rule,
    Fix,
    Conflict,
    Config,
    Registry,
    Cancelled,
    Internal,
}

impl BurnishError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BurnishError::ParseError { .. } => ErrorKind::Parse,
            BurnishError::RuleError { .. } => ErrorKind::Rule,
            BurnishError::FixError { .. } => ErrorKind::Fix,
            BurnishError::EditConflict { .. } => ErrorKind::Conflict,
            BurnishError::ConfigError { .. } => ErrorKind::Config,
            BurnishError::RegistryError { .. } => ErrorKind::Registry,
            BurnishError::Cancelled => ErrorKind::Cancelled,
            BurnishError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (processing of other nodes or
    /// diagnostics can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Parse | ErrorKind::Rule | ErrorKind::Fix | ErrorKind::Internal
        )
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a rule error
    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create a fix precondition error
    pub fn fix_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FixError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create an edit conflict error naming the two offending diagnostics
    pub fn edit_conflict(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::EditConflict {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a registry error
    pub fn registry_error(message: impl Into<String>) -> Self {
        Self::RegistryError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
