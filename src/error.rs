// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Error types surfaced by registry construction, conversion and parsing.

use thiserror::Error;

/// Failure to turn a raw string into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value:?} to {type_name}: {reason}")]
pub struct ConversionError {
    /// Name of the target type.
    pub type_name: &'static str,
    /// Raw text that failed to convert.
    pub value: String,
    /// Converter-specific failure description.
    pub reason: String,
}

impl ConversionError {
    /// Build a conversion error for `type_name` and raw `value`.
    pub fn new(type_name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            type_name,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Errors returned while building an [`crate::Options`] registry or matching
/// arguments against it. Every variant aborts the current call.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("option {0} is already defined")]
    DuplicateOption(String),

    #[error("operation {operation} on {class} declares {arity} parameters, only none or one is allowed")]
    InvalidArity {
        class: &'static str,
        operation: String,
        arity: usize,
    },

    #[error("operation {operation} on {class} cannot be an embedded or property option: {reason}")]
    InvalidFlagCombination {
        class: &'static str,
        operation: String,
        reason: &'static str,
    },

    #[error("option {option}: {source}")]
    ConversionFailed {
        option: String,
        #[source]
        source: ConversionError,
    },

    #[error("no available option for {0}")]
    NoSuchOption(String),

    #[error("no object of type {class} available to set option {option}")]
    NoTargetInstance { option: String, class: &'static str },

    #[error("missing value for option {0}")]
    MissingValue(String),

    #[error("missing embedded value for option {0}")]
    MissingEmbeddedValue(String),

    #[error("option {option} does not take a value")]
    UnexpectedValue { option: String },

    #[error("embedded option {option} cannot be part of the clustered short options {token}")]
    EmbeddedNotSupportedInCluster { option: String, token: String },

    #[error("not all required options were included, missing: {}", .0.join(", "))]
    MissingRequiredOptions(Vec<String>),
}

impl OptionsError {
    /// Kind label used by tests and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateOption(_) => "duplicate-option",
            Self::InvalidArity { .. } => "invalid-arity",
            Self::InvalidFlagCombination { .. } => "invalid-flag-combination",
            Self::ConversionFailed { .. } => "conversion-failed",
            Self::NoSuchOption(_) => "no-such-option",
            Self::NoTargetInstance { .. } => "no-target-instance",
            Self::MissingValue(_) => "missing-value",
            Self::MissingEmbeddedValue(_) => "missing-embedded-value",
            Self::UnexpectedValue { .. } => "unexpected-value",
            Self::EmbeddedNotSupportedInCluster { .. } => "embedded-in-cluster",
            Self::MissingRequiredOptions(_) => "missing-required-options",
        }
    }
}

/// Errors produced while loading a descriptor table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("descriptor table is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("descriptor table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read descriptor table: {0}")]
    Io(#[from] std::io::Error),
    #[error("descriptor table has no entry for operation {0}")]
    MissingEntry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_lists_every_option() {
        let err = OptionsError::MissingRequiredOptions(vec![
            "[-O|--oName]".into(),
            "[foo=<value>]".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "not all required options were included, missing: [-O|--oName], [foo=<value>]"
        );
        assert_eq!(err.kind(), "missing-required-options");
    }

    #[test]
    fn conversion_failure_names_type_and_value() {
        let err = ConversionError::new("i32", "10.5", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "cannot convert \"10.5\" to i32: invalid digit found in string"
        );
    }
}
