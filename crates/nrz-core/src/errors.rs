//! Structured error types shared across the allocation engine crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NrzError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (row numbers, subject ids, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the allocation engine.
///
/// Every failure is a deterministic function of the input, so none of these
/// are retried inside the engine. They surface unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NrzError {
    /// Bad, duplicate or missing subject field.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// Unknown allocation method name.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(ErrorInfo),
    /// Inconsistent run configuration (empty group list, zero subjects, ...).
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Entropy source failures while drawing a fresh seed.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Serialization, canonicalization and config decoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl NrzError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NrzError::Validation(info)
            | NrzError::UnsupportedMethod(info)
            | NrzError::Configuration(info)
            | NrzError::Rng(info)
            | NrzError::Serde(info) => info,
        }
    }

    /// Shorthand for a configuration error with the given code and message.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        NrzError::Configuration(ErrorInfo::new(code, message))
    }

    /// Shorthand for a serde error wrapping an underlying failure.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        NrzError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}
