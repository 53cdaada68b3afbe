// ABOUTME: Error types for rule loading, prompt rendering, and version parsing.
// ABOUTME: The extraction and filtering transforms themselves are total and never error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or compiling extraction rules.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A CSS selector (release block or exclusion anchor) failed to parse.
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The version heading regex failed to compile.
    #[error("invalid version heading pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Rules JSON could not be deserialized.
    #[error("malformed rules: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Rules file could not be read.
    #[error("failed to read rules file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RulesError {
    /// Creates an InvalidSelector error from any displayable parse failure.
    pub fn invalid_selector(selector: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        RulesError::InvalidSelector {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while rendering a prompt from caller-supplied arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("argument '{0}' cannot be empty")]
    EmptyArgument(&'static str),
}

/// Errors raised while parsing Kubernetes version strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid kubernetes minor version: {0}")]
    InvalidMinor(String),
}
