//! Error handling for the script builder
//!
//! This module defines the crate-wide error type and a Result alias for use
//! outside the pipeline core. Pipeline-specific failures live in
//! [`crate::pipeline::PipelineError`] and convert into this type.

use crate::pipeline::PipelineError;
use thiserror::Error;

/// Main error type for script builder operations
#[derive(Error, Debug)]
pub enum ScriptBuilderError {
    /// Errors raised by the pipeline core (naming, configuration, build)
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to the file preview boundary
    #[error("Preview error: {0}")]
    Preview(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScriptBuilderError>,
    },
}

impl ScriptBuilderError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScriptBuilderError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for ScriptBuilderError {
    fn from(err: serde_json::Error) -> Self {
        ScriptBuilderError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ScriptBuilderError {
    fn from(err: toml::de::Error) -> Self {
        ScriptBuilderError::Serialization(err.to_string())
    }
}

/// Result type alias for script builder operations
pub type Result<T> = std::result::Result<T, ScriptBuilderError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ScriptBuilderError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
