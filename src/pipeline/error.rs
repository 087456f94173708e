//! Pipeline-specific error types.

use crate::pipeline::id::UniqueName;
use thiserror::Error;

/// Errors that can occur within the pipeline system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A value does not conform to the component's declared schema.
    #[error("Configuration error on '{node}' field '{field}': {reason}")]
    Configuration {
        node: String,
        field: String,
        reason: String,
    },

    /// Two live nodes would share a unique name.
    #[error("Naming collision: '{0}' is already in use")]
    NamingCollision(UniqueName),

    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Unknown component kind: {0}")]
    UnknownKind(String),

    /// A node failed to render during a build.
    #[error("Build failed at node '{node}': {source}")]
    Build {
        node: UniqueName,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    pub fn configuration(
        node: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PipelineError::Configuration {
            node: node.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the node the error is attributed to, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            PipelineError::Configuration { node, .. } => Some(node),
            PipelineError::NamingCollision(name) => Some(name.as_str()),
            PipelineError::Build { node, .. } => Some(node.as_str()),
            _ => None,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
