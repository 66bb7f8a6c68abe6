//! Error types shared by the pipeline seam.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a [`DataService`](crate::pipeline::DataService)
/// implementation.
///
/// The plugins never catch or retry these; a failed lookup is a hard failure
/// of the enclosing invocation and propagates to the host.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The requested record does not exist (or vanished between the host's
    /// query and the plugin's fetch).
    #[error("record not found: {entity} {id}")]
    NotFound { entity: String, id: Uuid },

    /// The calling user may not read the requested record or metadata.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Any other failure reported by the host's data layer.
    #[error("data service failure: {0}")]
    Backend(String),
}

/// Errors a [`Plugin`](crate::pipeline::Plugin) execution can end with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PluginError {
    /// A collaborator lookup failed; propagated untouched.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A handler-specific failure.
    #[error("plugin execution failed: {0}")]
    Execution(String),
}
