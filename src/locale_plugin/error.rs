//! Error types for localized-name substitution.

use thiserror::Error;

use crate::pipeline::{PluginError, ServiceError};

/// Errors that can occur while substituting localized display names.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocaleError {
    /// The locale id has no localized-name column. Only English (1033) and
    /// French (1036) are provisioned; callers must restrict to those.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(i32),

    /// A schema or record lookup failed; propagated untouched.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<LocaleError> for PluginError {
    fn from(error: LocaleError) -> Self {
        match error {
            LocaleError::Service(service) => PluginError::Service(service),
            other => PluginError::Execution(other.to_string()),
        }
    }
}
