//! Runtime orchestration for hosts embedding the plugins.
//!
//! # Main Components
//!
//! - [`PluginPipeline`] - Registers plugins and dispatches one invocation
//!   through them in order
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod pipeline;
pub mod tracing;

pub use pipeline::*;
pub use tracing::*;
