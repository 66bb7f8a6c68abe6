//! The seam between the host's message pipeline and the plugins.
//!
//! This module owns everything a handler needs from the host, and nothing
//! more:
//!
//! - [`ExecutionContext`] - one invocation: message, trigger chain, output
//!   parameters, per-invocation shared markers
//! - [`Plugin`] - the handler contract
//! - [`DataService`] - the blocking data-access collaborator
//! - [`ServiceError`] / [`PluginError`] - the error types crossing the seam
//!
//! # Testing
//!
//! See the [`mock`] module for a scripted [`DataService`] that lets tests
//! run plugins without a live host.

pub mod context;
pub mod error;
pub mod mock;
pub mod plugin;
pub mod service;

pub use context::*;
pub use error::*;
pub use mock::*;
pub use plugin::*;
pub use service::*;
