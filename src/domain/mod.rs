//! Pure data views over the host platform's records and metadata.
//!
//! Nothing in this module talks to the host; these are the in-memory shapes
//! the pipeline hands to plugins and the shapes the
//! [`DataService`](crate::pipeline::DataService) collaborator returns.

pub mod record;
pub mod schema;

pub use record::*;
pub use schema::*;
