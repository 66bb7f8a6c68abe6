use uuid::Uuid;

use crate::domain::{EntitySchema, Record};
use crate::pipeline::ServiceError;

/// The host-provided data-access collaborator.
///
/// # Architecture Note
/// The plugins in this crate never own storage or metadata; they consume
/// this narrow seam and nothing else. Keeping the trait this small is what
/// makes the handlers testable in isolation — see
/// [`MockService`](crate::pipeline::MockService) for the test-side
/// implementation.
///
/// Both methods are blocking calls into the host. The execution model is
/// synchronous and run-to-completion, so there are no suspension points and
/// no retries; implementations report failure through [`ServiceError`] and
/// the plugins propagate it.
pub trait DataService {
    /// Returns the attribute schema of a record type.
    fn get_schema(&self, entity_name: &str) -> Result<EntitySchema, ServiceError>;

    /// Fetches one record by id, restricted to the named columns.
    fn fetch_by_id(
        &self,
        entity_name: &str,
        id: Uuid,
        columns: &[&str],
    ) -> Result<Record, ServiceError>;
}
