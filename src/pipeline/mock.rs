//! # Mock Data Service
//!
//! Utilities for testing plugins in isolation, without a live host.
//!
//! Create a [`MockService`], queue expectations with
//! [`expect_schema`](MockService::expect_schema) and
//! [`expect_fetch`](MockService::expect_fetch), hand the mock to the plugin
//! as its [`DataService`], and finish with [`verify`](MockService::verify).
//!
//! Expectations are consumed strictly in FIFO order; a call the mock did not
//! expect, or a call whose arguments disagree with the queued expectation,
//! panics the test immediately.

use std::collections::VecDeque;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::{EntitySchema, Record};
use crate::pipeline::{DataService, ServiceError};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected call to the mock, together with its canned response.
#[derive(Debug)]
enum Expectation {
    Schema {
        entity: String,
        response: Result<EntitySchema, ServiceError>,
    },
    Fetch {
        entity: String,
        id: Uuid,
        columns: Vec<String>,
        response: Result<Record, ServiceError>,
    },
}

/// A scripted [`DataService`] with expectation tracking.
///
/// # Example
/// ```ignore
/// let mock = MockService::new();
/// mock.expect_schema("account").return_ok(schema);
/// mock.expect_fetch("account", id, &["name_1033", "name_1036"]).return_ok(record);
///
/// plugin.execute(&mut context, &mock)?;
/// mock.verify(); // Ensures every queued expectation was consumed
/// ```
#[derive(Default)]
pub struct MockService {
    expectations: Mutex<VecDeque<Expectation>>,
}

impl MockService {
    /// Creates a mock with no expectations. Any call panics until
    /// expectations are queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `get_schema` call for the given entity.
    pub fn expect_schema(&self, entity: &str) -> SchemaExpectationBuilder<'_> {
        SchemaExpectationBuilder {
            mock: self,
            entity: entity.to_owned(),
        }
    }

    /// Expects a `fetch_by_id` call for the given entity, id, and column set.
    pub fn expect_fetch(&self, entity: &str, id: Uuid, columns: &[&str]) -> FetchExpectationBuilder<'_> {
        FetchExpectationBuilder {
            mock: self,
            entity: entity.to_owned(),
            id,
            columns: columns.iter().map(|column| (*column).to_owned()).collect(),
        }
    }

    /// Panics unless every queued expectation has been consumed.
    pub fn verify(&self) {
        let expectations = self.expectations.lock().unwrap();
        if !expectations.is_empty() {
            panic!(
                "not all expectations were met, {} remaining",
                expectations.len()
            );
        }
    }

    fn push(&self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    fn pop(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

impl DataService for MockService {
    fn get_schema(&self, entity_name: &str) -> Result<EntitySchema, ServiceError> {
        match self.pop() {
            Some(Expectation::Schema { entity, response }) => {
                assert_eq!(
                    entity, entity_name,
                    "get_schema called for an unexpected entity"
                );
                response
            }
            other => panic!("unexpected get_schema({entity_name:?}), queued expectation: {other:?}"),
        }
    }

    fn fetch_by_id(
        &self,
        entity_name: &str,
        record_id: Uuid,
        requested: &[&str],
    ) -> Result<Record, ServiceError> {
        match self.pop() {
            Some(Expectation::Fetch {
                entity,
                id,
                columns,
                response,
            }) => {
                assert_eq!(
                    entity, entity_name,
                    "fetch_by_id called for an unexpected entity"
                );
                assert_eq!(id, record_id, "fetch_by_id called with an unexpected id");
                assert_eq!(
                    columns, requested,
                    "fetch_by_id called with an unexpected column set"
                );
                response
            }
            other => panic!(
                "unexpected fetch_by_id({entity_name:?}, {record_id}), queued expectation: {other:?}"
            ),
        }
    }
}

/// Builder for `get_schema` expectations.
pub struct SchemaExpectationBuilder<'a> {
    mock: &'a MockService,
    entity: String,
}

impl SchemaExpectationBuilder<'_> {
    /// Queues a successful response.
    pub fn return_ok(self, schema: EntitySchema) {
        self.mock.push(Expectation::Schema {
            entity: self.entity,
            response: Ok(schema),
        });
    }

    /// Queues an error response.
    pub fn return_err(self, error: ServiceError) {
        self.mock.push(Expectation::Schema {
            entity: self.entity,
            response: Err(error),
        });
    }
}

/// Builder for `fetch_by_id` expectations.
pub struct FetchExpectationBuilder<'a> {
    mock: &'a MockService,
    entity: String,
    id: Uuid,
    columns: Vec<String>,
}

impl FetchExpectationBuilder<'_> {
    /// Queues a successful response.
    pub fn return_ok(self, record: Record) {
        self.mock.push(Expectation::Fetch {
            entity: self.entity,
            id: self.id,
            columns: self.columns,
            response: Ok(record),
        });
    }

    /// Queues an error response.
    pub fn return_err(self, error: ServiceError) {
        self.mock.push(Expectation::Fetch {
            entity: self.entity,
            id: self.id,
            columns: self.columns,
            response: Err(error),
        });
    }
}
