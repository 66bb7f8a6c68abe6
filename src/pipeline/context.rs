use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::{Record, RecordCollection};

/// Name of the output parameter carrying a record batch. Fixed by the host's
/// external contract.
pub const PARAM_BUSINESS_ENTITY_COLLECTION: &str = "BusinessEntityCollection";

/// Name of the output parameter carrying a single retrieved record. Fixed by
/// the host's external contract.
pub const PARAM_BUSINESS_ENTITY: &str = "BusinessEntity";

/// A value in the invocation's output parameter bag.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputParameter {
    /// A single record, as produced by a `"retrieve"` message.
    Record(Record),
    /// A record batch, as produced by `"retrievemultiple"` or an export.
    Collection(RecordCollection),
}

impl OutputParameter {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            OutputParameter::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            OutputParameter::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&RecordCollection> {
        match self {
            OutputParameter::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut RecordCollection> {
        match self {
            OutputParameter::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

/// One invocation of the host's message pipeline, as seen by a plugin.
///
/// # Architecture Note
/// The host chains contexts: a plugin fired by a query that was itself
/// triggered by an export sees its own context with the export's context as
/// an ancestor. [`ExecutionContext::is_triggered_by`] walks that chain.
///
/// The shared variable bag is the per-invocation idempotency mechanism: a
/// plugin that must not run twice inside one logical invocation marks the
/// bag on first entry. The bag lives in the context — never in process-wide
/// state — so parallel invocations cannot observe each other's markers.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// The message that fired this invocation (e.g. `"retrieve"`,
    /// `"ExportToExcel"`).
    pub message_name: String,
    /// Logical name of the record type the message targets.
    pub primary_entity_name: String,
    /// The calling user.
    pub user_id: Uuid,
    /// The invocation that triggered this one, if any.
    pub parent: Option<Box<ExecutionContext>>,
    /// Named results the pipeline has produced so far. Plugins mutate these
    /// in place.
    pub output_parameters: HashMap<String, OutputParameter>,
    /// Per-invocation marker bag shared by every plugin in the chain.
    shared_variables: HashSet<String>,
}

impl ExecutionContext {
    pub fn new(message_name: impl Into<String>, primary_entity_name: impl Into<String>) -> Self {
        Self {
            message_name: message_name.into(),
            primary_entity_name: primary_entity_name.into(),
            user_id: Uuid::nil(),
            parent: None,
            output_parameters: HashMap::new(),
            shared_variables: HashSet::new(),
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_parent(mut self, parent: ExecutionContext) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, value: OutputParameter) -> Self {
        self.output_parameters.insert(name.into(), value);
        self
    }

    /// True when this invocation, or any invocation up its trigger chain,
    /// carries the given message name (exact match).
    ///
    /// Implemented as iteration over the parent accessor rather than
    /// recursion; real chains are shallow, but the depth is host-controlled.
    pub fn is_triggered_by(&self, message_name: &str) -> bool {
        let mut current = Some(self);
        while let Some(context) = current {
            if context.message_name == message_name {
                return true;
            }
            current = context.parent.as_deref();
        }
        false
    }

    /// Case-insensitive comparison against this invocation's own message
    /// name. Retrieval messages arrive in host-dependent casing.
    pub fn message_is(&self, message_name: &str) -> bool {
        self.message_name.eq_ignore_ascii_case(message_name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputParameter> {
        self.output_parameters.get(name)
    }

    pub fn output_mut(&mut self, name: &str) -> Option<&mut OutputParameter> {
        self.output_parameters.get_mut(name)
    }

    /// Sets a marker in the shared variable bag. Returns `true` on first
    /// entry, `false` when the marker was already present.
    pub fn mark_once(&mut self, key: &str) -> bool {
        self.shared_variables.insert(key.to_owned())
    }
}
