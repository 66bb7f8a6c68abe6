use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single value inside a record's attribute bag.
///
/// The host platform stores many more value kinds; the plugins in this crate
/// only ever read and write `Text`, walk `Lookup` values, and read `Int` for
/// the user's language preference. Everything else travels through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A plain or rich-text string column.
    Text(String),
    /// A pointer to another record (a lookup column).
    Lookup(EntityReference),
    /// A 32-bit integer column.
    Int(i32),
    /// A boolean column.
    Bool(bool),
}

/// A pointer to a record of another type: type name, id, and the display
/// name the host resolved at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReference {
    pub logical_name: String,
    pub id: Uuid,
    pub name: Option<String>,
}

impl EntityReference {
    pub fn new(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            logical_name: logical_name.into(),
            id,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An in-memory record as handed over by the host pipeline.
///
/// The attribute bag is an open map from logical attribute name to value.
/// Plugins mutate it in place; the host owns persistence, so nothing here is
/// ever written back to storage by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub logical_name: String,
    pub id: Uuid,
    pub attributes: HashMap<String, AttributeValue>,
}

impl Record {
    /// Creates an empty record of the given type.
    pub fn new(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            logical_name: logical_name.into(),
            id,
            attributes: HashMap::new(),
        }
    }

    /// Builder-style helper to add a text attribute.
    pub fn with_text(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(attribute.into(), AttributeValue::Text(value.into()));
        self
    }

    /// Builder-style helper to add an integer attribute.
    pub fn with_int(mut self, attribute: impl Into<String>, value: i32) -> Self {
        self.attributes
            .insert(attribute.into(), AttributeValue::Int(value));
        self
    }

    /// Builder-style helper to add a lookup attribute.
    pub fn with_lookup(mut self, attribute: impl Into<String>, reference: EntityReference) -> Self {
        self.attributes
            .insert(attribute.into(), AttributeValue::Lookup(reference));
        self
    }

    /// Returns the text value of an attribute, or `None` when the attribute
    /// is absent or holds a non-text value.
    pub fn text(&self, attribute: &str) -> Option<&str> {
        match self.attributes.get(attribute) {
            Some(AttributeValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer value of an attribute, or `None` when the
    /// attribute is absent or holds a non-integer value.
    pub fn int(&self, attribute: &str) -> Option<i32> {
        match self.attributes.get(attribute) {
            Some(AttributeValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Overwrites an attribute with a text value.
    pub fn set_text(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .insert(attribute.into(), AttributeValue::Text(value.into()));
    }
}

/// A batch of records of one type, as carried by the host's
/// `"BusinessEntityCollection"` output parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCollection {
    /// Logical name of the record type every member belongs to.
    pub entity_name: String,
    pub records: Vec<Record>,
}

impl RecordCollection {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
