use serde::{Deserialize, Serialize};

/// The declared kind of an attribute, as reported by the host's metadata
/// service. Only `Text` and `Memo` can carry a rich-text format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Memo,
    /// Pointer to another record.
    Lookup,
    /// 32-bit integer.
    Integer,
    /// Any kind this crate has no use for.
    Other,
}

/// Metadata descriptor for one attribute of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub logical_name: String,
    pub kind: AttributeKind,
    /// The host's format tag for text attributes (e.g. `"Email"`, `"Url"`,
    /// `"RichText"`). `None` for attributes without a declared format.
    pub format: Option<String>,
}

impl AttributeDescriptor {
    pub fn new(logical_name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            logical_name: logical_name.into(),
            kind,
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// The attribute schema of a record type, as returned by
/// [`DataService::get_schema`](crate::pipeline::DataService::get_schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub logical_name: String,
    /// Logical name of the attribute designated as the human-readable
    /// display name of the type.
    pub primary_name_attribute: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl EntitySchema {
    pub fn new(
        logical_name: impl Into<String>,
        primary_name_attribute: impl Into<String>,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            primary_name_attribute: primary_name_attribute.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, descriptor: AttributeDescriptor) -> Self {
        self.attributes.push(descriptor);
        self
    }

    /// True when the schema declares an attribute with the given logical name.
    pub fn has_attribute(&self, logical_name: &str) -> bool {
        self.attributes
            .iter()
            .any(|descriptor| descriptor.logical_name == logical_name)
    }
}
