//! Rich-text cleanup for Excel exports.
//!
//! Excel cells render HTML markup literally, so a record batch on its way
//! into an "Export to Excel" operation gets every rich-text column converted
//! to plain text first. The conversion itself lives in [`crate::html`]; this
//! module contributes the trigger filter and the per-type attribute set.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::{AttributeDescriptor, AttributeKind, EntitySchema};
use crate::html;
use crate::pipeline::{
    DataService, ExecutionContext, Plugin, PluginError, PARAM_BUSINESS_ENTITY_COLLECTION,
};

/// The message that marks an export pipeline. The export fires nested
/// retrieval messages, so the filter walks the trigger chain for it.
pub const MSG_EXPORT_TO_EXCEL: &str = "ExportToExcel";

/// Format tag the host puts on text attributes that allow embedded HTML.
/// Exact, case-sensitive match; `"richtext"` is a different (unknown) tag.
const RICH_TEXT_FORMAT: &str = "RichText";

/// True iff the descriptor is a single-line or multi-line text attribute
/// whose declared format is exactly [`RICH_TEXT_FORMAT`].
pub fn is_rich_text_attribute(descriptor: &AttributeDescriptor) -> bool {
    matches!(descriptor.kind, AttributeKind::Text | AttributeKind::Memo)
        && descriptor.format.as_deref() == Some(RICH_TEXT_FORMAT)
}

/// Collects the logical names of every rich-text attribute of a type.
///
/// Computed once per record type per invocation and reused across the whole
/// batch.
pub fn rich_text_attributes(schema: &EntitySchema) -> HashSet<String> {
    schema
        .attributes
        .iter()
        .filter(|descriptor| is_rich_text_attribute(descriptor))
        .map(|descriptor| descriptor.logical_name.clone())
        .collect()
}

/// Strips HTML from rich-text columns of the batch an "Export to Excel"
/// operation is about to serialize.
///
/// Applies only when all of the following hold; any failing check is a
/// silent no-op:
///
/// - `"ExportToExcel"` appears somewhere in the trigger chain,
/// - the `"BusinessEntityCollection"` output parameter holds a non-empty
///   collection,
/// - the context's primary entity type has at least one rich-text attribute.
pub struct RichTextExportPlugin;

impl Plugin for RichTextExportPlugin {
    fn name(&self) -> &'static str {
        "richtext-export"
    }

    #[instrument(skip_all, fields(entity = %context.primary_entity_name))]
    fn execute(
        &self,
        context: &mut ExecutionContext,
        service: &dyn DataService,
    ) -> Result<(), PluginError> {
        if !context.is_triggered_by(MSG_EXPORT_TO_EXCEL) {
            return Ok(());
        }

        let Some(collection) = context
            .output(PARAM_BUSINESS_ENTITY_COLLECTION)
            .and_then(|parameter| parameter.as_collection())
        else {
            return Ok(());
        };
        if collection.is_empty() {
            return Ok(());
        }

        let schema = service.get_schema(&context.primary_entity_name)?;
        let rich_text = rich_text_attributes(&schema);
        if rich_text.is_empty() {
            debug!("no rich-text attributes, nothing to strip");
            return Ok(());
        }

        // Re-borrow mutably now that the schema lookup is done.
        let Some(collection) = context
            .output_mut(PARAM_BUSINESS_ENTITY_COLLECTION)
            .and_then(|parameter| parameter.as_collection_mut())
        else {
            return Ok(());
        };

        let mut stripped = 0usize;
        for record in &mut collection.records {
            for attribute in &rich_text {
                if let Some(plain) = record.text(attribute).map(html::normalize) {
                    record.set_text(attribute.clone(), plain);
                    stripped += 1;
                }
            }
        }
        debug!(records = collection.records.len(), stripped, "Stripped rich text");

        Ok(())
    }
}
