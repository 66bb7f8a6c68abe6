//! Localized display names for retrieved records.
//!
//! Record types can carry per-locale spellings of their display name in
//! sibling columns (`name_1033`, `name_1036`). The stored primary name is
//! whatever the record was last saved with; this plugin rewrites it to the
//! spelling matching the calling user's UI language, both on the retrieved
//! record itself and on every lookup reference it carries.

pub mod error;
pub mod metadata;

pub use error::*;
pub use metadata::*;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{AttributeValue, EntityReference, Record};
use crate::pipeline::{
    DataService, ExecutionContext, OutputParameter, Plugin, PluginError, PARAM_BUSINESS_ENTITY,
    PARAM_BUSINESS_ENTITY_COLLECTION,
};

/// Marker key in the invocation's shared variable bag. The plugin's own
/// fetches fire nested retrieve messages, so without the marker one logical
/// invocation would re-enter the handler.
pub const SHARED_MARKER: &str = "xrm_plugins.localized_names";

/// Message name for a single-record retrieval.
pub const MSG_RETRIEVE: &str = "retrieve";

/// Message name for a batch retrieval.
pub const MSG_RETRIEVE_MULTIPLE: &str = "retrievemultiple";

/// Record type holding per-user settings.
const USER_SETTINGS_ENTITY: &str = "usersettings";

/// Column of [`USER_SETTINGS_ENTITY`] carrying the UI language locale id.
const UI_LANGUAGE_ATTRIBUTE: &str = "uilanguageid";

/// Substitutes the localized display name into a record, in place.
///
/// - `metadata == None` means the type has no localized-name layout; the
///   record keeps its stored name (not an error).
/// - A locale without a provisioned column fails with
///   [`LocaleError::UnsupportedLocale`] before any fetch or mutation.
/// - With `optimistic` set and the localized column already present in the
///   record's attribute bag, the value is copied in memory and no fetch is
///   issued. Otherwise exactly one fetch retrieves both known localized
///   columns and the value for `locale_id` is copied from the result.
/// - A missing value in the source clears the display name, mirroring what
///   the host does when a localized spelling was never entered.
pub fn apply_locale(
    service: &dyn DataService,
    record: &mut Record,
    locale_id: i32,
    metadata: Option<&LocaleMetadata>,
    optimistic: bool,
) -> Result<(), LocaleError> {
    let Some(metadata) = metadata else {
        return Ok(());
    };
    let localized = metadata.localized_name(locale_id)?;

    let value = if optimistic && record.attributes.contains_key(localized) {
        record.text(localized).map(str::to_owned)
    } else {
        let fetched =
            service.fetch_by_id(&record.logical_name, record.id, &metadata.fetch_columns())?;
        fetched.text(localized).map(str::to_owned)
    };

    set_display_name(record, &metadata.primary_name_attribute, value);
    Ok(())
}

/// Substitutes the localized display name into a lookup reference, in place.
///
/// A reference carries no attribute bag to read optimistically, so this
/// always resolves the referenced type's metadata and takes the fetch path.
pub fn apply_locale_to_reference(
    service: &dyn DataService,
    reference: &mut EntityReference,
    locale_id: i32,
) -> Result<(), LocaleError> {
    let Some(metadata) = LocaleMetadata::resolve(service, &reference.logical_name)? else {
        return Ok(());
    };
    let localized = metadata.localized_name(locale_id)?;

    let fetched =
        service.fetch_by_id(&reference.logical_name, reference.id, &metadata.fetch_columns())?;
    reference.name = fetched.text(localized).map(str::to_owned);
    Ok(())
}

fn set_display_name(record: &mut Record, primary_name_attribute: &str, value: Option<String>) {
    match value {
        Some(value) => record.set_text(primary_name_attribute, value),
        None => {
            record.attributes.remove(primary_name_attribute);
        }
    }
}

fn localize_references(
    service: &dyn DataService,
    record: &mut Record,
    locale_id: i32,
) -> Result<(), LocaleError> {
    for value in record.attributes.values_mut() {
        if let AttributeValue::Lookup(reference) = value {
            apply_locale_to_reference(service, reference, locale_id)?;
        }
    }
    Ok(())
}

/// Reads the calling user's UI language preference.
fn user_locale(service: &dyn DataService, user_id: Uuid) -> Result<i32, PluginError> {
    let settings = service.fetch_by_id(USER_SETTINGS_ENTITY, user_id, &[UI_LANGUAGE_ATTRIBUTE])?;
    settings.int(UI_LANGUAGE_ATTRIBUTE).ok_or_else(|| {
        PluginError::Execution(format!(
            "user {user_id} has no {UI_LANGUAGE_ATTRIBUTE} value"
        ))
    })
}

/// Rewrites display names on retrieval results to the calling user's UI
/// language.
///
/// Runs at most once per logical invocation (see [`SHARED_MARKER`]). The
/// single-record path substitutes optimistically; the batch path always
/// fetches, then both paths walk the records' lookup attributes and rewrite
/// each reference's display name.
pub struct LocalizedNamePlugin;

impl Plugin for LocalizedNamePlugin {
    fn name(&self) -> &'static str {
        "localized-names"
    }

    #[instrument(skip_all, fields(message = %context.message_name))]
    fn execute(
        &self,
        context: &mut ExecutionContext,
        service: &dyn DataService,
    ) -> Result<(), PluginError> {
        if !context.mark_once(SHARED_MARKER) {
            debug!("already ran in this invocation");
            return Ok(());
        }

        // The user-settings fetch happens only after a filter check passes,
        // so a non-retrieval invocation stays a pure no-op.
        let user_id = context.user_id;

        if context.message_is(MSG_RETRIEVE) {
            let Some(record) = context
                .output_mut(PARAM_BUSINESS_ENTITY)
                .and_then(OutputParameter::as_record_mut)
            else {
                return Ok(());
            };

            let locale_id = user_locale(service, user_id)?;
            let entity_name = record.logical_name.clone();
            let metadata = LocaleMetadata::resolve(service, &entity_name)?;
            apply_locale(service, record, locale_id, metadata.as_ref(), true)?;
            localize_references(service, record, locale_id)?;
        } else if context.message_is(MSG_RETRIEVE_MULTIPLE) {
            let Some(collection) = context
                .output_mut(PARAM_BUSINESS_ENTITY_COLLECTION)
                .and_then(OutputParameter::as_collection_mut)
            else {
                return Ok(());
            };

            let locale_id = user_locale(service, user_id)?;
            let entity_name = collection.entity_name.clone();
            let metadata = LocaleMetadata::resolve(service, &entity_name)?;
            for record in &mut collection.records {
                apply_locale(service, record, locale_id, metadata.as_ref(), false)?;
            }
            for record in &mut collection.records {
                localize_references(service, record, locale_id)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttributeDescriptor, AttributeKind, EntitySchema};
    use crate::pipeline::MockService;
    use pretty_assertions::assert_eq;

    fn metadata() -> LocaleMetadata {
        let mock = MockService::new();
        mock.expect_schema("account").return_ok(
            EntitySchema::new("account", "name")
                .with_attribute(AttributeDescriptor::new("name", AttributeKind::Text))
                .with_attribute(AttributeDescriptor::new("name_1033", AttributeKind::Text))
                .with_attribute(AttributeDescriptor::new("name_1036", AttributeKind::Text)),
        );
        LocaleMetadata::resolve(&mock, "account")
            .unwrap()
            .expect("metadata")
    }

    #[test]
    fn optimistic_hit_issues_no_fetch() {
        let mock = MockService::new();
        let mut record = Record::new("account", Uuid::new_v4())
            .with_text("name", "Stored Name")
            .with_text("name_1036", "Nom affiché");

        apply_locale(&mock, &mut record, LOCALE_FRENCH, Some(&metadata()), true).unwrap();

        assert_eq!(record.text("name"), Some("Nom affiché"));
        mock.verify();
    }

    #[test]
    fn optimistic_miss_falls_back_to_fetch() {
        let mock = MockService::new();
        let id = Uuid::new_v4();
        mock.expect_fetch("account", id, &["name_1033", "name_1036"])
            .return_ok(Record::new("account", id).with_text("name_1033", "Display Name"));

        let mut record = Record::new("account", id).with_text("name", "Stored Name");
        apply_locale(&mock, &mut record, LOCALE_ENGLISH, Some(&metadata()), true).unwrap();

        assert_eq!(record.text("name"), Some("Display Name"));
        mock.verify();
    }

    #[test]
    fn non_optimistic_always_fetches() {
        let mock = MockService::new();
        let id = Uuid::new_v4();
        mock.expect_fetch("account", id, &["name_1033", "name_1036"])
            .return_ok(
                Record::new("account", id)
                    .with_text("name_1033", "Display Name")
                    .with_text("name_1036", "Nom affiché"),
            );

        // The localized column is already in memory, but the non-optimistic
        // path must not read it.
        let mut record = Record::new("account", id)
            .with_text("name", "Stored Name")
            .with_text("name_1036", "Valeur périmée");
        apply_locale(&mock, &mut record, LOCALE_FRENCH, Some(&metadata()), false).unwrap();

        assert_eq!(record.text("name"), Some("Nom affiché"));
        mock.verify();
    }

    #[test]
    fn unsupported_locale_fails_without_mutation() {
        let mock = MockService::new();
        let mut record = Record::new("account", Uuid::new_v4()).with_text("name", "Stored Name");
        let before = record.clone();

        let result = apply_locale(&mock, &mut record, 1041, Some(&metadata()), true);

        assert_eq!(result, Err(LocaleError::UnsupportedLocale(1041)));
        assert_eq!(record, before);
        mock.verify();
    }

    #[test]
    fn missing_metadata_is_a_no_op() {
        let mock = MockService::new();
        let mut record = Record::new("task", Uuid::new_v4()).with_text("subject", "Stored");
        let before = record.clone();

        apply_locale(&mock, &mut record, LOCALE_ENGLISH, None, false).unwrap();

        assert_eq!(record, before);
        mock.verify();
    }

    #[test]
    fn missing_localized_value_clears_the_display_name() {
        let mock = MockService::new();
        let id = Uuid::new_v4();
        mock.expect_fetch("account", id, &["name_1033", "name_1036"])
            .return_ok(Record::new("account", id).with_text("name_1033", "Display Name"));

        let mut record = Record::new("account", id).with_text("name", "Stored Name");
        apply_locale(&mock, &mut record, LOCALE_FRENCH, Some(&metadata()), false).unwrap();

        assert_eq!(record.text("name"), None);
        mock.verify();
    }

    #[test]
    fn reference_substitution_always_fetches() {
        let mock = MockService::new();
        let id = Uuid::new_v4();
        mock.expect_schema("account").return_ok(
            EntitySchema::new("account", "name")
                .with_attribute(AttributeDescriptor::new("name", AttributeKind::Text))
                .with_attribute(AttributeDescriptor::new("name_1033", AttributeKind::Text))
                .with_attribute(AttributeDescriptor::new("name_1036", AttributeKind::Text)),
        );
        mock.expect_fetch("account", id, &["name_1033", "name_1036"])
            .return_ok(Record::new("account", id).with_text("name_1036", "Nom affiché"));

        let mut reference = EntityReference::new("account", id).with_name("Stored Name");
        apply_locale_to_reference(&mock, &mut reference, LOCALE_FRENCH).unwrap();

        assert_eq!(reference.name.as_deref(), Some("Nom affiché"));
        mock.verify();
    }

    #[test]
    fn reference_without_locale_layout_keeps_its_name() {
        let mock = MockService::new();
        let id = Uuid::new_v4();
        mock.expect_schema("task")
            .return_ok(EntitySchema::new("task", "subject"));

        let mut reference = EntityReference::new("task", id).with_name("Stored Name");
        apply_locale_to_reference(&mock, &mut reference, LOCALE_ENGLISH).unwrap();

        assert_eq!(reference.name.as_deref(), Some("Stored Name"));
        mock.verify();
    }
}
