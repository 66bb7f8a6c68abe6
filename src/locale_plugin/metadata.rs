use crate::domain::EntitySchema;
use crate::locale_plugin::LocaleError;
use crate::pipeline::{DataService, ServiceError};

/// Locale id for English.
pub const LOCALE_ENGLISH: i32 = 1033;

/// Locale id for French.
pub const LOCALE_FRENCH: i32 = 1036;

/// The localized-name layout of a record type: its primary-name attribute
/// and the sibling columns carrying the per-locale spellings.
///
/// A type is localizable only when BOTH sibling columns exist; partial
/// layouts yield no metadata at all, and the type keeps its stored display
/// name. That is intentional — a half-provisioned type would otherwise show
/// a mix of localized and raw names depending on the locale asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleMetadata {
    /// Logical name of the attribute holding the display name.
    pub primary_name_attribute: String,
    english_name: String,
    french_name: String,
}

impl LocaleMetadata {
    /// Looks up the localized-name layout of a record type.
    ///
    /// Fetches the type's schema and checks for attributes literally named
    /// `<primary>_1033` and `<primary>_1036` next to the primary-name
    /// attribute. Returns `Ok(None)` unless both exist.
    pub fn resolve(
        service: &dyn DataService,
        entity_name: &str,
    ) -> Result<Option<LocaleMetadata>, ServiceError> {
        let schema = service.get_schema(entity_name)?;
        let primary = &schema.primary_name_attribute;

        let english_name = format!("{primary}_{LOCALE_ENGLISH}");
        let french_name = format!("{primary}_{LOCALE_FRENCH}");

        if schema.has_attribute(&english_name) && schema.has_attribute(&french_name) {
            Ok(Some(LocaleMetadata {
                primary_name_attribute: primary.clone(),
                english_name,
                french_name,
            }))
        } else {
            Ok(None)
        }
    }

    /// Logical name of the column holding the given locale's spelling.
    pub fn localized_name(&self, locale_id: i32) -> Result<&str, LocaleError> {
        match locale_id {
            LOCALE_ENGLISH => Ok(&self.english_name),
            LOCALE_FRENCH => Ok(&self.french_name),
            other => Err(LocaleError::UnsupportedLocale(other)),
        }
    }

    /// The column set a localized-name fetch asks for: always both known
    /// locales, regardless of which one the caller wants.
    pub fn fetch_columns(&self) -> [&str; 2] {
        [&self.english_name, &self.french_name]
    }
}
