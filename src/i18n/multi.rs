//! Several translatable errors keyed by field name.
//!
//! Used for validation results: each field maps to one [`ErrorEntry`], and
//! the [`SUMMARY_FIELD`] entry holds an error that belongs to no field.

use crate::i18n::render::{active_locale, translator_for};
use crate::i18n::{ErrorEntry, Localize, Registry, TranslatableError, Values};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Field name of the error that is not tied to a specific field.
pub const SUMMARY_FIELD: &str = "_summary";

/// Section used when a plain error is wrapped as the summary entry.
pub const ERROR_SECTION: &str = "_error";

/// Status code applied by [`TranslatableMultiError::add`] when none is set.
pub const FIELD_ERROR_CODE: u16 = 400;

/// Status code applied by [`TranslatableMultiError::add_summary`] when none is set.
pub const SUMMARY_ERROR_CODE: u16 = 500;

/// Field → translatable error collection with a shared code and locale.
///
/// Serializes as `null` when empty, `{"<field>": "<translated>"}` when a
/// locale is set, and `{"<field>": {"<section>": "<key>"}}` otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatableMultiError {
    code: Option<u16>,
    locale: Option<String>,
    errors: BTreeMap<String, ErrorEntry>,
}

impl TranslatableMultiError {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Create with a single field error. The code stays unset.
    pub fn new(
        field: impl Into<String>,
        section: impl Into<String>,
        key: impl Into<String>,
        values: Option<Values>,
    ) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), ErrorEntry::new(section, key, values));
        Self {
            errors,
            ..Self::default()
        }
    }

    /// Create with a single summary error. The code stays unset.
    pub fn new_summary(
        section: impl Into<String>,
        key: impl Into<String>,
        values: Option<Values>,
    ) -> Self {
        Self::new(SUMMARY_FIELD, section, key, values)
    }

    /// Insert or overwrite the error for `field`; sets the code to 400 if unset.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        section: impl Into<String>,
        key: impl Into<String>,
        values: Option<Values>,
    ) -> &mut Self {
        self.code.get_or_insert(FIELD_ERROR_CODE);
        self.errors
            .insert(field.into(), ErrorEntry::new(section, key, values));
        self
    }

    /// Insert or overwrite the summary error; sets the code to 500 if unset.
    pub fn add_summary(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        values: Option<Values>,
    ) -> &mut Self {
        self.code.get_or_insert(SUMMARY_ERROR_CODE);
        self.errors
            .insert(SUMMARY_FIELD.to_string(), ErrorEntry::new(section, key, values));
        self
    }

    /// Record an arbitrary error as the summary entry.
    ///
    /// * a `TranslatableMultiError` replaces this collection entirely
    /// * a `TranslatableError` becomes the summary entry and lends its code
    ///   when this collection has none
    /// * anything else becomes `{"_error": "<err.to_string()>"}`
    pub fn add_summary_from_error(&mut self, err: &(dyn std::error::Error + 'static)) -> &mut Self {
        if let Some(multi) = err.downcast_ref::<TranslatableMultiError>() {
            *self = multi.clone();
            return self;
        }

        if let Some(single) = err.downcast_ref::<TranslatableError>() {
            if self.code.is_none() {
                self.code = single.code();
            }
            return self.add_summary(single.section(), single.key(), single.values().cloned());
        }

        self.add_summary(ERROR_SECTION, err.to_string(), None)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn code(&self) -> Option<u16> {
        self.code
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn errors(&self) -> &BTreeMap<String, ErrorEntry> {
        &self.errors
    }

    pub fn set_code(&mut self, code: u16) {
        self.code = Some(code);
    }

    /// Translate into `locale` when serialized. An empty locale is ignored.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.set_code(code);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.set_locale(locale);
        self
    }

    /// Field → human message in the stored locale, or in the registry's
    /// default locale when none is set.
    ///
    /// # Panics
    /// Panics if `registry` has not been initialized.
    pub fn resolve(&self, registry: &Registry) -> BTreeMap<String, String> {
        let translator = match active_locale(&self.locale) {
            Some(locale) => registry.translator(locale),
            None => registry.translator(&registry.default_locale()),
        };
        self.errors
            .iter()
            .map(|(field, entry)| (field.clone(), entry.tf(&translator)))
            .collect()
    }
}

/// Identity form JSON, independent of any locale.
impl fmt::Display for TranslatableMultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.errors).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for TranslatableMultiError {}

impl Localize for TranslatableMultiError {
    fn serialize_localized<S: Serializer>(
        &self,
        registry: &Registry,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if self.errors.is_empty() {
            return serializer.serialize_none();
        }
        match active_locale(&self.locale) {
            Some(locale) => {
                let translator = translator_for::<S::Error>(registry, locale)?;
                let mut map = serializer.serialize_map(Some(self.errors.len()))?;
                for (field, entry) in &self.errors {
                    map.serialize_entry(field, &entry.tf(&translator))?;
                }
                map.end()
            }
            None => self.errors.serialize(serializer),
        }
    }
}

impl Serialize for TranslatableMultiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_localized(Registry::global(), serializer)
    }
}

impl<'de> Deserialize<'de> for TranslatableMultiError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let errors = BTreeMap::<String, ErrorEntry>::deserialize(deserializer)?;
        Ok(Self {
            errors,
            ..Self::default()
        })
    }
}
