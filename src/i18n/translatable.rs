//! Errors that carry a translatable identity instead of a fixed message.
//!
//! A [`TranslatableError`] is identified by `section` and `key`. Its
//! `Display` output is the locale-independent `section.key` string; the
//! human message is produced only when a translator is applied, either
//! directly or while serializing:
//!
//! | state                     | JSON                        |
//! |---------------------------|-----------------------------|
//! | unset (no section or key) | `null`                      |
//! | explicit locale           | `"<translated message>"`    |
//! | no locale                 | `{"<section>": "<key>"}`    |

use crate::i18n::render::{active_locale, translator_for};
use crate::i18n::{Localize, Registry, Translator, Values};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Section, key and substitution values of one translatable message.
///
/// Serializes as the identity form `{"<section>": "<key>"}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorEntry {
    section: String,
    key: String,
    values: Option<Values>,
}

impl ErrorEntry {
    pub fn new(section: impl Into<String>, key: impl Into<String>, values: Option<Values>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            values,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> Option<&Values> {
        self.values.as_ref()
    }

    /// Translate without substitution.
    pub fn t(&self, translator: &Translator) -> String {
        translator.t(&self.section, &self.key)
    }

    /// Translate with the stored values substituted.
    pub fn tf(&self, translator: &Translator) -> String {
        match &self.values {
            Some(values) => translator.tf(&self.section, &self.key, values),
            None => self.t(translator),
        }
    }

    pub fn err_t(&self, translator: &Translator) -> anyhow::Error {
        anyhow::Error::msg(self.t(translator))
    }

    pub fn err_tf(&self, translator: &Translator) -> anyhow::Error {
        anyhow::Error::msg(self.tf(translator))
    }
}

impl Serialize for ErrorEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.section, &self.key)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identity = BTreeMap::<String, String>::deserialize(deserializer)?;
        let len = identity.len();
        let mut entries = identity.into_iter();
        match (entries.next(), entries.next()) {
            (Some((section, key)), None) => Ok(ErrorEntry::new(section, key, None)),
            _ => Err(D::Error::invalid_length(len, &"a single {section: key} entry")),
        }
    }
}

/// A domain error resolved to a human message only on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatableError {
    entry: ErrorEntry,
    code: Option<u16>,
    locale: Option<String>,
}

impl TranslatableError {
    pub fn new(section: impl Into<String>, key: impl Into<String>, values: Option<Values>) -> Self {
        Self {
            entry: ErrorEntry::new(section, key, values),
            ..Self::default()
        }
    }

    /// Create an error with a status code (e.g. `400`).
    pub fn new_with_code(
        code: u16,
        section: impl Into<String>,
        key: impl Into<String>,
        values: Option<Values>,
    ) -> Self {
        Self::new(section, key, values).with_code(code)
    }

    // ==================== Setters ====================

    pub fn set_code(&mut self, code: u16) {
        self.code = Some(code);
    }

    pub fn set_section(&mut self, section: impl Into<String>) {
        self.entry.section = section.into();
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.entry.key = key.into();
    }

    pub fn set_values(&mut self, values: Values) {
        self.entry.values = Some(values);
    }

    /// Translate into `locale` when serialized. An empty locale is ignored.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    // ==================== Builders ====================

    pub fn with_code(mut self, code: u16) -> Self {
        self.set_code(code);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.set_section(section);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.set_key(key);
        self
    }

    pub fn with_values(mut self, values: Values) -> Self {
        self.set_values(values);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.set_locale(locale);
        self
    }

    // ==================== Getters ====================

    pub fn code(&self) -> Option<u16> {
        self.code
    }

    pub fn section(&self) -> &str {
        self.entry.section()
    }

    pub fn key(&self) -> &str {
        self.entry.key()
    }

    pub fn values(&self) -> Option<&Values> {
        self.entry.values()
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn entry(&self) -> &ErrorEntry {
        &self.entry
    }

    /// True when neither section nor key is set; such an error serializes as `null`.
    pub fn is_empty(&self) -> bool {
        self.entry.section.is_empty() && self.entry.key.is_empty()
    }

    // ==================== Translation ====================

    pub fn t(&self, translator: &Translator) -> String {
        self.entry.t(translator)
    }

    pub fn tf(&self, translator: &Translator) -> String {
        self.entry.tf(translator)
    }

    pub fn err_t(&self, translator: &Translator) -> anyhow::Error {
        self.entry.err_t(translator)
    }

    pub fn err_tf(&self, translator: &Translator) -> anyhow::Error {
        self.entry.err_tf(translator)
    }

    /// Human message in the stored locale, or in the registry's default
    /// locale when none is set.
    ///
    /// # Panics
    /// Panics if `registry` has not been initialized.
    pub fn resolve(&self, registry: &Registry) -> String {
        let translator = match active_locale(&self.locale) {
            Some(locale) => registry.translator(locale),
            None => registry.translator(&registry.default_locale()),
        };
        self.entry.tf(&translator)
    }
}

impl From<ErrorEntry> for TranslatableError {
    fn from(entry: ErrorEntry) -> Self {
        Self {
            entry,
            ..Self::default()
        }
    }
}

impl fmt::Display for TranslatableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entry.key.is_empty() {
            f.write_str(&self.entry.section)
        } else {
            write!(f, "{}.{}", self.entry.section, self.entry.key)
        }
    }
}

impl std::error::Error for TranslatableError {}

impl Localize for TranslatableError {
    fn serialize_localized<S: Serializer>(
        &self,
        registry: &Registry,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_none();
        }
        match active_locale(&self.locale) {
            Some(locale) => {
                let translator = translator_for::<S::Error>(registry, locale)?;
                serializer.serialize_str(&self.entry.tf(&translator))
            }
            None => self.entry.serialize(serializer),
        }
    }
}

impl Serialize for TranslatableError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_localized(Registry::global(), serializer)
    }
}

impl<'de> Deserialize<'de> for TranslatableError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ErrorEntry::deserialize(deserializer).map(TranslatableError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{DictionaryCollection, Value};
    use serde_json::json;

    fn values(token: &str, value: impl Into<Value>) -> Values {
        Values::from([(token.to_string(), value.into())])
    }

    fn registry() -> Registry {
        let collection: DictionaryCollection = serde_json::from_value(json!({
            "en": {
                "section.sub_section": {"key": "Translated field"},
                "fields.errors": {"to_short": "Field too short"},
                "errors.connections": {"connections_limit": "Connections limit is {count}"}
            },
            "cz": {
                "section.sub_section": {"key": "Přeložené pole"},
                "fields.errors": {"to_short": "Pole je příliš krátké"},
                "errors.connections": {"connections_limit": "Limit připojení je {count}"}
            }
        }))
        .unwrap();
        let registry = Registry::new();
        registry.init_from_dictionaries("en", collection, &[]).unwrap();
        registry
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_without_values() {
        let err = TranslatableError::new("section1", "key1", None);
        assert_eq!(err.section(), "section1");
        assert_eq!(err.key(), "key1");
        assert!(err.values().is_none());
        assert_eq!(err.code(), None);
        assert_eq!(err.locale(), None);
    }

    #[test]
    fn test_new_with_values() {
        let err = TranslatableError::new("section2", "key2", Some(values("foo", "bar")));
        assert_eq!(err.values(), Some(&values("foo", "bar")));
    }

    #[test]
    fn test_new_with_code() {
        let err = TranslatableError::new_with_code(
            400,
            "test_section",
            "test_error_key",
            Some(values("test value key", "test value")),
        );
        assert_eq!(err.code(), Some(400));
        assert_eq!(err.key(), "test_error_key");
        assert!(err.values().is_some());
    }

    #[test]
    fn test_setters_mutate_in_place() {
        let mut err = TranslatableError::default();
        err.set_code(404);
        err.set_section("users");
        err.set_key("not_found");
        err.set_values(values("{id}", 7i64));
        err.set_locale("cz");

        assert_eq!(err.code(), Some(404));
        assert_eq!(err.to_string(), "users.not_found");
        assert_eq!(err.locale(), Some("cz"));
        assert_eq!(err.values(), Some(&values("{id}", 7i64)));
    }

    #[test]
    fn test_builders_chain() {
        let err = TranslatableError::default()
            .with_section("errors.connections")
            .with_key("connections_limit")
            .with_values(values("{count}", 3i64))
            .with_code(429)
            .with_locale("en");

        assert_eq!(err.code(), Some(429));
        assert_eq!(err.locale(), Some("en"));
        assert_eq!(err.to_string(), "errors.connections.connections_limit");
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_display_section_and_key() {
        assert_eq!(TranslatableError::new("a.b", "c", None).to_string(), "a.b.c");
    }

    #[test]
    fn test_display_section_only() {
        assert_eq!(TranslatableError::new("a.b", "", None).to_string(), "a.b");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(TranslatableError::new("s", "k", None));
        assert_eq!(err.to_string(), "s.k");
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_translation_accessors_ignore_stored_locale() {
        let registry = registry();
        let err = TranslatableError::new(
            "errors.connections",
            "connections_limit",
            Some(values("{count}", 5i64)),
        )
        .with_locale("cz");
        let english = registry.translator("en");

        assert_eq!(err.t(&english), "Connections limit is {count}");
        assert_eq!(err.tf(&english), "Connections limit is 5");
        assert_eq!(err.err_t(&english).to_string(), "Connections limit is {count}");
        assert_eq!(err.err_tf(&english).to_string(), "Connections limit is 5");
    }

    #[test]
    fn test_tf_without_values_equals_t() {
        let registry = registry();
        let err = TranslatableError::new("fields.errors", "to_short", None);
        assert_eq!(err.tf(&registry.translator("cz")), "Pole je příliš krátké");
    }

    #[test]
    fn test_resolve_uses_stored_locale() {
        let registry = registry();
        let err = TranslatableError::new(
            "errors.connections",
            "connections_limit",
            Some(values("{count}", 10i64)),
        )
        .with_locale("cz");
        assert_eq!(err.resolve(&registry), "Limit připojení je 10");
    }

    #[test]
    fn test_resolve_defaults_to_registry_locale() {
        let registry = registry();
        let err = TranslatableError::new("fields.errors", "to_short", None);
        assert_eq!(err.resolve(&registry), "Field too short");
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_serialize_empty_is_null() {
        let registry = registry();
        let err = TranslatableError::default();
        assert_eq!(serde_json::to_string(&err.render(&registry)).unwrap(), "null");
        assert_eq!(serde_json::to_string(&err).unwrap(), "null");
    }

    #[test]
    fn test_serialize_identity_form() {
        let err = TranslatableError::new("user_section", "error_key", None);
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"user_section":"error_key"}"#
        );
    }

    #[test]
    fn test_serialize_section_only() {
        let err = TranslatableError::new("user_section", "", None);
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"user_section":""}"#);
    }

    #[test]
    fn test_serialize_empty_locale_is_identity_form() {
        let err = TranslatableError::new("user_section", "error_key", None).with_locale("");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"user_section":"error_key"}"#
        );
    }

    #[test]
    fn test_render_with_locale() {
        let registry = registry();
        let err = TranslatableError::new("section.sub_section", "key", None).with_locale("cz");
        assert_eq!(
            serde_json::to_string(&err.render(&registry)).unwrap(),
            r#""Přeložené pole""#
        );
    }

    #[test]
    fn test_render_with_values() {
        let registry = registry();
        let err = TranslatableError::new(
            "errors.connections",
            "connections_limit",
            Some(values("{count}", 5i64)),
        )
        .with_locale("en");
        assert_eq!(
            serde_json::to_value(err.render(&registry)).unwrap(),
            json!("Connections limit is 5")
        );
    }

    #[test]
    fn test_render_uninitialized_registry_fails() {
        let err = TranslatableError::new("s", "k", None).with_locale("en");
        assert!(serde_json::to_string(&err.render(&Registry::new())).is_err());
    }

    #[test]
    fn test_serialize_nested_none() {
        #[derive(Serialize)]
        struct Response {
            data: &'static str,
            error: Option<TranslatableError>,
        }

        let response = Response {
            data: "test_data",
            error: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"data":"test_data","error":null}"#
        );

        let response = Response {
            data: "test_data",
            error: Some(TranslatableError::new("user_section", "error_key", None)),
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"data":"test_data","error":{"user_section":"error_key"}}"#
        );
    }

    // ==================== Deserialization Tests ====================

    #[test]
    fn test_deserialize_identity_form() {
        let err: TranslatableError =
            serde_json::from_str(r#"{"fields.errors":"to_short"}"#).unwrap();
        assert_eq!(err.section(), "fields.errors");
        assert_eq!(err.key(), "to_short");
        assert_eq!(err.locale(), None);
    }

    #[test]
    fn test_deserialize_rejects_multiple_entries() {
        let result = serde_json::from_str::<TranslatableError>(r#"{"a":"b","c":"d"}"#);
        assert!(result.is_err());
        assert!(serde_json::from_str::<TranslatableError>("{}").is_err());
    }

    #[test]
    fn test_deserialize_null_option() {
        let err: Option<TranslatableError> = serde_json::from_str("null").unwrap();
        assert!(err.is_none());
    }

    #[test]
    fn test_entry_tf_empty_values() {
        let registry = registry();
        let entry = ErrorEntry::new("fields.errors", "to_short", Some(Values::new()));
        assert_eq!(entry.tf(&registry.translator("en")), "Field too short");
    }
}
