//! Translation dictionaries, translators and translatable errors.
//!
//! # Architecture
//!
//! - `dictionary`: section → key → template data and loaders
//! - `translator`: lookup and literal placeholder substitution for one locale
//! - `registry`: locale → translator mapping with default-locale fallback
//! - `translatable`: errors that carry a (section, key) identity
//! - `multi`: field-keyed collections of translatable errors
//! - `render`: serialization against an explicit registry
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_dict::i18n::{Registry, TranslatableError};
//!
//! let registry = Registry::global();
//! registry.init_from_dir("en", "locales", &[])?;
//!
//! let title = registry.translator("cs_CZ").t("form.login", "title");
//! let err = TranslatableError::new("errors", "unknown", None).with_locale("cs_CZ");
//! let body = serde_json::to_string(&err)?; // "Neznámá chyba"
//! ```

mod dictionary;
mod error;
mod multi;
mod registry;
mod render;
mod translatable;
mod translator;

pub use dictionary::{
    parse_dictionary, Dictionary, DictionaryCollection, DictionaryEntry, DictionaryLoader,
    JsonDirLoader, DICTIONARY_EXTENSION,
};
pub use error::RegistryError;
pub use multi::{
    TranslatableMultiError, ERROR_SECTION, FIELD_ERROR_CODE, SUMMARY_ERROR_CODE, SUMMARY_FIELD,
};
pub use registry::Registry;
pub use render::{Localize, Rendered};
pub use translatable::{ErrorEntry, TranslatableError};
pub use translator::{Translator, Value, Values};
