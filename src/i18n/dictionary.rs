//! Dictionary data model and loaders.
//!
//! A dictionary maps section → key → template. Sections are caller-defined
//! namespaces such as `form.login`; the dots carry no structure.
//!
//! ```json
//! {
//!     "errors.connections": { "connections_limit": "Connections limit is {count}" },
//!     "form.login": { "title": "Hello, {name}" }
//! }
//! ```

use crate::i18n::RegistryError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of dictionary documents inside a dictionaries directory.
pub const DICTIONARY_EXTENSION: &str = "json";

/// Key → translation template.
pub type DictionaryEntry = BTreeMap<String, String>;

/// Section → key → translation template.
pub type Dictionary = BTreeMap<String, DictionaryEntry>;

/// Locale → section → key → translation template.
pub type DictionaryCollection = BTreeMap<String, Dictionary>;

/// Decode a dictionary document from raw JSON bytes.
pub fn parse_dictionary(bytes: &[u8]) -> Result<Dictionary, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Source of per-locale dictionaries for registry initialization.
pub trait DictionaryLoader {
    /// Load the dictionary for one locale.
    fn load(&self, locale: &str) -> Result<Dictionary, RegistryError>;

    /// List the locales this loader can provide, in a stable order.
    fn discover(&self) -> Result<Vec<String>, RegistryError>;
}

/// Loads `<root>/<locale>.json` files.
#[derive(Debug, Clone)]
pub struct JsonDirLoader {
    root: PathBuf,
}

impl JsonDirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the dictionary file for `locale`.
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.{}", locale, DICTIONARY_EXTENSION))
    }
}

impl DictionaryLoader for JsonDirLoader {
    fn load(&self, locale: &str) -> Result<Dictionary, RegistryError> {
        let path = self.path_for(locale);
        let bytes = fs::read(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let dictionary =
            parse_dictionary(&bytes).map_err(|source| RegistryError::Decode {
                path: path.clone(),
                source,
            })?;

        debug!(
            "Loaded dictionary for '{}' from {} ({} sections)",
            locale,
            path.display(),
            dictionary.len()
        );
        Ok(dictionary)
    }

    fn discover(&self) -> Result<Vec<String>, RegistryError> {
        let io_err = |source| RegistryError::Io {
            path: self.root.clone(),
            source,
        };

        let mut locales = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DICTIONARY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                locales.push(stem.to_string());
            }
        }
        locales.sort();

        debug!(
            "Discovered {} dictionaries in {}",
            locales.len(),
            self.root.display()
        );
        Ok(locales)
    }
}
