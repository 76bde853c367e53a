//! Translator registry: locale → translator, default locale and available locales.
//!
//! A `Registry` can be owned and passed around explicitly, and a process-wide
//! instance is available through [`Registry::global`] (created lazily with
//! `OnceLock`). Initialization builds a complete snapshot and swaps it in under
//! the write lock, so readers always see either the old or the new state and a
//! failed initialization leaves the previous state in place.

use crate::config::Config;
use crate::i18n::{
    DictionaryCollection, DictionaryLoader, JsonDirLoader, RegistryError, Translator,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{info, warn};

const NOT_INITIALIZED: &str = "translator registry not initialized";

/// Immutable registry content swapped in by each initialization.
#[derive(Debug)]
struct Snapshot {
    translators: HashMap<String, Translator>,
    default_locale: String,
    available_locales: Vec<String>,
}

impl Snapshot {
    fn translator(&self, locale: &str) -> Translator {
        self.translators
            .get(locale)
            .or_else(|| self.translators.get(&self.default_locale))
            .cloned()
            .unwrap_or_default()
    }
}

/// Registry of per-locale translators.
#[derive(Debug, Default)]
pub struct Registry {
    state: RwLock<Option<Arc<Snapshot>>>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create an uninitialized registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide registry instance.
    ///
    /// The instance starts uninitialized; one of the `init_*` methods must be
    /// called before translators are requested from it.
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::new)
    }

    /// Initialize from in-memory dictionaries.
    ///
    /// # Arguments
    /// * `default_locale` - Locale used when a requested locale has no translator
    /// * `collection` - Locale → dictionary data
    /// * `locales` - Locales to expose; empty means every locale in `collection`
    ///
    /// # Errors
    /// `Configuration` when `collection` has no dictionary for the default
    /// locale, when no locales are available, or when the default locale is
    /// excluded by `locales`.
    pub fn init_from_dictionaries(
        &self,
        default_locale: &str,
        mut collection: DictionaryCollection,
        locales: &[&str],
    ) -> Result<(), RegistryError> {
        if !collection.contains_key(default_locale) {
            return Err(RegistryError::configuration(format!(
                "no dictionary for default locale '{}'",
                default_locale
            )));
        }

        let available_locales: Vec<String> = if locales.is_empty() {
            collection.keys().cloned().collect()
        } else {
            locales.iter().map(|locale| locale.to_string()).collect()
        };

        let mut translators = HashMap::with_capacity(available_locales.len());
        for locale in &available_locales {
            match collection.remove(locale) {
                Some(dictionary) => {
                    translators.insert(locale.clone(), Translator::new(dictionary));
                }
                // Duplicates in `locales` were already consumed above.
                None if translators.contains_key(locale) => {}
                None => warn!("No dictionary for locale '{}', skipping", locale),
            }
        }

        self.install(default_locale, translators, available_locales)
    }

    /// Initialize from `<path>/<locale>.json` files.
    ///
    /// When `locales` is empty every `*.json` file in `path` is loaded.
    ///
    /// # Errors
    /// `Io` when the directory or a locale file cannot be read, `Decode` when a
    /// file is not a valid dictionary, and `Configuration` as for
    /// [`Registry::init_from_dictionaries`].
    pub fn init_from_dir(
        &self,
        default_locale: &str,
        path: impl AsRef<Path>,
        locales: &[&str],
    ) -> Result<(), RegistryError> {
        self.init_from_loader(default_locale, &JsonDirLoader::new(path.as_ref()), locales)
    }

    /// Initialize from any [`DictionaryLoader`].
    ///
    /// # Errors
    /// Loader errors are returned unchanged; `Configuration` as for
    /// [`Registry::init_from_dictionaries`].
    pub fn init_from_loader(
        &self,
        default_locale: &str,
        loader: &dyn DictionaryLoader,
        locales: &[&str],
    ) -> Result<(), RegistryError> {
        let available_locales = if locales.is_empty() {
            loader.discover()?
        } else {
            locales.iter().map(|locale| locale.to_string()).collect()
        };

        let mut translators = HashMap::with_capacity(available_locales.len());
        for locale in &available_locales {
            if !translators.contains_key(locale) {
                translators.insert(locale.clone(), Translator::new(loader.load(locale)?));
            }
        }

        self.install(default_locale, translators, available_locales)
    }

    /// Initialize from application configuration.
    ///
    /// # Errors
    /// Same as [`Registry::init_from_dir`].
    pub fn init_from_config(&self, config: &Config) -> Result<(), RegistryError> {
        let locales: Vec<&str> = config.locales.iter().map(String::as_str).collect();
        self.init_from_dir(&config.default_locale, &config.dictionaries_dir, &locales)
    }

    fn install(
        &self,
        default_locale: &str,
        translators: HashMap<String, Translator>,
        available_locales: Vec<String>,
    ) -> Result<(), RegistryError> {
        if available_locales.is_empty() {
            return Err(RegistryError::configuration("available locales not set"));
        }
        if !translators.contains_key(default_locale) {
            return Err(RegistryError::configuration(format!(
                "default locale '{}' is not among the available locales",
                default_locale
            )));
        }

        info!(
            "Initialized translator registry: default '{}', locales [{}]",
            default_locale,
            available_locales.join(", ")
        );

        let snapshot = Arc::new(Snapshot {
            translators,
            default_locale: default_locale.to_string(),
            available_locales,
        });
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        Ok(())
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn initialized_snapshot(&self) -> Arc<Snapshot> {
        self.snapshot().unwrap_or_else(|| panic!("{}", NOT_INITIALIZED))
    }

    /// Whether an initialization has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Get the translator for `locale`.
    ///
    /// Falls back to the default locale's translator, then to an empty
    /// translator whose lookups all return `section.key`.
    ///
    /// # Panics
    /// Panics if the registry has not been initialized. This is a usage error,
    /// not a recoverable condition.
    pub fn translator(&self, locale: &str) -> Translator {
        self.initialized_snapshot().translator(locale)
    }

    /// Like [`Registry::translator`], but returns `None` instead of panicking
    /// when the registry is not initialized.
    pub fn try_translator(&self, locale: &str) -> Option<Translator> {
        self.snapshot().map(|snapshot| snapshot.translator(locale))
    }

    /// Locales exposed by the last initialization, in configured order.
    ///
    /// # Panics
    /// Panics if the registry has not been initialized.
    pub fn available_locales(&self) -> Vec<String> {
        self.initialized_snapshot().available_locales.clone()
    }

    /// The configured default locale.
    ///
    /// # Panics
    /// Panics if the registry has not been initialized.
    pub fn default_locale(&self) -> String {
        self.initialized_snapshot().default_locale.clone()
    }
}
