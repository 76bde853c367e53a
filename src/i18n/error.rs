//! Errors raised while loading dictionaries and initializing the registry.
//!
//! Lookups never fail: a missing translation resolves to the literal
//! `section.key` string, so nothing here is returned after initialization.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by registry initialization.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The supplied data cannot produce a usable registry (for example the
    /// default locale has no dictionary, or no locales are available).
    #[error("invalid translator configuration: {0}")]
    Configuration(String),

    /// A dictionary file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary document is not a `{section: {key: template}}` object.
    #[error("failed to decode dictionary {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
