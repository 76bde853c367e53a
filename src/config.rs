use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Directory holding one `<locale>.json` dictionary per locale
    pub dictionaries_dir: PathBuf,

    // Locale used when a requested locale has no dictionary
    pub default_locale: String,

    // Locales to load; empty means every dictionary in the directory
    pub locales: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            dictionaries_dir: std::env::var("I18N_DICTIONARIES_DIR")
                .context("I18N_DICTIONARIES_DIR not set")?
                .into(),
            default_locale: std::env::var("I18N_DEFAULT_LOCALE")
                .unwrap_or_else(|_| "en".to_string()),
            locales: std::env::var("I18N_LOCALES")
                .map(|v| parse_locales(&v))
                .unwrap_or_default(),
        })
    }
}

/// Split a comma-separated locale list, dropping blanks.
fn parse_locales(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|locale| !locale.is_empty())
        .map(str::to_string)
        .collect()
}
