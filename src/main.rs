//! Dictionary lookup binary - resolves one translation from a dictionaries directory
//!
//! Usage:
//!   cargo run -- <locale> <section> <key> [token=value ...]
//!   cargo run -- cs_CZ errors.connections connections_limit {count}=5
//!
//! Required environment variables:
//! - I18N_DICTIONARIES_DIR
//!
//! Optional:
//! - I18N_DEFAULT_LOCALE (defaults to en)
//! - I18N_LOCALES (comma-separated, defaults to every dictionary in the directory)

use anyhow::{bail, Context, Result};
use locale_dict::config::Config;
use locale_dict::i18n::{Registry, Value, Values};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_dict=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [locale, section, key, substitutions @ ..] = args.as_slice() else {
        bail!("usage: dict-lookup <locale> <section> <key> [token=value ...]");
    };
    let values = parse_values(substitutions)?;

    let config = Config::from_env()?;
    let registry = Registry::global();
    registry
        .init_from_config(&config)
        .with_context(|| {
            format!(
                "Failed to load dictionaries from {}",
                config.dictionaries_dir.display()
            )
        })?;

    if !registry.available_locales().contains(locale) {
        info!(
            "Locale '{}' not available, using default '{}'",
            locale,
            registry.default_locale()
        );
    }

    let translator = registry.translator(locale);
    let translated = if values.is_empty() {
        translator.t(section, key)
    } else {
        translator.tf(section, key, &values)
    };
    println!("{}", translated);

    Ok(())
}

/// Parse `token=value` pairs; values become integers, then floats, then text.
fn parse_values(pairs: &[String]) -> Result<Values> {
    pairs
        .iter()
        .map(|pair| {
            let (token, raw) = pair
                .split_once('=')
                .with_context(|| format!("Expected token=value, got '{}'", pair))?;
            let value = if let Ok(integer) = raw.parse::<i64>() {
                Value::Integer(integer)
            } else if let Ok(float) = raw.parse::<f64>() {
                Value::Float(float)
            } else {
                Value::from(raw)
            };
            Ok((token.to_string(), value))
        })
        .collect()
}
