//! Locale-bound lookup and placeholder substitution.

use crate::i18n::Dictionary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Substitution values keyed by the literal token they replace (e.g. `"{count}"`).
pub type Values = HashMap<String, Value>;

/// A value that can be substituted into a translation template.
///
/// Only text, signed integers and floats are rendered. Anything else is kept
/// as `Other` and leaves its token in the template untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(serde_json::Value),
}

impl Value {
    /// Render the value for substitution, or `None` when it is skipped.
    ///
    /// Floats always carry six decimal places (`2.5` renders as `2.500000`).
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::Integer(number) => Some(number.to_string()),
            Value::Float(number) => Some(format!("{:.6}", number)),
            Value::Other(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Other(serde_json::Value::Bool(value))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Value::Integer(integer)
                } else if number.is_f64() {
                    Value::Float(number.as_f64().unwrap_or_default())
                } else {
                    // u64 beyond i64::MAX
                    Value::Other(serde_json::Value::Number(number))
                }
            }
            other => Value::Other(other),
        }
    }
}

/// Translator bound to a single locale's dictionary.
///
/// Cloning is cheap: the dictionary is shared and never mutated. A translator
/// without a dictionary answers every lookup with the `section.key` fallback.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    dictionary: Option<Arc<Dictionary>>,
}

impl Translator {
    pub fn new(dictionary: impl Into<Arc<Dictionary>>) -> Self {
        Self {
            dictionary: Some(dictionary.into()),
        }
    }

    /// A translator with no dictionary.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    fn template(&self, section: &str, key: &str) -> Option<&str> {
        let template = self
            .dictionary
            .as_deref()
            .and_then(|dictionary| dictionary.get(section))
            .and_then(|entry| entry.get(key))
            .map(String::as_str);
        if template.is_none() {
            trace!("Missing translation for {}.{}", section, key);
        }
        template
    }

    /// Translated string for `section`/`key`, or `section.key` when missing.
    pub fn t(&self, section: &str, key: &str) -> String {
        match self.template(section, key) {
            Some(template) => template.to_string(),
            None => fallback(section, key),
        }
    }

    /// Translated string with every occurrence of each value's token replaced.
    ///
    /// Tokens are plain substrings, so overlapping tokens are replaced in an
    /// unspecified order. Missing translations ignore `values` entirely.
    pub fn tf(&self, section: &str, key: &str, values: &Values) -> String {
        let Some(template) = self.template(section, key) else {
            return fallback(section, key);
        };

        let mut translated = template.to_string();
        for (token, value) in values {
            if let Some(rendered) = value.render() {
                translated = translated.replace(token.as_str(), &rendered);
            }
        }
        translated
    }

    /// [`Translator::t`] wrapped as an error.
    pub fn err_t(&self, section: &str, key: &str) -> anyhow::Error {
        anyhow::Error::msg(self.t(section, key))
    }

    /// [`Translator::tf`] wrapped as an error.
    pub fn err_tf(&self, section: &str, key: &str, values: &Values) -> anyhow::Error {
        anyhow::Error::msg(self.tf(section, key, values))
    }
}

fn fallback(section: &str, key: &str) -> String {
    format!("{}.{}", section, key)
}
