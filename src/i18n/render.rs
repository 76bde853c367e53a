//! Locale-aware serialization against an explicit registry.
//!
//! Translatable errors serialize through [`Registry::global`] by default.
//! [`Localize::render`] wraps a value together with a chosen registry so the
//! boundary layer decides where translations come from.

use crate::i18n::{Registry, Translator};
use serde::{Serialize, Serializer};

/// Values whose serialized form depends on a registry's translators.
pub trait Localize {
    /// Serialize `self`, resolving any explicit locale through `registry`.
    fn serialize_localized<S: Serializer>(
        &self,
        registry: &Registry,
        serializer: S,
    ) -> Result<S::Ok, S::Error>;

    /// Pair `self` with `registry` for serialization.
    fn render<'a>(&'a self, registry: &'a Registry) -> Rendered<'a, Self>
    where
        Self: Sized,
    {
        Rendered {
            value: self,
            registry,
        }
    }
}

/// A translatable value bound to the registry that will resolve it.
#[derive(Debug)]
pub struct Rendered<'a, T> {
    value: &'a T,
    registry: &'a Registry,
}

impl<T: Localize> Serialize for Rendered<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize_localized(self.registry, serializer)
    }
}

/// The explicit locale, ignoring empty strings.
pub(crate) fn active_locale(locale: &Option<String>) -> Option<&str> {
    locale.as_deref().filter(|locale| !locale.is_empty())
}

/// Translator for `locale`, or a serialization error when `registry` is not
/// initialized.
pub(crate) fn translator_for<E: serde::ser::Error>(
    registry: &Registry,
    locale: &str,
) -> Result<Translator, E> {
    registry.try_translator(locale).ok_or_else(|| {
        E::custom(format!(
            "cannot translate into '{}': translator registry not initialized",
            locale
        ))
    })
}
