// crates/regionpick-core/src/i18n.rs

//! Localization seam.
//!
//! The picker never owns translations. It asks a [`Localizer`] for display
//! strings and for the ambient language used when no explicit tag is given.

use crate::error::Result;
use std::collections::HashMap;

pub trait Localizer {
    /// Returns the display string for `key`.
    fn t(&self, key: &str) -> String;

    /// Ambient locale tag of the host (e.g. `"sk"` or `"de-AT"`).
    fn current_language(&self) -> String;
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn t(&self, key: &str) -> String {
        (**self).t(key)
    }

    fn current_language(&self) -> String {
        (**self).current_language()
    }
}

impl<L: Localizer + ?Sized> Localizer for Box<L> {
    fn t(&self, key: &str) -> String {
        (**self).t(key)
    }

    fn current_language(&self) -> String {
        (**self).current_language()
    }
}

/// Adapter for a plain translation closure plus a fixed language.
pub struct FnLocalizer<F> {
    translate: F,
    language: String,
}

impl<F: Fn(&str) -> String> FnLocalizer<F> {
    pub fn new(language: impl Into<String>, translate: F) -> Self {
        Self {
            translate,
            language: language.into(),
        }
    }
}

impl<F: Fn(&str) -> String> Localizer for FnLocalizer<F> {
    fn t(&self, key: &str) -> String {
        (self.translate)(key)
    }

    fn current_language(&self) -> String {
        self.language.clone()
    }
}

/// A flat key → string table for one language.
///
/// Missing keys translate to themselves, so an incomplete catalog still
/// renders something recognizable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    strings: HashMap<String, String>,
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            strings: HashMap::new(),
        }
    }

    /// Parses a JSON object of `"key": "text"` pairs.
    pub fn from_json_slice(language: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let strings: HashMap<String, String> = serde_json::from_slice(bytes)?;
        Ok(Self {
            language: language.into(),
            strings,
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.strings.insert(key.into(), text.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Localizer for Catalog {
    fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn current_language(&self) -> String {
        self.language.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_falls_back_to_key() {
        let catalog = Catalog::new("sk").with("country.sk", "Slovensko");
        assert_eq!(catalog.t("country.sk"), "Slovensko");
        assert_eq!(catalog.t("country.cz"), "country.cz");
        assert_eq!(catalog.current_language(), "sk");
    }

    #[test]
    fn catalog_from_json() {
        let catalog =
            Catalog::from_json_slice("de", r#"{ "select_country": "Land wählen" }"#.as_bytes())
                .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.t("select_country"), "Land wählen");
    }

    #[test]
    fn closure_localizer() {
        let loc = FnLocalizer::new("cs-CZ", |key: &str| key.to_uppercase());
        assert_eq!(loc.t("abc"), "ABC");
        assert_eq!(loc.current_language(), "cs-CZ");
    }
}
