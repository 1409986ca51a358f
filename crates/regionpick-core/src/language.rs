// crates/regionpick-core/src/language.rs

//! # Default Country Inference
//!
//! Maps the primary language subtag of a locale tag onto the country that
//! should be preselected in the picker.

/// Country used for any language without an explicit entry.
pub const DEFAULT_COUNTRY: &str = "SK";

/// Languages with a known default country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Slovak,
    Czech,
    German,
    Italian,
    Polish,
    Hungarian,
    English,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Slovak,
        Language::Czech,
        Language::German,
        Language::Italian,
        Language::Polish,
        Language::Hungarian,
        Language::English,
    ];

    /// Lowercase ISO 639-1 subtag.
    pub fn subtag(self) -> &'static str {
        match self {
            Language::Slovak => "sk",
            Language::Czech => "cs",
            Language::German => "de",
            Language::Italian => "it",
            Language::Polish => "pl",
            Language::Hungarian => "hu",
            Language::English => "en",
        }
    }

    /// Country preselected for speakers of this language.
    ///
    /// English has no country of its own in the dataset and keeps the
    /// application default.
    pub fn default_country(self) -> &'static str {
        match self {
            Language::Slovak => "SK",
            Language::Czech => "CZ",
            Language::German => "DE",
            Language::Italian => "IT",
            Language::Polish => "PL",
            Language::Hungarian => "HU",
            Language::English => DEFAULT_COUNTRY,
        }
    }

    /// Resolves an already-normalized subtag (lowercase, no region).
    pub fn from_subtag(subtag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.subtag() == subtag)
    }
}

/// Extracts the primary subtag: text before the first `-` (or `_`), trimmed
/// and lowercased. `"en-US"` becomes `"en"`, `"sk_SK"` becomes `"sk"`.
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Infers the default country for a locale tag. Total: unknown or empty
/// tags yield [`DEFAULT_COUNTRY`].
pub fn infer_default_country(tag: &str) -> &'static str {
    Language::from_subtag(&primary_subtag(tag))
        .map(Language::default_country)
        .unwrap_or(DEFAULT_COUNTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_subtags() {
        let cases = [
            ("sk", "SK"),
            ("cs", "CZ"),
            ("de", "DE"),
            ("it", "IT"),
            ("pl", "PL"),
            ("hu", "HU"),
        ];
        for (tag, country) in cases {
            assert_eq!(infer_default_country(tag), country, "tag {tag}");
        }
    }

    #[test]
    fn unmapped_subtag_falls_back() {
        assert_eq!(infer_default_country("fr"), "SK");
        assert_eq!(infer_default_country(""), "SK");
        assert_eq!(infer_default_country("   "), "SK");
    }

    #[test]
    fn region_and_case_are_stripped() {
        assert_eq!(infer_default_country("en-US"), "SK");
        assert_eq!(infer_default_country("DE-at"), "DE");
        assert_eq!(infer_default_country("cs_CZ"), "CZ");
        assert_eq!(primary_subtag(" Hu-HU "), "hu");
    }

    #[test]
    fn every_language_round_trips_its_subtag() {
        for lang in Language::ALL {
            assert_eq!(Language::from_subtag(lang.subtag()), Some(lang));
        }
    }
}
