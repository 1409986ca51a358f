// crates/regionpick-core/src/text.rs
use std::cmp::Ordering;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Žilina` -> `Zilina`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use regionpick_core::text::fold_key;
///
/// assert_eq!(fold_key("Žilinský kraj"), "zilinsky kraj");
/// assert_eq!(fold_key("Košice"), "kosice");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Locale-aware ordering for display names.
///
/// Names compare by their folded form first, so accented letters sort next
/// to their base letter instead of after `z`. Names that fold to the same key
/// fall back to the exact text.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_sort_with_base_letter() {
        let mut names = vec!["Žilinský", "Banskobystrický", "Zlínský", "Trnavský", "Šariš"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(
            names,
            ["Banskobystrický", "Šariš", "Trnavský", "Žilinský", "Zlínský"]
        );
    }

    #[test]
    fn case_does_not_dominate() {
        assert_eq!(collate("bratislava", "Košice"), Ordering::Less);
    }
}
