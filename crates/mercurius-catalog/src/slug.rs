//! URL slugs derived from product names.
//!
//! Slugs contain only lowercase ASCII letters, digits and single interior
//! hyphens. Accented letters are folded to their base letter through
//! canonical decomposition, so "Sofá" becomes "sofa".

use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base used by [`slug_for`] when a name normalises to nothing.
pub const FALLBACK_SLUG: &str = "product";

/// Convert arbitrary text into a slug.
///
/// ```
/// use mercurius_catalog::slug::normalize;
/// assert_eq!(normalize("Sofá Retrátil 3 Lugares"), "sofa-retratil-3-lugares");
/// assert_eq!(normalize("  --Mesa   de  Jantar!-- "), "mesa-de-jantar");
/// ```
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        }
        // Anything else is dropped without breaking a hyphen run.
    }

    slug
}

/// Return `base` if unused, otherwise the first free `base-N` for N = 1, 2, ...
///
/// ```
/// use std::collections::HashSet;
/// use mercurius_catalog::slug::assign_unique_slug;
///
/// let taken: HashSet<String> = ["mesa".to_string(), "mesa-1".to_string()].into();
/// assert_eq!(assign_unique_slug("mesa", &taken), "mesa-2");
/// ```
pub fn assign_unique_slug(base: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Normalise `name` and make it unique against `existing`.
///
/// Names with no slug-worthy characters fall back to [`FALLBACK_SLUG`].
pub fn slug_for(name: &str, existing: &HashSet<String>) -> String {
    let base = normalize(name);
    let base = if base.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        base
    };
    assign_unique_slug(&base, existing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_folds_accents_and_case() {
        assert_eq!(normalize("Sofá Retrátil 3 Lugares"), "sofa-retratil-3-lugares");
        assert_eq!(normalize("AÇÚCAR Mascavo"), "acucar-mascavo");
        assert_eq!(normalize("Geladeira Brastemp Frost Free"), "geladeira-brastemp-frost-free");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Mesa (6 cadeiras) + banco!"), "mesa-6-cadeiras-banco");
        assert_eq!(normalize("a.b"), "ab");
        assert_eq!(normalize("snake_case_name"), "snakecasename");
    }

    #[test]
    fn test_normalize_collapses_hyphens_and_trims() {
        assert_eq!(normalize("--a -- b--"), "a-b");
        assert_eq!(normalize("a . b"), "a-b");
        assert_eq!(normalize("\tTV\n 50\"  "), "tv-50");
    }

    #[test]
    fn test_normalize_degenerate_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize("日本"), "");
    }

    #[test]
    fn test_assign_unique_slug() {
        assert_eq!(assign_unique_slug("mesa", &set(&[])), "mesa");
        assert_eq!(assign_unique_slug("mesa", &set(&["mesa"])), "mesa-1");
        assert_eq!(assign_unique_slug("mesa", &set(&["mesa", "mesa-1"])), "mesa-2");
        assert_eq!(assign_unique_slug("mesa", &set(&["mesa", "mesa-2"])), "mesa-1");
    }

    #[test]
    fn test_assign_unique_slug_empty_base() {
        assert_eq!(assign_unique_slug("", &set(&["", "-1"])), "-2");
    }

    #[test]
    fn test_slug_for_uses_fallback() {
        assert_eq!(slug_for("???", &set(&[])), "product");
        assert_eq!(slug_for("???", &set(&["product"])), "product-1");
        assert_eq!(slug_for("Cômoda", &set(&["comoda"])), "comoda-1");
    }
}
