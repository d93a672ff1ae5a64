//! Locale-aware name ordering.
//!
//! A three-level comparison close to the default collation of browsers:
//! base letters first, then accents, then case with lowercase ahead of
//! uppercase. "cafe" < "café" < "Café" < "casa".

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two display names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary(a)
        .cmp(primary(b))
        .then_with(|| secondary(a).cmp(secondary(b)))
        .then_with(|| tertiary(a).cmp(tertiary(b)))
        .then_with(|| a.cmp(b))
}

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn secondary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn tertiary(s: &str) -> impl Iterator<Item = (bool, char)> + '_ {
    s.nfd().map(|c| (c.is_uppercase(), c))
}
