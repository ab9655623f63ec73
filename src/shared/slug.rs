use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::validation::SLUG_REGEX;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a URL-safe slug from a display name.
///
/// Lower-cases the input, collapses every run of non-alphanumeric characters
/// into a single `-` and trims leading/trailing dashes. Slugs are not unique.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let slug = NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();
    debug_assert!(slug.is_empty() || SLUG_REGEX.is_match(&slug));
    slug
}
