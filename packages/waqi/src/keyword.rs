//! Ward keyword cleanup for station search.
//!
//! Ward names arrive as free text like `"Dwarka Sector 8, New Delhi"`.
//! Only the locality part is useful to WAQI's station search.

use std::sync::LazyLock;

use regex::Regex;

static SECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Sector\s?\d+").expect("valid regex"));

/// Wards without a station of their own, mapped to the closest locality
/// that has one.
const FALLBACK_LOCALITIES: &[(&str, &str)] = &[
    ("Najafgarh", "Dwarka"),
    ("Mundka", "Dwarka"),
    ("Nangloi", "Dwarka"),
    ("Uttam Nagar", "Dwarka"),
];

/// Minimum length (exclusive) for a keyword to be worth searching.
const MIN_KEYWORD_LEN: usize = 3;

/// Takes the first comma-separated segment, drops the first
/// `Sector <n>` token and trims.
#[must_use]
pub fn clean_keyword(keyword: &str) -> String {
    let first = keyword.split(',').next().unwrap_or_default();
    SECTOR_RE.replace(first, "").trim().to_string()
}

/// Maps a cleaned locality onto its fallback station locality, if any.
#[must_use]
pub fn fallback_locality(locality: &str) -> Option<&'static str> {
    FALLBACK_LOCALITIES
        .iter()
        .find(|(ward, _)| *ward == locality)
        .map(|(_, station)| *station)
}

/// Cleans a keyword, applies the fallback mapping, and returns it only if
/// it is long enough to search for.
#[must_use]
pub fn search_keyword(keyword: &str) -> Option<String> {
    let mut cleaned = clean_keyword(keyword);

    if let Some(mapped) = fallback_locality(&cleaned) {
        log::info!("Applying fallback mapping: {cleaned} -> {mapped}");
        cleaned = mapped.to_string();
    }

    (cleaned.chars().count() > MIN_KEYWORD_LEN).then_some(cleaned)
}
