// src/table/district.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// District names arrive in several shapes depending on which upstream export a
/// file came from: `Ankara(Akyurt)`, `Ankara - Akyurt`, or the bare name.
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid district pattern"));

/// Extract a bare district name. Fallback order: parenthetical extraction, then
/// dash split (text after the first dash), then the raw trimmed input.
pub fn normalize_district(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(caps) = PARENTHESIZED.captures(trimmed) {
        let inner = caps[1].trim();
        if !inner.is_empty() {
            return inner.to_string();
        }
    }

    if let Some((_, after)) = trimmed.split_once('-') {
        let after = after.trim();
        if !after.is_empty() {
            return after.to_string();
        }
    }

    trimmed.to_string()
}

/// Resolve a positional header column to a district label. A blank column means
/// the row aggregates the whole province rather than a named sub-region.
pub fn resolve_header(header: &str, province_wide: &str) -> String {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        province_wide.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Case-insensitive district comparison. District names are Turkish, so this goes
/// through full Unicode lowercasing rather than the ASCII shortcut.
pub fn district_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthetical_wins() {
        assert_eq!(normalize_district("Ankara(Akyurt)"), "Akyurt");
        assert_eq!(normalize_district("  Ankara( Çankaya )  "), "Çankaya");
    }

    #[test]
    fn dash_split_is_second() {
        assert_eq!(normalize_district("Ankara - Akyurt"), "Akyurt");
        assert_eq!(normalize_district("Ankara-Polatlı"), "Polatlı");
    }

    #[test]
    fn raw_trim_is_last() {
        assert_eq!(normalize_district("  Akyurt "), "Akyurt");
        assert_eq!(normalize_district("Ankara()"), "Ankara()");
    }

    #[test]
    fn blank_header_maps_to_sentinel() {
        assert_eq!(resolve_header("  ", "Ankara (Genel)"), "Ankara (Genel)");
        assert_eq!(resolve_header(" Akyurt ", "Ankara (Genel)"), "Akyurt");
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(district_eq("AKYURT", "akyurt"));
        assert!(district_eq(" Akyurt", "AKYURT "));
        assert!(!district_eq("Akyurt", "Çankaya"));
    }
}
