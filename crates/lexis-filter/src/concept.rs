use once_cell::sync::Lazy;
use regex::Regex;

// Leftmost marker wins; at equal positions the plural form is tried first.
static CONCEPT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\b(?:liés à|lié à|sur|concernant|à propos de)\s+(.+)").unwrap()
});

/// Subject phrase following the first relation marker, or `""` when the text
/// has none.
pub fn extract_concept(text: &str) -> String {
    CONCEPT_MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
