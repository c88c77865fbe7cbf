/// Minimum normalized similarity for a fuzzy keyword match
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Decide whether a trigger keyword matches a ticket text field.
///
/// The keyword may carry several comma-separated alternatives in a single
/// string; each trimmed non-empty segment is evaluated independently and the
/// first hit wins. A segment matches on case-insensitive substring
/// containment, or when the normalized Levenshtein similarity between the
/// full lowercased text and the lowercased segment reaches the threshold.
/// The fuzzy path compares whole strings, so for long texts against short
/// keywords containment is the dominant path and similarity only catches
/// near-miss phrasing.
pub fn keyword_matches(text: &str, keyword: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let text_lower = text.to_lowercase();

    keyword
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .any(|segment| {
            let segment_lower = segment.to_lowercase();
            text_lower.contains(&segment_lower)
                || strsim::normalized_levenshtein(&text_lower, &segment_lower)
                    >= SIMILARITY_THRESHOLD
        })
}
