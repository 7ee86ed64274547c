//! Last-resort free-text search.
//!
//! Matches any number sitting next to a metric keyword, so it can pick up
//! unrelated counts (karma, comment totals). Only consulted when neither
//! structural strategy produced a value.

use subpulse_core::Metric;

use crate::normalize::normalize_count;

const SEGMENT_BREAKS: [char; 5] = ['\n', '\r', '•', '·', '|'];

/// Split visible text into short segments: lines, bullet/pipe-separated
/// fragments and sentences. Empty segments are dropped.
fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEGMENT_BREAKS)
        .flat_map(|piece| piece.split(". "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First segment, in document order, that mentions one of `metric`'s
/// keywords and contains a number.
pub(crate) fn find_by_keyword(body_text: &str, metric: Metric) -> Option<String> {
    let keywords = metric.keywords();
    segments(body_text)
        .filter(|segment| {
            let lower = segment.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
        .find_map(normalize_count)
}
