//! Canonicalization of free-text metric snippets.
//!
//! A snippet such as `"12.5k weekly visitors"` or `"1,234"` becomes a token
//! of digits, an optional decimal part and an optional `K`/`M` suffix
//! (`"12.5K"`, `"1234"`). The suffix is kept rather than expanded so callers
//! can decide how to resolve its magnitude.

use std::sync::LazyLock;

use regex::Regex;

/// First number with at most one decimal part and an optional attached
/// magnitude suffix. The token may touch letters on either side, so `"V2"`
/// yields `"2"` and `"5MEMBERS"` yields `"5M"`.
static COUNT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)([KM])?").expect("valid regex"));

/// Normalizes `text` into a canonical numeric token.
///
/// Trims, upper-cases and strips thousands-separator commas, then returns
/// the first `digits(.digits)?` run together with a directly attached `K` or
/// `M`. Returns `None` when `text` contains no digit.
#[must_use]
pub fn normalize_count(text: &str) -> Option<String> {
    let cleaned = text.trim().to_uppercase().replace(',', "");
    if !has_digit(&cleaned) {
        return None;
    }

    let caps = COUNT_TOKEN.captures(&cleaned)?;
    let number = caps.get(1).map_or("", |m| m.as_str());
    let suffix = caps.get(2).map_or("", |m| m.as_str());
    Some(format!("{number}{suffix}"))
}

/// `true` when `text` contains at least one ASCII digit.
#[must_use]
pub(crate) fn has_digit(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
