//! Target URL input.

use std::path::Path;

use anyhow::Context;

pub(crate) const DEFAULT_TARGET: &str = "https://www.reddit.com/r/gambling/";

/// Resolve the ordered target list from `--urls`, `--file`, or the default.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the resolved list is empty.
pub(crate) fn resolve_urls(urls: &[String], file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let resolved = if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read URL file {}", path.display()))?;
        parse_url_list(&content)
    } else if urls.is_empty() {
        vec![DEFAULT_TARGET.to_owned()]
    } else {
        clean(urls.iter().cloned())
    };

    if resolved.is_empty() {
        anyhow::bail!("no URLs to process");
    }
    Ok(resolved)
}

/// Parse file contents as a JSON array of strings (or a single JSON string),
/// falling back to one URL per line.
pub(crate) fn parse_url_list(content: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(content) {
        return clean(list);
    }
    if let Ok(single) = serde_json::from_str::<String>(content) {
        return clean([single]);
    }
    clean(content.lines().map(str::to_owned))
}

fn clean(urls: impl IntoIterator<Item = String>) -> Vec<String> {
    urls.into_iter()
        .map(|u| u.trim().to_owned())
        .filter(|u| !u.is_empty())
        .collect()
}
