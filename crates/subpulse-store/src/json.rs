use subpulse_core::MetricResult;

use crate::error::StoreError;

/// Pretty-printed JSON array of every record, newline terminated.
pub(crate) fn render(results: &[MetricResult]) -> Result<Vec<u8>, StoreError> {
    let mut bytes = serde_json::to_vec_pretty(results)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse a results file previously written by the JSON destination.
///
/// # Errors
///
/// [`StoreError::Io`] if the file cannot be read; [`StoreError::Json`] if it
/// is not an array of result records.
pub fn load_json_results(path: &std::path::Path) -> Result<Vec<MetricResult>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
