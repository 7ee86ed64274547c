use std::fmt::Write as _;

use subpulse_core::MetricResult;

pub(crate) const HEADER: [&str; 3] = ["url", "weeklyVisitors", "weeklyContributors"];

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn push_row<'a>(out: &mut String, row: impl IntoIterator<Item = &'a str>) {
    for (i, cell) in row.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quotes(cell) {
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// Header plus one row per record. Absent metrics are empty cells.
pub(crate) fn render(results: &[MetricResult]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER);
    for result in results {
        push_row(
            &mut out,
            [
                result.url.as_str(),
                result.weekly_visitors.as_deref().unwrap_or_default(),
                result.weekly_contributors.as_deref().unwrap_or_default(),
            ],
        );
    }
    out
}
