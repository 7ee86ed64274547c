//! Page visitor: one URL in, one [`MetricResult`] out.
//!
//! Navigation only waits for DOM-ready. A readiness selector is then given a
//! bounded wait; if it never appears a fixed settle delay runs instead, and a
//! short render delay always follows before the page is probed.

use std::time::Instant;

use subpulse_core::{Metric, MetricResult, VisitTimings};

use crate::browser::PageDriver;
use crate::locator::locate_on_page;

/// Any element signalling the statistics have rendered: a metric card or the
/// weekly visitors slot.
pub const READY_SELECTOR: &str =
    "div.flex.flex-col.items-start.flex-grow, [slot=\"weekly-active-users-count\"]";

/// Visit `url` on an already-open page and extract both metrics.
///
/// Never fails. A navigation timeout still proceeds to extraction since the
/// document may be usable; any other navigation failure yields a record with
/// both metrics absent. The page is left open for the next URL.
pub async fn visit<P: PageDriver>(page: &mut P, url: &str, timings: &VisitTimings) -> MetricResult {
    let started = Instant::now();

    match page.goto_dom_ready(url, timings.navigation_timeout).await {
        Ok(()) => {}
        Err(err) if err.is_timeout() => {
            tracing::warn!(url, error = %err, "navigation timed out; extracting anyway");
        }
        Err(err) => {
            tracing::warn!(url, error = %err, "navigation failed");
            return MetricResult::absent(url);
        }
    }

    if let Err(err) = page
        .wait_for_selector(READY_SELECTOR, timings.ready_timeout)
        .await
    {
        tracing::debug!(url, error = %err, "readiness selector not seen; settling");
        tokio::time::sleep(timings.settle_delay).await;
    }
    tokio::time::sleep(timings.render_delay).await;

    let located = locate_on_page(page).await;
    for metric in Metric::ALL {
        match located.get(metric) {
            Some(found) => tracing::debug!(
                url,
                %metric,
                value = %found.value,
                strategy = %found.strategy,
                "metric located"
            ),
            None => tracing::debug!(url, %metric, "metric not found"),
        }
    }

    let result = MetricResult {
        url: url.to_owned(),
        weekly_visitors: located.value(Metric::Visitors),
        weekly_contributors: located.value(Metric::Contributors),
    };
    tracing::info!(
        url,
        complete = result.is_complete(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "page visited"
    );
    result
}

#[cfg(test)]
#[path = "visitor_test.rs"]
mod tests;

