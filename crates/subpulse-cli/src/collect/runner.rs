//! Batch orchestration: one session, one page, URLs strictly in order.
//!
//! The full batch is checkpointed through the sink after every URL, before
//! the next navigation starts, so an interrupted run leaves a complete
//! prefix of results on disk.

use std::time::Duration;

use subpulse_core::{AppConfig, BrowserOptions, Metric, MetricResult, VisitTimings};
use subpulse_scraper::{visit, BrowserLauncher, BrowserSession, PageDriver, ScraperError};
use subpulse_store::BatchSink;

/// Everything a batch run needs besides its URLs.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub browser: BrowserOptions,
    pub timings: VisitTimings,
    /// Pause between consecutive URLs.
    pub inter_request_delay: Duration,
}

impl RunSettings {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            browser: config.browser_options(),
            timings: config.visit_timings(),
            inter_request_delay: config.inter_request_delay(),
        }
    }
}

/// Visit every URL with a single reused page and return one record per URL.
///
/// # Errors
///
/// Only session acquisition is fatal: a launch or page-open failure aborts
/// the run before any URL is visited. Per-URL problems surface as absent
/// metrics and checkpoint failures are logged.
pub(crate) async fn run_batch<L, S>(
    launcher: &L,
    settings: &RunSettings,
    urls: &[String],
    sink: &mut S,
) -> Result<Vec<MetricResult>, ScraperError>
where
    L: BrowserLauncher,
    S: BatchSink,
{
    let mut session = launcher.launch(&settings.browser).await?;
    let mut page = match session.new_page().await {
        Ok(page) => page,
        Err(err) => {
            close_session_best_effort(session).await;
            return Err(err);
        }
    };
    tracing::info!(
        total = urls.len(),
        headless = settings.browser.headless,
        "browser session ready"
    );

    let total = urls.len();
    let mut results = Vec::with_capacity(total);
    for (i, url) in urls.iter().enumerate() {
        println!("Scraping: {url}");
        let result = visit(&mut page, url, &settings.timings).await;
        print_result(&result);
        results.push(result);

        // The sink reports write failures itself.
        if let Err(err) = sink.persist(&results) {
            tracing::debug!(
                processed = results.len(),
                error = %err,
                "checkpoint not saved; continuing with next url"
            );
        }
        tracing::info!(processed = i + 1, total, url = %url, "url processed");

        if i + 1 < total {
            tokio::time::sleep(settings.inter_request_delay).await;
        }
    }

    if let Err(err) = page.close().await {
        tracing::warn!(error = %err, "failed to close page");
    }
    close_session_best_effort(session).await;
    Ok(results)
}

async fn close_session_best_effort<B: BrowserSession>(session: B) {
    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "failed to close browser session");
    }
}

fn print_result(result: &MetricResult) {
    for (label, metric) in [
        ("Visitors", Metric::Visitors),
        ("Contributors", Metric::Contributors),
    ] {
        println!("  {label}: {}", result.get(metric).unwrap_or("Not found"));
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
