//! `subpulse` collection run: wires configuration, the Chromium launcher
//! and the file sink into the batch runner, and handles Ctrl-C.

mod runner;

use std::path::PathBuf;

use subpulse_core::{AppConfig, MetricResult};
use subpulse_scraper::{ChromiumLauncher, ScraperError};
use subpulse_store::ResultSink;

use runner::RunSettings;

/// Run the full batch and print a summary.
///
/// # Errors
///
/// Returns an error when the browser session cannot be acquired or the run
/// is interrupted. Runs where some metrics were not found still succeed.
pub(crate) async fn run_collect(
    config: &AppConfig,
    urls: Vec<String>,
    output: PathBuf,
    csv: Option<PathBuf>,
) -> anyhow::Result<()> {
    let launcher = ChromiumLauncher::new();
    let settings = RunSettings::from_config(config);
    let mut sink = ResultSink::json_with_optional_csv(output, csv);

    println!("Processing {} URL(s)", urls.len());
    let outcome = tokio::select! {
        outcome = runner::run_batch(&launcher, &settings, &urls, &mut sink) => outcome,
        () = interrupted() => {
            tracing::warn!("interrupted; results on disk cover every completed url");
            anyhow::bail!("run interrupted");
        }
    };

    match outcome {
        Ok(results) => {
            print_summary(&results, &sink);
            Ok(())
        }
        Err(err) => {
            print_session_failure(&err);
            Err(anyhow::Error::new(err).context("browser session could not be acquired"))
        }
    }
}

async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn print_summary(results: &[MetricResult], sink: &ResultSink) {
    let complete = results.iter().filter(|r| r.is_complete()).count();
    println!();
    println!(
        "Done: {} URL(s), {complete} with both metrics, {} with missing values",
        results.len(),
        results.len() - complete
    );
    for destination in sink.destinations() {
        println!("Results saved to {}", destination.path().display());
    }
}

fn print_session_failure(err: &ScraperError) {
    eprintln!("Could not start the browser session: {err}");
    eprintln!("No URLs were processed (0 results). Check that Chrome or Chromium is installed, or set SUBPULSE_CHROME_PATH.");
}
