mod collect;
mod input;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "subpulse")]
#[command(about = "Extract weekly visitor and contributor counts from Reddit community pages")]
struct Cli {
    /// Community URLs to visit, in order
    #[arg(long, num_args = 1.., conflicts_with = "file")]
    urls: Vec<String>,

    /// File listing URLs: a JSON array of strings, or one URL per line
    #[arg(long)]
    file: Option<PathBuf>,

    /// JSON results file, rewritten after every page
    #[arg(long, short = 'o', default_value = "reddit_results.json")]
    output: PathBuf,

    /// Also write results as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Run the browser without a window (overrides SUBPULSE_HEADLESS)
    #[arg(long, conflicts_with = "headful")]
    headless: bool,

    /// Show the browser window (overrides SUBPULSE_HEADLESS)
    #[arg(long, visible_alias = "visible", alias = "no-headless")]
    headful: bool,
}

impl Cli {
    /// Headless override from flags; `None` defers to configuration.
    fn headless_override(&self) -> Option<bool> {
        if self.headless {
            Some(true)
        } else if self.headful {
            Some(false)
        } else {
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = subpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(headless) = cli.headless_override() {
        config.headless = headless;
    }
    tracing::debug!(?config, "configuration loaded");

    let urls = input::resolve_urls(&cli.urls, cli.file.as_deref())?;
    collect::run_collect(&config, urls, cli.output, cli.csv).await
}
