use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to launch browser session: {0}")]
    Launch(String),

    #[error("failed to open page: {0}")]
    OpenPage(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} did not reach DOM-ready within {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("selector `{selector}` did not appear within {timeout:?}")]
    SelectorTimeout { selector: String, timeout: Duration },

    #[error("script evaluation failed: {0}")]
    Evaluate(String),

    #[error("page probe returned an unexpected shape: {0}")]
    ProbeDecode(#[from] serde_json::Error),

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

impl ScraperError {
    /// `true` for wait-bound expiries, which the page visitor treats as
    /// "proceed with what has rendered so far".
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ScraperError::NavigationTimeout { .. } | ScraperError::SelectorTimeout { .. }
        )
    }
}
