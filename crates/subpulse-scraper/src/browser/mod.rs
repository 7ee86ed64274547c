//! Browser collaborator seams.
//!
//! The extraction pipeline only needs a handful of capabilities from a
//! browser: launch an isolated context, open a page, navigate with a DOM-ready
//! bound, wait for a selector, run a read-only script and close things down.
//! They are expressed as traits so the page visitor and the batch runner can
//! be driven by fakes in tests; [`chromium`] is the production backend.

pub mod chromium;
pub mod stealth;

use std::time::Duration;

use async_trait::async_trait;
use subpulse_core::BrowserOptions;

use crate::error::ScraperError;

pub use chromium::{ChromiumLauncher, ChromiumPage, ChromiumSession};

/// Starts browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    /// Launch a fresh, isolated browsing context.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Launch`] when the browser cannot be started.
    async fn launch(&self, options: &BrowserOptions) -> Result<Self::Session, ScraperError>;
}

/// A live browsing context owning zero or more pages.
#[async_trait]
pub trait BrowserSession: Send {
    type Page: PageDriver;

    /// Open a new page (tab) in this context.
    async fn new_page(&mut self) -> Result<Self::Page, ScraperError>;

    /// Shut the context down and release the browser process.
    async fn close(self) -> Result<(), ScraperError>
    where
        Self: Sized;
}

/// One page (tab). State such as cookies persists across navigations.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to `url` and wait until the document has been parsed
    /// (not until every subresource has loaded).
    ///
    /// # Errors
    ///
    /// [`ScraperError::NavigationTimeout`] when DOM-ready is not reached in
    /// `timeout`; [`ScraperError::Navigation`] for hard failures.
    async fn goto_dom_ready(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// Wait until an element matching `selector` exists.
    ///
    /// # Errors
    ///
    /// [`ScraperError::SelectorTimeout`] when nothing matches within `timeout`.
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError>;

    /// Evaluate a read-only expression against the live document and return
    /// its JSON value.
    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError>;

    async fn close(self) -> Result<(), ScraperError>
    where
        Self: Sized;
}
