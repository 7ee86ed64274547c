use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Settings for launching the browsing context.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub user_agent: String,
    pub viewport: Viewport,
    pub locale: String,
    pub timezone: String,
}

/// Wait bounds applied by the page visitor for each URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTimings {
    /// Upper bound for reaching DOM-ready after navigation.
    pub navigation_timeout: Duration,
    /// Upper bound for a readiness selector to appear.
    pub ready_timeout: Duration,
    /// Fallback delay when no readiness selector appears.
    pub settle_delay: Duration,
    /// Extra delay for late client-side rendering.
    pub render_delay: Duration,
}

impl VisitTimings {
    /// No waiting at all; used by tests driving fake pages.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            navigation_timeout: Duration::ZERO,
            ready_timeout: Duration::ZERO,
            settle_delay: Duration::ZERO,
            render_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub user_agent: String,
    pub viewport: Viewport,
    pub locale: String,
    pub timezone: String,
    pub nav_timeout_secs: u64,
    pub ready_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub render_delay_ms: u64,
    pub inter_request_delay_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn visit_timings(&self) -> VisitTimings {
        VisitTimings {
            navigation_timeout: Duration::from_secs(self.nav_timeout_secs),
            ready_timeout: Duration::from_secs(self.ready_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            render_delay: Duration::from_millis(self.render_delay_ms),
        }
    }

    #[must_use]
    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            headless: self.headless,
            chrome_path: self.chrome_path.clone(),
            user_agent: self.user_agent.clone(),
            viewport: self.viewport,
            locale: self.locale.clone(),
            timezone: self.timezone.clone(),
        }
    }

    #[must_use]
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }
}
