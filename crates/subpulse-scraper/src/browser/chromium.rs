//! Chromium backend over the DevTools protocol.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetLocaleOverrideParams, SetTimezoneOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::network::{
    Headers, SetExtraHttpHeadersParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, NavigateParams,
};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use serde::Deserialize;
use subpulse_core::BrowserOptions;
use tokio::task::JoinHandle;

use super::stealth::STEALTH_SCRIPT;
use super::{BrowserLauncher, BrowserSession, PageDriver};
use crate::error::ScraperError;

const LAUNCH_ARGS: [&str; 3] = [
    "--disable-blink-features=AutomationControlled",
    "--disable-dev-shm-usage",
    "--disable-extensions",
];

const ACCEPT_HEADER: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Marks the current document so a freshly navigated one can be told apart.
const NAV_STAMP_SCRIPT: &str = "(() => { window.__subpulseNavStamp = true; return true; })()";

const DOCUMENT_STATE_SCRIPT: &str = "(() => ({ stale: window.__subpulseNavStamp === true, readyState: document.readyState }))()";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentState {
    stale: bool,
    ready_state: String,
}

/// Launches a local Chromium with fingerprint patches applied to every page.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    init_scripts: Vec<String>,
}

impl Default for ChromiumLauncher {
    fn default() -> Self {
        Self {
            init_scripts: vec![STEALTH_SCRIPT.to_owned()],
        }
    }
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script evaluated in every new document before page scripts run.
    #[must_use]
    pub fn with_init_script(mut self, script: impl Into<String>) -> Self {
        self.init_scripts.push(script.into());
        self
    }
}

fn browser_config(options: &BrowserOptions) -> Result<BrowserConfig, ScraperError> {
    let viewport = Viewport {
        width: options.viewport.width,
        height: options.viewport.height,
        ..Viewport::default()
    };

    let mut builder = BrowserConfig::builder()
        .viewport(viewport)
        .window_size(options.viewport.width, options.viewport.height)
        .no_sandbox()
        .args(LAUNCH_ARGS)
        .arg(format!("--user-agent={}", options.user_agent))
        .arg(format!("--lang={}", options.locale));

    if !options.headless {
        builder = builder.with_head();
    }
    if let Some(path) = &options.chrome_path {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(ScraperError::Launch)
}

/// `"en-US"` becomes `"en-US,en;q=0.9"`.
fn accept_language(locale: &str) -> String {
    match locale.split_once('-') {
        Some((primary, _)) => format!("{locale},{primary};q=0.9"),
        None => locale.to_owned(),
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self, options: &BrowserOptions) -> Result<ChromiumSession, ScraperError> {
        let config = browser_config(options)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!(error = %err, "CDP handler event error");
                }
            }
        });

        tracing::info!(
            headless = options.headless,
            viewport = %options.viewport,
            locale = %options.locale,
            "browser session started"
        );

        Ok(ChromiumSession {
            browser,
            handler_task,
            options: options.clone(),
            init_scripts: self.init_scripts.clone(),
        })
    }
}

/// A running Chromium process plus the task pumping its CDP events.
///
/// Dropping the session aborts the event task; the browser process itself is
/// killed by `chromiumoxide` when the `Browser` drops.
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    options: BrowserOptions,
    init_scripts: Vec<String>,
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn new_page(&mut self) -> Result<ChromiumPage, ScraperError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::OpenPage(e.to_string()))?;

        let user_agent = SetUserAgentOverrideParams::builder()
            .user_agent(&self.options.user_agent)
            .accept_language(accept_language(&self.options.locale))
            .build()
            .map_err(ScraperError::OpenPage)?;
        page.execute(user_agent).await?;
        page.execute(SetLocaleOverrideParams {
            locale: Some(self.options.locale.clone()),
        })
        .await?;
        page.execute(SetTimezoneOverrideParams::new(self.options.timezone.clone()))
            .await?;
        page.execute(SetExtraHttpHeadersParams::new(Headers::new(
            serde_json::json!({
                "Accept": ACCEPT_HEADER,
                "Accept-Language": accept_language(&self.options.locale),
            }),
        )))
        .await?;

        for script in &self.init_scripts {
            page.execute(AddScriptToEvaluateOnNewDocumentParams::new(script.clone()))
                .await?;
        }

        Ok(ChromiumPage { page })
    }

    async fn close(mut self) -> Result<(), ScraperError> {
        let closed = self.browser.close().await;
        if let Err(err) = self.browser.wait().await {
            tracing::debug!(error = %err, "waiting for browser exit failed");
        }
        self.handler_task.abort();
        closed.map(|_| ()).map_err(ScraperError::from)
    }
}

pub struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn goto_dom_ready(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        if let Err(err) = self.page.evaluate(NAV_STAMP_SCRIPT).await {
            tracing::debug!(error = %err, "could not stamp outgoing document");
        }

        let page = &self.page;
        let navigation = async {
            let response = page
                .execute(NavigateParams::new(url))
                .await
                .map_err(|e| ScraperError::Navigation {
                    url: url.to_owned(),
                    reason: e.to_string(),
                })?;
            if let Some(error_text) = response.result.error_text.as_deref() {
                return Err(ScraperError::Navigation {
                    url: url.to_owned(),
                    reason: error_text.to_owned(),
                });
            }

            // The navigate command returns once the response commits; poll
            // until the new document has been parsed.
            loop {
                let state = page
                    .evaluate(DOCUMENT_STATE_SCRIPT)
                    .await
                    .ok()
                    .and_then(|r| r.into_value::<DocumentState>().ok());
                if let Some(state) = state {
                    if !state.stale && state.ready_state != "loading" {
                        return Ok(());
                    }
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .unwrap_or_else(|_| {
                Err(ScraperError::NavigationTimeout {
                    url: url.to_owned(),
                    timeout,
                })
            })
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let page = &self.page;
        let wait = async {
            while page.find_element(selector).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| ScraperError::SelectorTimeout {
                selector: selector.to_owned(),
                timeout,
            })
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::Evaluate(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.page.close().await?;
        Ok(())
    }
}
