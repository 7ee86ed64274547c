//! Scriptable in-memory page used by unit tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::browser::PageDriver;
use crate::error::ScraperError;
use crate::locator::probe::{BODY_TEXT_SCRIPT, PROBE_SCRIPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Navigation {
    Ready,
    TimesOut,
    Fails,
}

#[derive(Debug)]
pub(crate) struct FakePage {
    pub navigation: Navigation,
    pub selector_appears: bool,
    pub probe: Result<serde_json::Value, String>,
    pub body_text: Result<String, String>,
    /// Every call in order: `goto:<url>`, `wait:<selector>`, `eval:probe`,
    /// `eval:body`, `close`.
    pub calls: Vec<String>,
}

impl FakePage {
    pub fn with_probe(probe: serde_json::Value) -> Self {
        Self {
            navigation: Navigation::Ready,
            selector_appears: true,
            probe: Ok(probe),
            body_text: Ok(String::new()),
            calls: Vec::new(),
        }
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto_dom_ready(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        self.calls.push(format!("goto:{url}"));
        match self.navigation {
            Navigation::Ready => Ok(()),
            Navigation::TimesOut => Err(ScraperError::NavigationTimeout {
                url: url.to_owned(),
                timeout,
            }),
            Navigation::Fails => Err(ScraperError::Navigation {
                url: url.to_owned(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_owned(),
            }),
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        self.calls.push(format!("wait:{selector}"));
        if self.selector_appears {
            Ok(())
        } else {
            Err(ScraperError::SelectorTimeout {
                selector: selector.to_owned(),
                timeout,
            })
        }
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError> {
        if script == PROBE_SCRIPT {
            self.calls.push("eval:probe".to_owned());
            self.probe.clone().map_err(ScraperError::Evaluate)
        } else if script == BODY_TEXT_SCRIPT {
            self.calls.push("eval:body".to_owned());
            self.body_text
                .clone()
                .map(serde_json::Value::String)
                .map_err(ScraperError::Evaluate)
        } else {
            Err(ScraperError::Evaluate(format!("unexpected script: {script}")))
        }
    }

    async fn close(mut self) -> Result<(), ScraperError> {
        self.calls.push("close".to_owned());
        Ok(())
    }
}
