//! Read-only document probes.
//!
//! One script collects everything the extraction strategies need from the
//! live document and returns it as JSON; the strategies then work on the
//! deserialized [`PageProbe`] without touching the page again.

use serde::Deserialize;
use subpulse_core::Metric;

use crate::browser::PageDriver;
use crate::error::ScraperError;

/// Container grouping one statistic's label and value.
pub const METRIC_CARD_SELECTOR: &str = "div.flex.flex-col.items-start.flex-grow";

/// Element dedicated to displaying a number; carries a machine-readable
/// `number` attribute alongside its formatted text.
pub const NUMBER_ELEMENT: &str = "faceplate-number";
pub const NUMBER_ATTRIBUTE: &str = "number";

/// Inline emphasis element that often wraps the formatted value.
pub const EMPHASIS_ELEMENT: &str = "strong";

pub(crate) const PROBE_SCRIPT: &str = r#"(() => {
    const CARD = 'div.flex.flex-col.items-start.flex-grow';
    const text = (el) => ((el && (el.textContent || el.innerText)) || '').trim();
    const card = (el) => {
        if (!el) return null;
        const num = el.querySelector('faceplate-number');
        const strong = el.querySelector('strong');
        return {
            numberAttr: num ? num.getAttribute('number') : null,
            numberText: num ? text(num) : null,
            emphasisText: strong ? text(strong) : null,
            text: text(el),
        };
    };
    const slot = (name) => {
        const el = document.querySelector('[slot="' + name + '"]');
        if (!el) return null;
        return { text: text(el), card: card(el.closest(CARD) || el.parentElement) };
    };
    const body = document.body;
    return {
        visitorSlot: slot('weekly-active-users-count'),
        contributorSlot: slot('weekly-contributions-count'),
        cards: Array.from(document.querySelectorAll(CARD)).map(card),
        bodyText: body ? (body.innerText || body.textContent || '') : '',
    };
})()"#;

pub(crate) const BODY_TEXT_SCRIPT: &str =
    "(() => document.body ? (document.body.innerText || document.body.textContent || '') : '')()";

/// Snapshot of the metric-bearing structure of a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProbe {
    #[serde(default)]
    pub visitor_slot: Option<SlotProbe>,
    #[serde(default)]
    pub contributor_slot: Option<SlotProbe>,
    /// Every metric card on the page, in document order.
    #[serde(default)]
    pub cards: Vec<CardProbe>,
    /// The body's visible text, line breaks preserved.
    #[serde(default)]
    pub body_text: String,
}

impl PageProbe {
    #[must_use]
    pub fn slot(&self, metric: Metric) -> Option<&SlotProbe> {
        match metric {
            Metric::Visitors => self.visitor_slot.as_ref(),
            Metric::Contributors => self.contributor_slot.as_ref(),
        }
    }
}

/// The first element carrying a metric's slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotProbe {
    #[serde(default)]
    pub text: String,
    /// Nearest enclosing metric card, or the slot's parent element when it
    /// has no card ancestor.
    #[serde(default)]
    pub card: Option<CardProbe>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProbe {
    #[serde(default)]
    pub number_attr: Option<String>,
    #[serde(default)]
    pub number_text: Option<String>,
    #[serde(default)]
    pub emphasis_text: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Run [`PROBE_SCRIPT`] against `page`.
pub(crate) async fn capture<P: PageDriver>(page: &mut P) -> Result<PageProbe, ScraperError> {
    let value = page.evaluate(PROBE_SCRIPT).await?;
    Ok(serde_json::from_value(value)?)
}

/// Fetch only the body text; used when the full probe cannot be evaluated.
pub(crate) async fn capture_body_text<P: PageDriver>(page: &mut P) -> Result<String, ScraperError> {
    let value = page.evaluate(BODY_TEXT_SCRIPT).await?;
    Ok(serde_json::from_value(value)?)
}
