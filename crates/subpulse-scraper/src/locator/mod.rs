//! Metric value locator.
//!
//! Tries extraction strategies per metric in priority order and keeps the
//! first value found:
//!
//! 1. **Slot**: the element carrying the metric's slot name. Its own text is
//!    used when it holds a digit; otherwise the slot anchors a search of its
//!    enclosing metric card.
//! 2. **Positional card**: the page's metric cards in document order, the
//!    first belonging to visitors and the second to contributors.
//! 3. **Keyword**: free-text search of the page body.
//!
//! Within a card the number element's `number` attribute wins over its text,
//! which wins over emphasized text, which wins over the card's full text.

mod keyword;
pub mod probe;

use subpulse_core::Metric;

pub use probe::{CardProbe, PageProbe, SlotProbe, METRIC_CARD_SELECTOR};

use crate::browser::PageDriver;
use crate::normalize::{has_digit, normalize_count};

/// Which strategy produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Slot,
    PositionalCard,
    Keyword,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Slot => write!(f, "slot"),
            Strategy::PositionalCard => write!(f, "positional_card"),
            Strategy::Keyword => write!(f, "keyword"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub value: String,
    pub strategy: Strategy,
}

/// Per-metric outcome of [`locate`]; `None` means every strategy failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedMetrics {
    pub visitors: Option<Located>,
    pub contributors: Option<Located>,
}

impl LocatedMetrics {
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&Located> {
        match metric {
            Metric::Visitors => self.visitors.as_ref(),
            Metric::Contributors => self.contributors.as_ref(),
        }
    }

    /// The bare value token for `metric`, if found.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<String> {
        self.get(metric).map(|l| l.value.clone())
    }

    /// Keyword-only pass over raw body text.
    fn from_body_text(body_text: &str) -> Self {
        let located = |metric: Metric| {
            keyword::find_by_keyword(body_text, metric).map(|value| Located {
                value,
                strategy: Strategy::Keyword,
            })
        };
        Self {
            visitors: located(Metric::Visitors),
            contributors: located(Metric::Contributors),
        }
    }
}

/// Apply every strategy to a captured probe.
#[must_use]
pub fn locate(probe: &PageProbe) -> LocatedMetrics {
    LocatedMetrics {
        visitors: locate_metric(probe, Metric::Visitors),
        contributors: locate_metric(probe, Metric::Contributors),
    }
}

fn locate_metric(probe: &PageProbe, metric: Metric) -> Option<Located> {
    let found = |strategy: Strategy| move |value: String| Located { value, strategy };

    from_slot(probe, metric)
        .map(found(Strategy::Slot))
        .or_else(|| from_position(probe, metric).map(found(Strategy::PositionalCard)))
        .or_else(|| {
            keyword::find_by_keyword(&probe.body_text, metric).map(found(Strategy::Keyword))
        })
}

fn from_slot(probe: &PageProbe, metric: Metric) -> Option<String> {
    let slot = probe.slot(metric)?;
    if has_digit(&slot.text) {
        return normalize_count(&slot.text);
    }
    slot.card.as_ref().and_then(from_card)
}

/// Cards are only attributed by position when both are present; a lone
/// card cannot be assigned to either metric with confidence.
fn from_position(probe: &PageProbe, metric: Metric) -> Option<String> {
    if probe.cards.len() < Metric::ALL.len() {
        return None;
    }
    probe.cards.get(metric.card_index()).and_then(from_card)
}

fn from_card(card: &CardProbe) -> Option<String> {
    [
        card.number_attr.as_deref(),
        card.number_text.as_deref(),
        card.emphasis_text.as_deref(),
        Some(card.text.as_str()),
    ]
    .into_iter()
    .flatten()
    .find_map(normalize_count)
}

/// Probe the live page and locate both metrics.
///
/// Never fails: when the full probe cannot be evaluated or decoded the
/// keyword strategy runs on the body text alone, and when even that fails
/// both metrics come back absent.
pub async fn locate_on_page<P: PageDriver>(page: &mut P) -> LocatedMetrics {
    match probe::capture(page).await {
        Ok(captured) => {
            tracing::debug!(
                cards = captured.cards.len(),
                visitor_slot = captured.visitor_slot.is_some(),
                contributor_slot = captured.contributor_slot.is_some(),
                "page probe captured"
            );
            locate(&captured)
        }
        Err(err) => {
            tracing::warn!(error = %err, "page probe failed; falling back to body text");
            match probe::capture_body_text(page).await {
                Ok(body_text) => LocatedMetrics::from_body_text(&body_text),
                Err(err) => {
                    tracing::warn!(error = %err, "body text unavailable");
                    LocatedMetrics::default()
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
