//! Result records and the two community statistics they carry.

use serde::{Deserialize, Serialize};

/// One of the two statistics extracted from a community page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Weekly visitors (rendered under the "weekly active users" slot).
    Visitors,
    /// Weekly contributors (rendered under the "weekly contributions" slot).
    Contributors,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Visitors, Metric::Contributors];

    /// Name of the markup slot that anchors this metric.
    #[must_use]
    pub fn slot_name(self) -> &'static str {
        match self {
            Metric::Visitors => "weekly-active-users-count",
            Metric::Contributors => "weekly-contributions-count",
        }
    }

    /// Index of this metric's card among the page's metric cards, in DOM order.
    #[must_use]
    pub fn card_index(self) -> usize {
        match self {
            Metric::Visitors => 0,
            Metric::Contributors => 1,
        }
    }

    /// Lower-cased phrases that label this metric in free text.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Metric::Visitors => &[
                "weekly visitors",
                "visitors",
                "members",
                "subscribers",
                "gamblers",
                "users",
                "community members",
                "joined",
            ],
            Metric::Contributors => &[
                "weekly contributors",
                "contributors",
                "here now",
                "online",
                "active",
                "active users",
                "currently online",
                "online now",
            ],
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Visitors => write!(f, "visitors"),
            Metric::Contributors => write!(f, "contributors"),
        }
    }
}

/// Metrics extracted from one community page.
///
/// Values are canonical tokens (`"4502"`, `"12.5K"`, `"1.2M"`), never parsed
/// numbers: the suffix carries magnitude the caller may want to keep as-is.
/// `None` means no value could be determined and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    pub url: String,
    pub weekly_visitors: Option<String>,
    pub weekly_contributors: Option<String>,
}

impl MetricResult {
    /// A record for `url` with both metrics absent.
    #[must_use]
    pub fn absent(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            weekly_visitors: None,
            weekly_contributors: None,
        }
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&str> {
        match metric {
            Metric::Visitors => self.weekly_visitors.as_deref(),
            Metric::Contributors => self.weekly_contributors.as_deref(),
        }
    }

    /// `true` when both metrics were found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.weekly_visitors.is_some() && self.weekly_contributors.is_some()
    }
}
