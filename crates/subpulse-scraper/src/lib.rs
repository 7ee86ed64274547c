pub mod browser;
pub mod error;
pub mod locator;
pub mod normalize;
pub mod visitor;

#[cfg(test)]
mod test_support;

pub use browser::{
    BrowserLauncher, BrowserSession, ChromiumLauncher, ChromiumPage, ChromiumSession, PageDriver,
};
pub use error::ScraperError;
pub use locator::{locate, locate_on_page, Located, LocatedMetrics, PageProbe, Strategy};
pub use normalize::normalize_count;
pub use visitor::{visit, READY_SELECTOR};
