//! Result sink: persists the accumulated batch after every page.
//!
//! Each persist rewrites every destination in full with the records
//! collected so far, so an interrupted run leaves complete files holding
//! every finished record.

mod atomic;
mod csv;
mod error;
mod json;

use std::path::{Path, PathBuf};

use subpulse_core::MetricResult;

pub use atomic::write_atomic;
pub use error::StoreError;
pub use json::load_json_results;

/// Where and how a batch is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Pretty-printed JSON array of result records.
    Json(PathBuf),
    /// Header row plus one row per record; absent metrics are empty cells.
    Csv(PathBuf),
}

impl Destination {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Destination::Json(path) | Destination::Csv(path) => path,
        }
    }

    fn write(&self, results: &[MetricResult]) -> Result<(), StoreError> {
        match self {
            Destination::Json(path) => write_atomic(path, &json::render(results)?),
            Destination::Csv(path) => write_atomic(path, csv::render(results).as_bytes()),
        }
    }
}

/// Anything that can checkpoint the in-progress batch.
pub trait BatchSink {
    /// Replace the persisted batch with `results`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a destination cannot be written.
    fn persist(&mut self, results: &[MetricResult]) -> Result<(), StoreError>;
}

/// File-backed [`BatchSink`] writing one or more destinations.
#[derive(Debug, Clone)]
pub struct ResultSink {
    destinations: Vec<Destination>,
}

impl ResultSink {
    #[must_use]
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// JSON output at `json_path`, plus CSV at `csv_path` when given.
    #[must_use]
    pub fn json_with_optional_csv(json_path: PathBuf, csv_path: Option<PathBuf>) -> Self {
        let mut destinations = vec![Destination::Json(json_path)];
        destinations.extend(csv_path.map(Destination::Csv));
        Self::new(destinations)
    }

    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }
}

impl BatchSink for ResultSink {
    /// Every destination is attempted even after one fails; the first error
    /// is returned.
    fn persist(&mut self, results: &[MetricResult]) -> Result<(), StoreError> {
        let mut first_err = None;
        for destination in &self.destinations {
            match destination.write(results) {
                Ok(()) => tracing::debug!(
                    path = %destination.path().display(),
                    records = results.len(),
                    "checkpoint written"
                ),
                Err(err) => {
                    tracing::error!(
                        path = %destination.path().display(),
                        error = %err,
                        "checkpoint write failed"
                    );
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
