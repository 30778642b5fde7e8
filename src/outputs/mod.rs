//! Output writers for enriched rows and the run report.
//!
//! # Submodules
//!
//! - [`csv`]: append-only CSV table, one row per enriched college
//! - [`json`]: optional JSON copy of the final [`RunSummary`](crate::models::RunSummary)

pub mod csv;
pub mod json;

use crate::models::EnrichmentRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write output table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output row: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Destination for enriched rows.
///
/// `append` must leave the destination either with the whole row or
/// without it; it returns only once the row is durable.
pub trait Sink {
    async fn append(&mut self, record: &EnrichmentRecord) -> Result<(), SinkError>;
}
