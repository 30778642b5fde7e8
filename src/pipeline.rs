//! Per-college enrichment loop.
//!
//! Each college moves through normalize → fetch → decode → extract → append,
//! strictly one at a time. A failure at any stage is logged, recorded in the
//! run summary and the loop moves on; only a failing [`Sink`] stops the run.
//! Consecutive colleges are separated by a fixed pacing delay whether or not
//! the previous one succeeded.

use crate::decode::{Decode, DecodeError};
use crate::extract::extract;
use crate::fetch::{Fetch, FetchError};
use crate::models::{EnrichmentRecord, Entity, FailureRecord, RunSummary, Stage};
use crate::normalize::normalize_url;
use crate::outputs::{Sink, SinkError};
use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Minimum spacing between two consecutive colleges.
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Why a college produced no output row.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("invalid URL {0:?}")]
    InvalidUrl(Option<String>),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FailureReason {
    /// Stage the college was in when this failure stopped it.
    pub fn stage(&self) -> Stage {
        match self {
            FailureReason::InvalidUrl(_) => Stage::Normalizing,
            FailureReason::Fetch(_) => Stage::Fetching,
            FailureReason::Decode(_) => Stage::Decoding,
        }
    }
}

/// Drives the pipeline over a list of colleges.
#[derive(Debug)]
pub struct Enricher<F, D, S> {
    fetcher: F,
    decoder: D,
    sink: S,
    pacing: Duration,
}

impl<F, D, S> Enricher<F, D, S>
where
    F: Fetch,
    D: Decode,
    S: Sink,
{
    /// Assemble a pipeline with the default 2 s pacing.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Retrieves brochure bytes for a normalized URL
    /// * `decoder` - Turns those bytes into lower-cased text
    /// * `sink` - Receives each enriched row as soon as it is built
    pub fn new(fetcher: F, decoder: D, sink: S) -> Self {
        Self {
            fetcher,
            decoder,
            sink,
            pacing: DEFAULT_PACING,
        }
    }

    /// Replace the delay slept between two consecutive colleges.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Consume the pipeline and hand back its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process every college in order and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns the sink error if a row cannot be appended. Rows appended
    /// before that point stay in the output table.
    #[instrument(level = "info", skip_all, fields(total = entities.len()))]
    pub async fn run(&mut self, entities: &[Entity]) -> Result<RunSummary, SinkError> {
        let mut succeeded = 0usize;
        let mut failed = Vec::new();

        for (i, entity) in entities.iter().enumerate() {
            if i > 0 {
                sleep(self.pacing).await;
            }
            info!(index = i, college = %entity.name, "Processing college");

            match self.process(entity).await {
                Ok(record) => {
                    if let Err(e) = self.sink.append(&record).await {
                        error!(college = %entity.name, error = %e, "Failed to append row; aborting run");
                        return Err(e);
                    }
                    succeeded += 1;
                    info!(college = %entity.name, "✓ Completed");
                }
                Err(reason) => {
                    log_failure(entity, &reason);
                    failed.push(FailureRecord::new(&entity.name, &reason));
                }
            }
        }

        Ok(RunSummary {
            succeeded,
            failed,
            finished_at: Utc::now().to_rfc3339(),
        })
    }

    #[instrument(level = "info", skip_all, fields(college = %entity.name))]
    async fn process(&self, entity: &Entity) -> Result<EnrichmentRecord, FailureReason> {
        let url = normalize_url(entity.candidate_url.as_deref())
            .ok_or_else(|| FailureReason::InvalidUrl(entity.candidate_url.clone()))?;
        let doc = self.fetcher.fetch(&url).await?;
        let text = self.decoder.decode(&doc)?;
        Ok(extract(&text, &entity.name))
    }
}

fn log_failure(entity: &Entity, reason: &FailureReason) {
    let college = &entity.name;
    let url = entity.candidate_url.as_deref().unwrap_or("");
    match reason {
        FailureReason::InvalidUrl(_) => warn!(%college, %url, "Invalid URL"),
        FailureReason::Fetch(FetchError::ConnectionRefused) => {
            error!(%college, %url, "Connection refused")
        }
        FailureReason::Fetch(FetchError::Timeout) => {
            error!(%college, %url, "Connection timed out")
        }
        FailureReason::Fetch(FetchError::HttpStatus(status)) => {
            error!(%college, %url, status, "HTTP error")
        }
        FailureReason::Fetch(FetchError::Other(msg)) => {
            error!(%college, error = %msg, "Error fetching data")
        }
        FailureReason::Decode(e) => error!(%college, %url, error = %e, "Failed to decode PDF"),
    }
    warn!(%college, stage = %reason.stage(), "✗ Failed to process");
}

/// Log the end-of-run tally, one line per failed college.
pub fn log_summary(summary: &RunSummary) {
    info!(succeeded = summary.succeeded, failed = summary.failed.len(), "Processing complete");
    if !summary.failed.is_empty() {
        info!(colleges = ?summary.failed_names(), "Failed to process the following colleges:");
        for failure in &summary.failed {
            info!(stage = %failure.stage, reason = %failure.reason, "- {}", failure.name);
        }
    }
}
