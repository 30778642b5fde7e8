//! Brochure retrieval over HTTP.
//!
//! The [`Fetch`] trait is the seam between the pipeline and the network;
//! [`HttpFetcher`] is the production implementation backed by `reqwest`.
//!
//! # Failure Classification
//!
//! Transport errors are sorted into [`FetchError`] variants in this order:
//!
//! | Condition | Variant |
//! |-----------|---------|
//! | TCP connection refused | [`FetchError::ConnectionRefused`] |
//! | Request or body read exceeded the wait bound | [`FetchError::Timeout`] |
//! | Response with a non-2xx status | [`FetchError::HttpStatus`] |
//! | Anything else | [`FetchError::Other`] |
//!
//! A single attempt is made per URL; there is no retry.

use std::error::Error as StdError;
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Upper bound on a single fetch, connect through last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser identification sent with every request; some hosts reject
/// non-browser clients outright.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Raw, undecoded response body.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub url: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("connection refused")]
    ConnectionRefused,

    #[error("connection timed out")]
    Timeout,

    #[error("HTTP error {0}")]
    HttpStatus(u16),

    #[error("error fetching data: {0}")]
    Other(String),
}

impl FetchError {
    /// Sort a `reqwest` error into the taxonomy above.
    ///
    /// `Other` carries the whole cause chain (e.g. the DNS failure behind
    /// "error sending request"), not just the outermost message.
    pub fn classify(err: &reqwest::Error) -> Self {
        if is_connection_refused(err) {
            FetchError::ConnectionRefused
        } else if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Other(error_chain(err))
        }
    }
}

/// Render `err` and each of its sources, joined with `": "`.
///
/// Sources whose text is already contained in the previous message are
/// skipped.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut msg = err.to_string();
    let mut last = msg.clone();
    let mut source = err.source();
    while let Some(e) = source {
        let text = e.to_string();
        if !last.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        last = text;
        source = e.source();
    }
    msg
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(e) = source {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = e.source();
    }
    false
}

/// Retrieve the raw bytes behind a normalized URL.
///
/// Implementations make exactly one attempt and report failure through
/// [`FetchError`]; they never decode the body.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;
}

/// `reqwest`-backed fetcher with a fixed wait bound and User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Bound covering connect, headers and body
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Wait bound applied to every request made by this fetcher.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip(self), fields(timeout_ms = self.timeout.as_millis() as u64))]
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let t0 = Instant::now();
        info!(%url, "Fetching PDF");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::classify(&e))?;

        // Body stays binary; text decoding happens downstream.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::classify(&e))?;

        debug!(
            bytes = bytes.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched document"
        );
        Ok(RawDocument {
            url: url.to_string(),
            bytes: bytes.to_vec(),
        })
    }
}
