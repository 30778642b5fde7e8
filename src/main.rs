//! # Brochure Enrich
//!
//! Batch enrichment of a college table with attributes scraped from each
//! college's brochure PDF.
//!
//! ## Usage
//!
//! ```sh
//! brochure_enrich -i seats.csv -o college_details.csv
//! ```
//!
//! ## Architecture
//!
//! Colleges are processed one at a time:
//! 1. **Normalizing**: repair and validate the brochure URL
//! 2. **Fetching**: download the PDF (single attempt, bounded wait)
//! 3. **Decoding**: turn the PDF into lower-cased text
//! 4. **Extracting**: fill the 22 output columns with lexical rules
//! 5. **Output**: append the row to the CSV table immediately
//!
//! A failing college is logged and skipped; a fixed delay separates
//! consecutive colleges. The run ends with a summary of failed colleges.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod decode;
mod extract;
mod fetch;
mod input;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use decode::PdfDecoder;
use fetch::HttpFetcher;
use outputs::csv::CsvSink;
use outputs::json;
use pipeline::{Enricher, log_summary};
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("brochure_enrich starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Load colleges (fatal on failure) ----
    let entities = match input::read_entities(&args.input) {
        Ok(entities) => entities,
        Err(e) => {
            error!(path = %args.input.display(), error = %e, "Cannot load input table");
            return Err(e.into());
        }
    };

    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Enrich ----
    let fetcher = HttpFetcher::new(args.timeout())?;
    info!(
        colleges = entities.len(),
        timeout_secs = fetcher.timeout().as_secs(),
        pacing_ms = args.pacing().as_millis() as u64,
        output = %args.output.display(),
        "Starting enrichment"
    );
    let mut enricher = Enricher::new(fetcher, PdfDecoder, CsvSink::new(&args.output))
        .with_pacing(args.pacing());
    let summary = enricher.run(&entities).await?;
    log_summary(&summary);

    if let Some(path) = &args.summary_json {
        if let Err(e) = json::write_summary(&summary, path).await {
            error!(path = %path.display(), error = %e, "Failed to write JSON summary");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
