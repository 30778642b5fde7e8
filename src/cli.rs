//! Command-line interface definitions.
//!
//! The binary is a fixed batch run: with no arguments it reads `seats.csv`,
//! appends to `college_details.csv`, waits 10 s per request and 2 s between
//! colleges. The flags only relocate those files, lengthen the waits, or add
//! a JSON summary; none of them changes the enrichment itself.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_TIMEOUT;
use crate::pipeline::DEFAULT_PACING;

/// Enrich a table of colleges with attributes scraped from their brochure PDFs.
///
/// # Examples
///
/// ```sh
/// # Fixed filenames in the working directory
/// brochure_enrich
///
/// # Different tables, plus a JSON copy of the run summary
/// brochure_enrich -i data/seats.csv -o out/details.csv --summary-json out/summary.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input table with a `College Name` column and a URL column
    #[arg(short, long, default_value = "seats.csv")]
    pub input: PathBuf,

    /// Output table; created with a header on first write, appended afterwards
    #[arg(short, long, default_value = "college_details.csv")]
    pub output: PathBuf,

    /// Delay between colleges in milliseconds (never less than 2000)
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Also write the run summary as JSON to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

impl Cli {
    /// Pacing delay, clamped so it never drops below the default.
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.delay_ms).max(DEFAULT_PACING)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
