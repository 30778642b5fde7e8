//! Input table loading.
//!
//! The input is a CSV file with a header row. The college name comes from
//! [`NAME_COLUMN`]; the brochure URL from the first non-empty cell among
//! [`URL_COLUMNS`], checked in order.

use crate::models::Entity;
use csv::StringRecord;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub const NAME_COLUMN: &str = "College Name";

/// Admissible URL columns, highest priority first.
pub const URL_COLUMNS: [&str; 4] = ["PDF Link", "Link", "Website", "URL"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input table: {0}")]
    Csv(#[from] csv::Error),

    #[error("input table has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("no colleges found in the input table")]
    Empty,
}

/// Load every college from the CSV file at `path`.
///
/// Rows with an empty name cell are skipped with a warning.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, when it lacks the name
/// column, or when it yields no colleges at all.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_entities(path: impl AsRef<Path>) -> Result<Vec<Entity>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path.as_ref())?;
    let headers = reader.headers()?.clone();
    debug!(headers = ?headers.iter().collect::<Vec<_>>(), "CSV headers");

    let name_idx = headers
        .iter()
        .position(|h| h == NAME_COLUMN)
        .ok_or(InputError::MissingColumn(NAME_COLUMN))?;
    let url_idxs: Vec<usize> = URL_COLUMNS
        .iter()
        .filter_map(|col| headers.iter().position(|h| h == *col))
        .collect();
    if url_idxs.is_empty() {
        warn!(columns = ?URL_COLUMNS, "Input table has none of the URL columns");
    }

    let mut entities = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        debug!(row, record = ?record, "CSV row");

        let name = record.get(name_idx).unwrap_or_default().trim();
        if name.is_empty() {
            warn!(row, "Skipping row without a college name");
            continue;
        }
        entities.push(Entity::new(name, resolve_url(&record, &url_idxs)));
    }

    if entities.is_empty() {
        return Err(InputError::Empty);
    }
    info!(count = entities.len(), "Loaded colleges");
    Ok(entities)
}

/// First non-blank cell among the URL columns, in priority order.
fn resolve_url(record: &StringRecord, url_idxs: &[usize]) -> Option<String> {
    url_idxs
        .iter()
        .filter_map(|&i| record.get(i))
        .find(|cell| !cell.trim().is_empty())
        .map(str::to_string)
}
