//! Append-only CSV output table.
//!
//! The header (see [`Field::headers`]) is written together with the first
//! row when the file is missing or empty. Each row is encoded in memory and
//! written with a single `write_all`, then synced, so a crash leaves the
//! table holding a prefix of the processed colleges.

use super::{Sink, SinkError};
use crate::models::{EnrichmentRecord, Field};
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn needs_header(&self) -> Result<bool, SinkError> {
        match fs::metadata(&self.path).await {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

/// Encode `record` as one CSV line, preceded by the header when asked.
fn encode_row(record: &EnrichmentRecord, with_header: bool) -> Result<Vec<u8>, SinkError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if with_header {
        writer.write_record(Field::headers())?;
    }
    writer.write_record(record.values())?;
    writer
        .into_inner()
        .map_err(|e| SinkError::Io(e.into_error()))
}

impl Sink for CsvSink {
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    async fn append(&mut self, record: &EnrichmentRecord) -> Result<(), SinkError> {
        let with_header = self.needs_header().await?;
        let row = encode_row(record, with_header)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&row).await?;
        file.flush().await?;
        file.sync_data().await?;

        debug!(bytes = row.len(), with_header, "Appended row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use std::path::Path;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("college_details.csv");
        let mut sink = CsvSink::new(&path);

        let mut first = EnrichmentRecord::new("Alpha College");
        first.set(Field::Location, "chennai".to_string());
        sink.append(&first).await.unwrap();
        sink.append(&EnrichmentRecord::new("Beta College")).await.unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Field::headers().map(str::to_string).collect::<Vec<_>>());
        assert_eq!(rows[1][0], "Alpha College");
        assert_eq!(rows[1][2], "chennai");
        assert_eq!(rows[2][0], "Beta College");
        assert!(rows[2][1..].iter().all(|v| v == NOT_AVAILABLE));
        assert!(rows.iter().all(|r| r.len() == 22));
    }

    #[tokio::test]
    async fn test_appends_to_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        CsvSink::new(&path)
            .append(&EnrichmentRecord::new("First Run"))
            .await
            .unwrap();
        CsvSink::new(&path)
            .append(&EnrichmentRecord::new("Second Run"))
            .await
            .unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "First Run");
        assert_eq!(rows[2][0], "Second Run");
    }

    #[tokio::test]
    async fn test_multiline_values_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut record = EnrichmentRecord::new("Gamma, Institute");
        record.set(Field::Labs, "laboratory for\nrobotics".to_string());
        CsvSink::new(&path).append(&record).await.unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Gamma, Institute");
        assert_eq!(rows[1][8], "laboratory for\nrobotics");
    }
}
