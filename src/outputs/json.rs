//! JSON copy of the run summary.

use crate::models::RunSummary;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `summary` as pretty-printed JSON to `path`, creating parent
/// directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(summary)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed.len(),
        "Wrote run summary"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureRecord, Stage};

    #[tokio::test]
    async fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/summary.json");
        let summary = RunSummary {
            succeeded: 3,
            failed: vec![FailureRecord {
                name: "Delta College".to_string(),
                stage: Stage::Fetching,
                reason: "connection timed out".to_string(),
            }],
            finished_at: "2025-05-06T10:00:00+00:00".to_string(),
        };

        write_summary(&summary, &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["succeeded"], 3);
        assert_eq!(value["failed"][0]["name"], "Delta College");
        assert_eq!(value["failed"][0]["stage"], "fetching");
    }
}
