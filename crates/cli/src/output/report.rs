//! Rendering of evaluation results and batch outcomes

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use evalboard_domain::SubmissionResult;

use super::{JsonFormatter, TableFormatter};
use crate::batch::{BatchReport, ItemOutcome};

/// Write the full service response to a JSON report file
pub fn write_report(path: &Path, result: &SubmissionResult) -> Result<()> {
    let contents = JsonFormatter::format(result)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write report file: {}", path.display()))
}

/// Table with one row per submitted dataset
pub fn batch_summary_table(report: &BatchReport) -> String {
    let headers = vec!["#", "Dataset", "Output File", "System ID", "Status"];
    let rows = report
        .items
        .iter()
        .map(|item| {
            let status = match &item.outcome {
                ItemOutcome::Confirmed { .. } => "posted".to_string(),
                ItemOutcome::ReadBackFailed { error, .. } => format!("failed: {}", error),
            };
            vec![
                (item.index + 1).to_string(),
                item.dataset_id.to_string(),
                item.output_file.display().to_string(),
                item.outcome.system_id().to_string(),
                status,
            ]
        })
        .collect();

    TableFormatter::simple(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ItemReport;
    use evalboard_domain::{DatasetId, SystemId};
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_write_report_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let payload = json!({"system_id": "abc", "system_info": {"results": {}}});
        let result = SubmissionResult::from_payload(payload.clone()).unwrap();

        write_report(&path, &result).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, payload);
    }

    #[test]
    fn test_write_report_to_missing_directory() {
        let result = SubmissionResult::from_payload(json!({"system_id": "abc"})).unwrap();
        let err = write_report(Path::new("/nonexistent/dir/report.json"), &result).unwrap_err();
        assert!(err.to_string().contains("report.json"));
    }

    #[test]
    fn test_batch_summary_table() {
        let report = BatchReport {
            items: vec![ItemReport {
                index: 0,
                dataset_id: DatasetId::new("y.s"),
                output_file: PathBuf::from("1.json"),
                outcome: ItemOutcome::ReadBackFailed {
                    system_id: SystemId::new("sys-9"),
                    error: "not found".to_string(),
                },
            }],
        };
        let table = batch_summary_table(&report);
        assert!(table.contains("y.s"));
        assert!(table.contains("sys-9"));
        assert!(table.contains("failed: not found"));
    }
}
