//! Benchmark manifest: the ordered list of datasets a benchmark is made of.

use crate::errors::{DomainError, DomainResult};
use crate::identifiers::DatasetId;
use crate::submission::FileType;
use serde::{Deserialize, Serialize};

/// Benchmark configuration as loaded from the manifest file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkManifest {
    /// Datasets in submission order
    pub datasets: Vec<ManifestEntry>,
}

impl BenchmarkManifest {
    /// Parse a manifest from its JSON text
    pub fn from_json_str(text: &str) -> DomainResult<Self> {
        serde_json::from_str(text).map_err(DomainError::InvalidManifest)
    }

    /// Number of datasets in the benchmark
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether the benchmark lists no datasets
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// One dataset of a benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Dataset name
    pub dataset_name: String,
    /// Sub-dataset name, if the dataset has several
    #[serde(default)]
    pub sub_dataset: Option<String>,
    /// Dataset split to evaluate against
    #[serde(default = "default_split")]
    pub dataset_split: String,
    /// Metrics to compute, in display order
    pub metrics: Vec<MetricSpec>,
    /// Task type identifier
    pub task: String,
    /// Format of the system output file for this dataset
    pub output_file_type: FileType,
}

/// Metric reference inside a manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Metric name as known by the service
    pub name: String,
}

/// Split used when the manifest does not name one
pub const DEFAULT_SPLIT: &str = "test";

fn default_split() -> String {
    DEFAULT_SPLIT.to_string()
}

impl ManifestEntry {
    /// Metric names in manifest order
    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.name.clone()).collect()
    }

    /// Resolve the service identifier of this entry's dataset
    pub fn dataset_id(&self) -> DatasetId {
        DatasetId::resolve(&self.dataset_name, self.sub_dataset.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "datasets": [
            {
                "dataset_name": "x",
                "sub_dataset": null,
                "dataset_split": "validation",
                "task": "t1",
                "metrics": [{"name": "Accuracy"}],
                "output_file_type": "json"
            },
            {
                "dataset_name": "y",
                "sub_dataset": "s",
                "task": "t1",
                "metrics": [{"name": "F1"}, {"name": "Precision"}],
                "output_file_type": "text"
            }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = BenchmarkManifest::from_json_str(MANIFEST).unwrap();
        assert_eq!(manifest.len(), 2);

        let first = &manifest.datasets[0];
        assert_eq!(first.sub_dataset, None);
        assert_eq!(first.dataset_split, "validation");
        assert_eq!(first.output_file_type, FileType::Json);
        assert_eq!(first.dataset_id().as_str(), "x");

        let second = &manifest.datasets[1];
        assert_eq!(second.dataset_split, DEFAULT_SPLIT);
        assert_eq!(second.metric_names(), vec!["F1", "Precision"]);
        assert_eq!(second.dataset_id().as_str(), "y.s");
    }

    #[test]
    fn test_missing_sub_dataset_key() {
        let manifest = BenchmarkManifest::from_json_str(
            r#"{"datasets": [{"dataset_name": "x", "task": "t", "metrics": [], "output_file_type": "tsv"}]}"#,
        )
        .unwrap();
        assert!(manifest.datasets[0].sub_dataset.is_none());
    }

    #[test]
    fn test_invalid_manifest() {
        let err = BenchmarkManifest::from_json_str(r#"{"datasets": [{"task": "t"}]}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MANIFEST");

        let err = BenchmarkManifest::from_json_str(
            r#"{"datasets": [{"dataset_name": "x", "task": "t", "metrics": [], "output_file_type": "xml"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidManifest(_)));
    }
}
