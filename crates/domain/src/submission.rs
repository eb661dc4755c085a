//! Submission records sent to the evaluation service.
//!
//! A [`SubmissionRecord`] is built fresh for every dataset of a benchmark
//! upload (from a manifest entry and its output file) or once for a
//! single-system evaluation (from an [`EvaluationRequest`]). Records only
//! reference local files; reading them is left to the client.

use crate::errors::{DomainError, DomainResult};
use crate::identifiers::DatasetId;
use crate::manifest::ManifestEntry;
use crate::output_files::OutputFile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Format of a system output or custom dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain text, one example per line
    Text,
    /// JSON document
    Json,
    /// Tab-separated values
    Tsv,
    /// CoNLL column format
    Conll,
}

impl FileType {
    /// Every supported file type
    pub const ALL: [FileType; 4] = [Self::Text, Self::Json, Self::Tsv, Self::Conll];

    /// Wire name of the file type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Tsv => "tsv",
            Self::Conll => "conll",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownFileType(s.to_string()))
    }
}

/// Task types the evaluation service analyzes
pub const TASK_TYPES: &[&str] = &[
    "text-classification",
    "named-entity-recognition",
    "qa-extractive",
    "summarization",
    "machine-translation",
    "text-pair-classification",
    "aspect-based-sentiment-classification",
    "kg-link-tail-prediction",
    "qa-multiple-choice",
    "qa-open-domain",
    "conditional-generation",
    "word-segmentation",
    "language-modeling",
    "chunking",
    "qa-tat",
    "argument-pair-extraction",
    "grammatical-error-correction",
    "cloze-mutiple-choice",
    "cloze-generative",
    "tabular-classification",
    "tabular-regression",
];

/// Source and target language of a system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Language on the input side
    pub source: String,
    /// Language on the output side
    pub target: String,
}

/// Language assumed when nothing says otherwise
pub const DEFAULT_LANGUAGE: &str = "en";

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: DEFAULT_LANGUAGE.to_string(),
            target: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Fields shared by every submission of one benchmark upload
#[derive(Debug, Clone, Default)]
pub struct SharedSubmission {
    /// Name of the system being submitted
    pub system_name: String,
    /// Whether the results are publicly visible
    pub public: bool,
    /// Emails of users the results are shared with
    pub shared_users: Vec<String>,
    /// Free-form description of the system
    pub system_details: Map<String, Value>,
    /// Languages recorded for every dataset.
    ///
    /// The manifest carries no per-dataset language, so one pair applies to the whole batch.
    pub languages: LanguagePair,
}

/// Turn a parsed system details document into the object stored on a record
pub fn system_details_from_value(value: Value) -> DomainResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(DomainError::InvalidSystemDetails {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Metadata describing a submitted system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetadata {
    pub task: String,
    pub is_private: bool,
    pub system_name: String,
    pub metric_names: Vec<String>,
    pub source_language: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_metadata_id: Option<DatasetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_split: Option<String>,
    pub shared_users: Vec<String>,
    pub system_details: Map<String, Value>,
}

/// Local file holding the system's predictions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOutput {
    pub path: PathBuf,
    /// `None` lets the service infer the format
    pub file_type: Option<FileType>,
}

/// Local file holding a dataset that is not registered on the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDataset {
    pub path: PathBuf,
    pub file_type: Option<FileType>,
}

/// Everything needed to create one system on the service
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub metadata: SystemMetadata,
    pub system_output: SystemOutput,
    pub custom_dataset: Option<CustomDataset>,
}

impl SubmissionRecord {
    /// Build the record for one dataset of a benchmark upload
    pub fn for_manifest_entry(
        entry: &ManifestEntry,
        output: &OutputFile,
        shared: &SharedSubmission,
    ) -> Self {
        let metadata = SystemMetadata {
            task: entry.task.clone(),
            is_private: !shared.public,
            system_name: shared.system_name.clone(),
            metric_names: entry.metric_names(),
            source_language: shared.languages.source.clone(),
            target_language: shared.languages.target.clone(),
            dataset_metadata_id: Some(entry.dataset_id()),
            dataset_split: Some(entry.dataset_split.clone()),
            shared_users: shared.shared_users.clone(),
            system_details: shared.system_details.clone(),
        };

        Self {
            metadata,
            system_output: SystemOutput {
                path: output.path.clone(),
                file_type: Some(entry.output_file_type),
            },
            custom_dataset: None,
        }
    }

    /// Name of the submitted system
    pub fn system_name(&self) -> &str {
        &self.metadata.system_name
    }
}

/// Dataset a single system is evaluated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSelection {
    /// Dataset registered on the service
    Registered {
        dataset: String,
        sub_dataset: Option<String>,
        split: String,
    },
    /// Dataset uploaded together with the system output
    Custom(CustomDataset),
}

/// Request to evaluate one system output file
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub task: String,
    pub system_name: String,
    pub system_output: SystemOutput,
    pub dataset: DatasetSelection,
    /// Empty means the task's default metrics
    pub metric_names: Vec<String>,
    pub languages: LanguagePair,
    pub public: bool,
    pub shared_users: Vec<String>,
    pub system_details: Map<String, Value>,
}

impl EvaluationRequest {
    /// Build the submission record for this evaluation
    pub fn into_record(self) -> SubmissionRecord {
        let (dataset_metadata_id, dataset_split, custom_dataset) = match self.dataset {
            DatasetSelection::Registered {
                dataset,
                sub_dataset,
                split,
            } => (
                Some(DatasetId::resolve(&dataset, sub_dataset.as_deref())),
                Some(split),
                None,
            ),
            DatasetSelection::Custom(custom) => (None, None, Some(custom)),
        };

        SubmissionRecord {
            metadata: SystemMetadata {
                task: self.task,
                is_private: !self.public,
                system_name: self.system_name,
                metric_names: self.metric_names,
                source_language: self.languages.source,
                target_language: self.languages.target,
                dataset_metadata_id,
                dataset_split,
                shared_users: self.shared_users,
                system_details: self.system_details,
            },
            system_output: self.system_output,
            custom_dataset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MetricSpec;
    use serde_json::json;

    fn entry() -> ManifestEntry {
        ManifestEntry {
            dataset_name: "y".to_string(),
            sub_dataset: Some("s".to_string()),
            dataset_split: "test".to_string(),
            metrics: vec![MetricSpec {
                name: "F1".to_string(),
            }],
            task: "t1".to_string(),
            output_file_type: FileType::Json,
        }
    }

    fn shared() -> SharedSubmission {
        SharedSubmission {
            system_name: "my-system".to_string(),
            public: false,
            shared_users: vec!["a@example.com".to_string()],
            system_details: system_details_from_value(json!({"model": "bert"})).unwrap(),
            languages: LanguagePair::default(),
        }
    }

    #[test]
    fn test_file_type_from_str() {
        assert_eq!("json".parse::<FileType>().unwrap(), FileType::Json);
        assert_eq!("CoNLL".parse::<FileType>().unwrap(), FileType::Conll);
        assert!("xml".parse::<FileType>().is_err());
        assert_eq!(FileType::Tsv.to_string(), "tsv");
    }

    #[test]
    fn test_task_types() {
        assert!(TASK_TYPES.contains(&"text-classification"));
        assert!(TASK_TYPES.contains(&"machine-translation"));
        assert!(TASK_TYPES
            .iter()
            .all(|t| t.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')));
    }

    #[test]
    fn test_record_for_manifest_entry() {
        let output = OutputFile::parse("out/2_y.json").unwrap();
        let record = SubmissionRecord::for_manifest_entry(&entry(), &output, &shared());

        assert_eq!(record.system_name(), "my-system");
        assert!(record.metadata.is_private);
        assert_eq!(record.metadata.metric_names, vec!["F1"]);
        assert_eq!(record.metadata.source_language, "en");
        assert_eq!(record.metadata.target_language, "en");
        assert_eq!(
            record.metadata.dataset_metadata_id,
            Some(DatasetId::new("y.s"))
        );
        assert_eq!(record.metadata.dataset_split.as_deref(), Some("test"));
        assert_eq!(record.metadata.system_details["model"], "bert");
        assert_eq!(record.system_output.path, PathBuf::from("out/2_y.json"));
        assert_eq!(record.system_output.file_type, Some(FileType::Json));
        assert!(record.custom_dataset.is_none());
    }

    #[test]
    fn test_configured_languages_are_used() {
        let mut shared = shared();
        shared.languages = LanguagePair {
            source: "de".to_string(),
            target: "fr".to_string(),
        };
        let output = OutputFile::parse("1.json").unwrap();
        let record = SubmissionRecord::for_manifest_entry(&entry(), &output, &shared);
        assert_eq!(record.metadata.source_language, "de");
        assert_eq!(record.metadata.target_language, "fr");
    }

    #[test]
    fn test_metadata_wire_format() {
        let output = OutputFile::parse("1.json").unwrap();
        let mut shared = shared();
        shared.public = true;
        let record = SubmissionRecord::for_manifest_entry(&entry(), &output, &shared);
        let value = serde_json::to_value(&record.metadata).unwrap();

        assert_eq!(value["is_private"], false);
        assert_eq!(value["dataset_metadata_id"], "y.s");
        assert_eq!(value["shared_users"], json!(["a@example.com"]));
    }

    #[test]
    fn test_custom_dataset_evaluation_record() {
        let request = EvaluationRequest {
            task: "text-classification".to_string(),
            system_name: "sys".to_string(),
            system_output: SystemOutput {
                path: PathBuf::from("out.txt"),
                file_type: None,
            },
            dataset: DatasetSelection::Custom(CustomDataset {
                path: PathBuf::from("data.tsv"),
                file_type: Some(FileType::Tsv),
            }),
            metric_names: Vec::new(),
            languages: LanguagePair::default(),
            public: true,
            shared_users: Vec::new(),
            system_details: Map::new(),
        };

        let record = request.into_record();
        assert!(record.metadata.dataset_metadata_id.is_none());
        assert!(record.metadata.dataset_split.is_none());
        assert!(!record.metadata.is_private);
        assert_eq!(
            record.custom_dataset.map(|c| c.file_type),
            Some(Some(FileType::Tsv))
        );

        let value = serde_json::to_value(SystemMetadata {
            dataset_metadata_id: None,
            dataset_split: None,
            ..SubmissionRecord::for_manifest_entry(
                &entry(),
                &OutputFile::parse("1.json").unwrap(),
                &shared(),
            )
            .metadata
        })
        .unwrap();
        assert!(value.get("dataset_metadata_id").is_none());
    }

    #[test]
    fn test_registered_dataset_evaluation_record() {
        let request = EvaluationRequest {
            task: "t".to_string(),
            system_name: "sys".to_string(),
            system_output: SystemOutput {
                path: PathBuf::from("out.json"),
                file_type: Some(FileType::Json),
            },
            dataset: DatasetSelection::Registered {
                dataset: "sst2".to_string(),
                sub_dataset: None,
                split: "test".to_string(),
            },
            metric_names: vec!["Accuracy".to_string()],
            languages: LanguagePair::default(),
            public: false,
            shared_users: Vec::new(),
            system_details: Map::new(),
        };

        let record = request.into_record();
        assert_eq!(record.metadata.dataset_metadata_id, Some(DatasetId::new("sst2")));
        assert!(record.custom_dataset.is_none());
    }

    #[test]
    fn test_system_details_must_be_object() {
        assert!(system_details_from_value(json!({"a": 1})).is_ok());
        assert!(system_details_from_value(Value::Null).unwrap().is_empty());
        let err = system_details_from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "system details must be a JSON object, got an array");
    }
}
