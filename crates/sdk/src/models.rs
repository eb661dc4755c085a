//! SDK data models
//!
//! Wire representations of the requests sent to the evaluation service. The
//! domain records only point at local files; these types carry their content.

use crate::error::{SdkError, SdkResult};
use serde::Serialize;
use std::path::Path;

// Re-export domain types for convenience
pub use evalboard_domain::evaluation::{MetricResult, OverallResults, SubmissionResult};
pub use evalboard_domain::identifiers::{DatasetId, SystemId};
pub use evalboard_domain::submission::{
    CustomDataset, DatasetSelection, EvaluationRequest, FileType, LanguagePair,
    SubmissionRecord, SystemMetadata, SystemOutput,
};

/// Body of a create-system request
#[derive(Debug, Clone, Serialize)]
pub struct CreateSystemRequest<'a> {
    /// System metadata
    pub metadata: &'a SystemMetadata,
    /// Content of the system output file
    pub system_output: FilePayload,
    /// Content of the custom dataset file, if any
    pub custom_dataset: Option<FilePayload>,
}

impl<'a> CreateSystemRequest<'a> {
    /// Read the files referenced by a record and build the request body
    pub async fn from_record(record: &'a SubmissionRecord) -> SdkResult<CreateSystemRequest<'a>> {
        let system_output =
            FilePayload::read(&record.system_output.path, record.system_output.file_type).await?;

        let custom_dataset = match &record.custom_dataset {
            Some(dataset) => Some(FilePayload::read(&dataset.path, dataset.file_type).await?),
            None => None,
        };

        Ok(Self {
            metadata: &record.metadata,
            system_output,
            custom_dataset,
        })
    }
}

/// Inline file content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePayload {
    /// File content
    pub data: String,
    /// File format, `None` lets the service infer it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
}

impl FilePayload {
    /// Read a local file
    pub async fn read(path: &Path, file_type: Option<FileType>) -> SdkResult<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SdkError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { data, file_type })
    }
}
