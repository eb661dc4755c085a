//! Sequential benchmark submission.
//!
//! Every dataset of a benchmark is submitted on its own: the system is
//! created, then read back by id to confirm it exists. A failed read-back is
//! reported and the batch moves on; a failed create aborts the batch. Requests
//! are paced by a fixed delay so the service is never hit back to back.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use evalboard_domain::{DatasetId, ManifestEntry, OutputFile, SharedSubmission, SubmissionRecord, SystemId};
use evalboard_sdk::{SdkError, SystemsApi};
use tracing::{info, warn};

use crate::output::colors;

/// Waits between two consecutive submissions
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Block until the next submission may start
    async fn pause(&self);
}

/// Pacer that waits the same amount of time before every submission but the first
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Create a pacer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// What happened to one dataset of the batch
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Created and confirmed by the read-back
    Confirmed { system_id: SystemId },
    /// Created, but the read-back failed
    ReadBackFailed { system_id: SystemId, error: String },
}

impl ItemOutcome {
    /// Whether the read-back found the created system
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Identifier the service assigned on create
    pub fn system_id(&self) -> &SystemId {
        match self {
            Self::Confirmed { system_id } | Self::ReadBackFailed { system_id, .. } => system_id,
        }
    }
}

/// Outcome of one dataset together with what was submitted
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub index: usize,
    pub dataset_id: DatasetId,
    pub output_file: PathBuf,
    pub outcome: ItemOutcome,
}

/// Outcomes of a whole batch, in manifest order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    /// Number of datasets confirmed by a read-back
    pub fn confirmed(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_confirmed()).count()
    }

    /// Number of datasets whose read-back failed
    pub fn failed(&self) -> usize {
        self.items.len() - self.confirmed()
    }
}

/// A batch stopped before all datasets were attempted
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(
        "failed to create system for dataset {dataset_id} (entry {index}, {})",
        output.display()
    )]
    CreateFailed {
        index: usize,
        dataset_id: DatasetId,
        output: PathBuf,
        /// Datasets processed before the failure
        completed: BatchReport,
        #[source]
        source: SdkError,
    },
}

/// Submits manifest entries one after another
pub struct BatchSubmitter<'a, A: ?Sized, P> {
    api: &'a A,
    pacer: P,
    shared: &'a SharedSubmission,
}

impl<'a, A, P> BatchSubmitter<'a, A, P>
where
    A: SystemsApi + ?Sized,
    P: Pacer,
{
    /// Create a submitter sending through `api`, paced by `pacer`
    pub fn new(api: &'a A, pacer: P, shared: &'a SharedSubmission) -> Self {
        Self { api, pacer, shared }
    }

    /// Submit every (entry, file) pair in order.
    pub async fn submit_all(
        &self,
        pairs: &[(&ManifestEntry, &OutputFile)],
    ) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport::default();
        let system_name = &self.shared.system_name;

        for (index, (entry, file)) in pairs.iter().enumerate() {
            if index > 0 {
                self.pacer.pause().await;
            }

            let record = SubmissionRecord::for_manifest_entry(entry, file, self.shared);
            let dataset_id = entry.dataset_id();
            info!(
                index,
                total = pairs.len(),
                dataset = %dataset_id,
                output = %file.path.display(),
                "submitting system"
            );

            let created = match self.api.create_system(&record).await {
                Ok(created) => created,
                Err(source) => {
                    return Err(BatchError::CreateFailed {
                        index,
                        dataset_id,
                        output: file.path.clone(),
                        completed: report,
                        source,
                    });
                }
            };

            let system_id = created.system_id().clone();
            let outcome = match self.api.get_system(&system_id).await {
                Ok(_) => {
                    println!(
                        "{}",
                        colors::success(&format!(
                            "successfully posted system {} with ID {}",
                            system_name, system_id
                        ))
                    );
                    ItemOutcome::Confirmed { system_id }
                }
                Err(e) => {
                    warn!(dataset = %dataset_id, system_id = %system_id, error = %e, "read-back failed");
                    println!(
                        "{}",
                        colors::error(&format!("failed to post system {}", system_name))
                    );
                    ItemOutcome::ReadBackFailed {
                        system_id,
                        error: e.to_string(),
                    }
                }
            };

            report.items.push(ItemReport {
                index,
                dataset_id,
                output_file: file.path.clone(),
                outcome,
            });
        }

        Ok(report)
    }
}
