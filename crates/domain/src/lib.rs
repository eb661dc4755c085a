//! evalboard domain types
//!
//! This crate holds the model shared by the evalboard SDK and CLI: benchmark
//! manifests, system output files, submission records and the evaluation
//! results returned by the service. Nothing here performs I/O.
//!
//! ## Architecture
//!
//! - **identifiers**: system and dataset identifiers, dataset id resolution
//! - **manifest**: benchmark manifest entries
//! - **output_files**: output file naming convention, ordering and pairing
//! - **submission**: submission records and evaluation requests
//! - **evaluation**: service responses and overall metric results
//! - **errors**: validation errors
//!
//! ## Usage
//!
//! ```rust
//! use evalboard_domain::output_files::order_output_files;
//!
//! let files = order_output_files(["2.json", "1_sst2.json"]).unwrap();
//! assert_eq!(files[0].file_name(), "1_sst2.json");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod evaluation;
pub mod identifiers;
pub mod manifest;
pub mod output_files;
pub mod submission;

pub use errors::{DomainError, DomainResult};
pub use evaluation::{MetricResult, OverallResults, SubmissionResult};
pub use identifiers::{DatasetId, SystemId};
pub use manifest::{BenchmarkManifest, ManifestEntry, MetricSpec};
pub use output_files::{order_output_files, pair_with_manifest, Ordinal, OutputFile};
pub use submission::{
    CustomDataset, DatasetSelection, EvaluationRequest, FileType, LanguagePair, SharedSubmission,
    SubmissionRecord, SystemMetadata, SystemOutput,
};
