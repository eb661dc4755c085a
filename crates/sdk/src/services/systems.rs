//! System service
//!
//! Service for creating and fetching evaluated systems.

use async_trait::async_trait;
use tracing::debug;

use crate::client::Client;
use crate::error::SdkResult;
use crate::models::{
    CreateSystemRequest, EvaluationRequest, SubmissionRecord, SubmissionResult, SystemId,
};

/// Remote operations needed to submit systems.
///
/// Implemented by [`SystemService`]; callers that drive submissions take this
/// trait so they can run against an in-memory service.
#[async_trait]
pub trait SystemsApi: Send + Sync {
    /// Create a system from a submission record
    async fn create_system(&self, record: &SubmissionRecord) -> SdkResult<SubmissionResult>;

    /// Fetch a system by its identifier
    async fn get_system(&self, id: &SystemId) -> SdkResult<SubmissionResult>;
}

/// Service for system operations
#[derive(Clone)]
pub struct SystemService {
    client: Client,
}

impl SystemService {
    /// Create a new system service
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a system
    ///
    /// Reads the files referenced by the record and uploads their content.
    /// Requires authentication.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use evalboard_sdk::Client;
    /// use evalboard_sdk::models::SubmissionRecord;
    ///
    /// # async fn example(record: SubmissionRecord) -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::builder().credentials("me@example.com", "key").build()?;
    ///
    /// let result = client.systems().create(&record).await?;
    /// println!("Created system: {}", result.system_id());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, record: &SubmissionRecord) -> SdkResult<SubmissionResult> {
        let body = CreateSystemRequest::from_record(record).await?;
        debug!(
            system_name = %record.system_name(),
            output = %record.system_output.path.display(),
            "creating system"
        );
        self.client.post("/systems", &body).await
    }

    /// Get a system by ID
    pub async fn get(&self, id: &SystemId) -> SdkResult<SubmissionResult> {
        self.client.get(&format!("/systems/{}", id)).await
    }

    /// Evaluate a single system output file
    ///
    /// The returned result carries the overall metrics computed by the service.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use evalboard_sdk::Client;
    /// use evalboard_sdk::models::EvaluationRequest;
    ///
    /// # async fn example(request: EvaluationRequest) -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::from_env()?;
    ///
    /// let result = client.systems().evaluate_file(request).await?;
    /// if let Some(overall) = result.overall_metrics() {
    ///     for line in overall.lines() {
    ///         println!("{}", line);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn evaluate_file(&self, request: EvaluationRequest) -> SdkResult<SubmissionResult> {
        let record = request.into_record();
        self.create(&record).await
    }
}

#[async_trait]
impl SystemsApi for SystemService {
    async fn create_system(&self, record: &SubmissionRecord) -> SdkResult<SubmissionResult> {
        self.create(record).await
    }

    async fn get_system(&self, id: &SystemId) -> SdkResult<SubmissionResult> {
        self.get(id).await
    }
}
