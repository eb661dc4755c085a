//! Evaluation results returned by the service.
//!
//! The service answers with a large, loosely structured system document. Only
//! the system id is required; the payload is kept verbatim so it can be
//! written to a report file, and the overall metric section is parsed on
//! demand through [`SubmissionResult::overall_metrics`].

use crate::identifiers::SystemId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// JSON pointer to the dataset-wide metric list of the first analysis level
const OVERALL_RESULTS_POINTER: &str = "/system_info/results/overall/0";

/// Response of the service for one submitted system
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    system_id: SystemId,
    payload: Value,
}

impl SubmissionResult {
    /// Wrap a service payload, which must carry a string `system_id`
    pub fn from_payload(payload: Value) -> Result<Self, String> {
        let system_id = payload
            .get("system_id")
            .and_then(Value::as_str)
            .map(SystemId::from)
            .ok_or_else(|| "response has no string field 'system_id'".to_string())?;
        Ok(Self { system_id, payload })
    }

    /// Identifier assigned by the service
    pub fn system_id(&self) -> &SystemId {
        &self.system_id
    }

    /// Full response document
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Overall metric results, or `None` when the payload does not carry them
    /// in the expected shape (for example when evaluation failed upstream).
    pub fn overall_metrics(&self) -> Option<OverallResults> {
        let overall = self.payload.pointer(OVERALL_RESULTS_POINTER)?;
        let metrics = Vec::<MetricResult>::deserialize(overall).ok()?;
        Some(OverallResults { metrics })
    }
}

impl Serialize for SubmissionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SubmissionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        Self::from_payload(payload).map_err(de::Error::custom)
    }
}

/// One metric of the overall results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric_name: String,
    pub value: f64,
    pub confidence_score_low: f64,
    pub confidence_score_high: f64,
}

impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.4} [{:.4}, {:.4}]",
            self.metric_name, self.value, self.confidence_score_low, self.confidence_score_high
        )
    }
}

/// Dataset-wide metric summary, in service order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallResults {
    pub metrics: Vec<MetricResult>,
}

impl OverallResults {
    /// One rendered line per metric
    pub fn lines(&self) -> Vec<String> {
        self.metrics.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_overall(overall: Value) -> Value {
        json!({
            "system_id": "sys-1",
            "system_info": {"results": {"overall": overall}}
        })
    }

    #[test]
    fn test_metric_line_format() {
        let metric: MetricResult = serde_json::from_value(json!({
            "value": 0.8765,
            "confidence_score_low": 0.85,
            "confidence_score_high": 0.90,
            "metric_name": "Accuracy"
        }))
        .unwrap();
        assert_eq!(metric.to_string(), "Accuracy: 0.8765 [0.8500, 0.9000]");
    }

    #[test]
    fn test_overall_metrics_in_order() {
        let result = SubmissionResult::from_payload(payload_with_overall(json!([[
            {"metric_name": "F1", "value": 0.5, "confidence_score_low": 0.4, "confidence_score_high": 0.6},
            {"metric_name": "Accuracy", "value": 1, "confidence_score_low": 0.99999, "confidence_score_high": 1}
        ]])))
        .unwrap();

        let overall = result.overall_metrics().unwrap();
        assert_eq!(
            overall.lines(),
            vec![
                "F1: 0.5000 [0.4000, 0.6000]",
                "Accuracy: 1.0000 [1.0000, 1.0000]"
            ]
        );
    }

    #[test]
    fn test_missing_overall_section() {
        let result = SubmissionResult::from_payload(json!({"system_id": "x"})).unwrap();
        assert!(result.overall_metrics().is_none());

        let result = SubmissionResult::from_payload(payload_with_overall(json!([]))).unwrap();
        assert!(result.overall_metrics().is_none());
    }

    #[test]
    fn test_malformed_overall_section() {
        let result = SubmissionResult::from_payload(payload_with_overall(json!([[
            {"metric_name": "F1", "value": "high"}
        ]])))
        .unwrap();
        assert!(result.overall_metrics().is_none());

        let result =
            SubmissionResult::from_payload(payload_with_overall(json!({"F1": 0.3}))).unwrap();
        assert!(result.overall_metrics().is_none());
    }

    #[test]
    fn test_system_id_required() {
        assert!(SubmissionResult::from_payload(json!({"id": "x"})).is_err());
        assert!(serde_json::from_value::<SubmissionResult>(json!({"system_id": 5})).is_err());
    }

    #[test]
    fn test_payload_serialized_verbatim() {
        let payload = json!({"system_id": "abc", "extra": {"nested": [1, 2]}});
        let result: SubmissionResult = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(result.system_id().as_str(), "abc");
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }
}
