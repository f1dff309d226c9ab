use serde::Deserialize;
use serde_json::Value;

/// Outcome reported by the backend for profile and slot operations,
/// the two keys are mutually exclusive
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OperationResult {
    Success(String),
    Error(String),
}

impl OperationResult {
    /// Interprets a response body, returns None if it holds neither key
    ///
    /// # Arguments
    ///
    /// * 'body' - parsed response body
    pub fn from_body(body: Value) -> Option<OperationResult> {
        serde_json::from_value(body).ok()
    }
}
