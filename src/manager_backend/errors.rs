use thiserror::Error;
use ureq::http::StatusCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("error: {reason}")]
    Status { code: u16, reason: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("error: {0}")]
    Network(String),
    #[error("parsererror: {0}")]
    Parse(String),
}

impl TransportError {
    /// Short status text as shown first in the alert
    pub fn status_text(&self) -> &'static str {
        match self {
            TransportError::Status { .. } | TransportError::Network(_) => "error",
            TransportError::Timeout(_) => "timeout",
            TransportError::Parse(_) => "parsererror",
        }
    }

    pub fn description(&self) -> String {
        match self {
            TransportError::Status { reason, .. } => reason.clone(),
            TransportError::Timeout(e) | TransportError::Network(e) | TransportError::Parse(e) => e.clone(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> TransportError {
        match e {
            ureq::Error::StatusCode(code) => {
                let reason = StatusCode::from_u16(code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| code.to_string());
                TransportError::Status { code, reason }
            },
            ureq::Error::Timeout(t) => TransportError::Timeout(t.to_string()),
            other => TransportError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> TransportError {
        TransportError::Parse(e.to_string())
    }
}
