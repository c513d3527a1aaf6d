//! Error type for hosted-backend calls.

/// Errors from the hosted backend's HTTP surfaces.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Upstream error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for classification and logging.
        body: String,
    },
}

impl UpstreamError {
    /// The upstream HTTP status, when the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Request(_) => None,
        }
    }

    /// Best-effort human-readable message from the upstream body.
    ///
    /// The data layer and the auth provider use different body shapes;
    /// this checks the known message fields in order and falls back to the
    /// raw body text.
    pub fn message(&self) -> String {
        match self {
            UpstreamError::Request(e) => e.to_string(),
            UpstreamError::Status { status, body } => {
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                    for key in ["message", "error_description", "msg", "error"] {
                        if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                            return text.to_string();
                        }
                    }
                }
                if body.is_empty() {
                    format!("Upstream returned status {status}")
                } else {
                    body.clone()
                }
            }
        }
    }
}
