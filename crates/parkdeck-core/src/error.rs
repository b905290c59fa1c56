//! Error taxonomy for the remote boundary.

use thiserror::Error;

/// Failures surfaced by the session API. Payloads are plain strings so the
/// type stays `Clone + PartialEq` and can live inside `AsyncData::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure or unexpected HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected schema. Carries a drawn
    /// diagnostic, not a raw serde dump.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Credential missing or rejected by the endpoint.
    #[error("authentication failed: {0}")]
    Auth(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = ApiError::Decode("missing field `timeIn`".to_string());
        assert!(err.to_string().contains("timeIn"));
    }
}
