//! Success envelope wrapping every endpoint response.

use parkdeck_core::ApiError;
use serde::Deserialize;

/// `{ "status": "success", "data": ... }`. Any other `status` value means
/// the payload cannot be trusted and is reported as a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.status == "success" {
            Ok(self.data)
        } else {
            Err(ApiError::Decode(format!(
                "unexpected response status {:?}",
                self.status
            )))
        }
    }
}
