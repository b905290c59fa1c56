//! Bearer credential source.
//!
//! Credential acquisition and refresh belong to an external identity
//! provider; the client only requires that a fresh token string is
//! obtainable before each call.

use parkdeck_core::ApiError;

/// Supplies the opaque bearer credential attached to every API call.
#[allow(async_fn_in_trait)]
pub trait TokenProvider {
    async fn bearer_token(&self) -> Result<String, ApiError>;
}

/// Fixed token handed in via flag or environment.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::Auth("no credential configured".to_string()));
        }
        Ok(self.token.clone())
    }
}
