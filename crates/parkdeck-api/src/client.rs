//! HTTP client for the session endpoints.
//!
//! Every call POSTs a JSON body with a fresh bearer token and decodes the
//! response through [`ApiEnvelope`]. Decoded records are checked against the
//! domain invariants before they reach the reconciler.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use parkdeck_core::{ApiError, SessionFilter, SessionRecord, VehicleMetadata};

use crate::token::TokenProvider;
use crate::wire::ApiEnvelope;

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─── SessionApi ─────────────────────────────────────────────────────

/// The remote collection boundary. Implemented by [`HttpSessionApi`] in
/// production and by fakes in reconciler tests.
#[allow(async_fn_in_trait)]
pub trait SessionApi {
    /// Fetch the (filtered) collection. Ordering is not guaranteed; the
    /// reconciler re-sorts regardless.
    async fn list(&self, filter: &SessionFilter) -> Result<Vec<SessionRecord>, ApiError>;

    /// Create a session; returns the full record including the
    /// store-assigned id and time in.
    async fn create(&self, metadata: &VehicleMetadata) -> Result<SessionRecord, ApiError>;

    /// End a session; returns the full record with time out set.
    async fn complete(&self, id: &str) -> Result<SessionRecord, ApiError>;
}

// ─── HttpSessionApi ─────────────────────────────────────────────────

#[derive(Serialize)]
struct CompleteRequest<'a> {
    id: &'a str,
}

/// reqwest-backed [`SessionApi`].
#[derive(Debug, Clone)]
pub struct HttpSessionApi<P> {
    http: Client,
    base_url: String,
    tokens: P,
}

impl<P: TokenProvider> HttpSessionApi<P> {
    pub fn new(base_url: impl Into<String>, tokens: P) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.into()),
            tokens,
        })
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.bearer_token().await?;
        let url = format!("{}/{endpoint}", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!("status {status}: {text}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Network(format!("status {status}: {text}")));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        envelope.into_data()
    }
}

impl<P: TokenProvider> SessionApi for HttpSessionApi<P> {
    async fn list(&self, filter: &SessionFilter) -> Result<Vec<SessionRecord>, ApiError> {
        let records: Vec<SessionRecord> = self.post_json("listSessions", filter).await?;
        for record in &records {
            check_record(record)?;
        }
        tracing::debug!("listed {} sessions", records.len());
        Ok(records)
    }

    async fn create(&self, metadata: &VehicleMetadata) -> Result<SessionRecord, ApiError> {
        let record: SessionRecord = self.post_json("createSession", metadata).await?;
        check_record(&record)?;
        tracing::debug!(id = %record.id, "created session");
        Ok(record)
    }

    async fn complete(&self, id: &str) -> Result<SessionRecord, ApiError> {
        let record: SessionRecord = self
            .post_json("completeSession", &CompleteRequest { id })
            .await?;
        check_record(&record)?;
        tracing::debug!(id = %record.id, "completed session");
        Ok(record)
    }
}

/// Strip a trailing slash so endpoint joins never double up.
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Surface invariant violations as decode errors: a record that parsed but
/// contradicts the domain rules must not reach the reconciler.
fn check_record(record: &SessionRecord) -> Result<(), ApiError> {
    if !record.session.is_well_formed() {
        return Err(ApiError::Decode(format!(
            "session {}: timeOut precedes timeIn",
            record.id
        )));
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────
