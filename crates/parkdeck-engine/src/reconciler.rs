//! Polling reconciler: drives fetch cycles into the async-data container
//! and merges the overlay into the externally visible view.
//!
//! One [`SessionFeed`] per polling context, shared behind a mutex so poll
//! completions and local user actions land on the same update queue.
//! Responses are applied in completion order: the last install wins, even
//! when an older request resolves after a newer one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Duration;

use parkdeck_api::SessionApi;
use parkdeck_core::{ApiError, AsyncData, SessionFilter, SessionRecord, VehicleMetadata};

use crate::overlay::OverlayStore;

/// How long a fetch may stay outstanding before it is flagged as delayed.
pub const DEFAULT_DELAYED_AFTER: Duration = Duration::from_secs(1);

// ─── Phase ──────────────────────────────────────────────────────────

/// Coarse fetch-cycle state, derived from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No fetch issued yet.
    Idle,
    /// A request is outstanding.
    Fetching,
    /// The last fetch resolved, successfully or not.
    Settled,
}

// ─── SessionFeed ────────────────────────────────────────────────────

/// State owned by one polling context: the container, the overlay, the
/// active filter, and the last successful poll timestamp.
#[derive(Debug, Default)]
pub struct SessionFeed {
    sessions: AsyncData<Vec<SessionRecord>, ApiError>,
    last_updated: Option<DateTime<Utc>>,
    overlay: OverlayStore,
    filter: SessionFilter,
}

impl SessionFeed {
    pub fn new(filter: SessionFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> FeedPhase {
        match &self.sessions {
            AsyncData::Empty => FeedPhase::Idle,
            AsyncData::Pending { .. } => FeedPhase::Fetching,
            AsyncData::Ready(_) | AsyncData::Failed(_) => FeedPhase::Settled,
        }
    }

    pub fn sessions(&self) -> &AsyncData<Vec<SessionRecord>, ApiError> {
        &self.sessions
    }

    /// Timestamp of the last successful poll; absent until the first one.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn filter(&self) -> &SessionFilter {
        &self.filter
    }

    /// Swap the active filter. Returns true when it actually changed, so
    /// the caller knows to refetch immediately.
    pub fn set_filter(&mut self, filter: SessionFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    pub fn overlay(&self) -> &OverlayStore {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayStore {
        &mut self.overlay
    }

    // ── Fetch cycle ──────────────────────────────────────────────────

    /// Mark a fetch as started, carrying the previous value (if any) for
    /// stale-while-refreshing presentations.
    pub fn begin_fetch(&mut self) {
        let previous = self.sessions.take_value();
        self.sessions = AsyncData::pending(previous);
    }

    pub fn mark_delayed(&mut self) {
        self.sessions.mark_delayed();
    }

    /// Install a resolved fetch. Success replaces the container, clears
    /// the overlay (the server has confirmed or superseded every local
    /// edit) and stamps `last_updated`. Failure installs `Failed` but keeps
    /// the overlay and the old timestamp: the server's view could not be
    /// confirmed, so local edits stay visible.
    pub fn install(&mut self, result: Result<Vec<SessionRecord>, ApiError>, now: DateTime<Utc>) {
        match result {
            Ok(records) => {
                self.sessions = AsyncData::Ready(records);
                self.overlay.reset();
                self.last_updated = Some(now);
            }
            Err(error) => {
                self.sessions = AsyncData::Failed(error);
            }
        }
    }

    // ── Merged view ──────────────────────────────────────────────────

    /// The externally observable view: the poll result with the overlay
    /// applied, re-sorted by `time_in` descending so locally created
    /// sessions interleave by their freshly stamped timestamps.
    pub fn merged(&self) -> AsyncData<Vec<SessionRecord>, ApiError> {
        self.sessions.clone().map(|poll_result| {
            let mut merged = self.overlay.apply(poll_result);
            merged.sort_by(|a, b| b.time_in().cmp(&a.time_in()));
            merged
        })
    }
}

// ─── Poll cycle ─────────────────────────────────────────────────────

/// Run one poll cycle: begin the fetch, race the list call against the
/// delayed threshold, install the outcome. Called on mount, on every
/// interval tick, and after a filter change.
pub async fn poll_tick<A: SessionApi>(
    api: &A,
    feed: &Arc<Mutex<SessionFeed>>,
    delayed_after: Duration,
) {
    let filter = {
        let mut st = feed.lock().await;
        st.begin_fetch();
        st.filter.clone()
    };

    let fetch = api.list(&filter);
    tokio::pin!(fetch);

    let result = tokio::select! {
        result = &mut fetch => result,
        () = tokio::time::sleep(delayed_after) => {
            feed.lock().await.mark_delayed();
            fetch.await
        }
    };

    if let Err(ref error) = result {
        tracing::warn!(%error, "session list poll failed");
    }
    feed.lock().await.install(result, Utc::now());
}

// ─── Local actions ──────────────────────────────────────────────────

/// Create a session remotely; on success record it in the overlay so it is
/// visible before the next poll confirms it. On failure nothing is touched
/// and the error is returned to the caller.
pub async fn create_session<A: SessionApi>(
    api: &A,
    feed: &Arc<Mutex<SessionFeed>>,
    metadata: &VehicleMetadata,
) -> Result<SessionRecord, ApiError> {
    let record = api.create(metadata).await.inspect_err(|error| {
        tracing::warn!(%error, "session create failed");
    })?;
    feed.lock().await.overlay_mut().record_created(record.clone());
    Ok(record)
}

/// Complete a session remotely; on success record the returned session in
/// the overlay's updated bucket, replacing the stale poll copy in the view.
pub async fn complete_session<A: SessionApi>(
    api: &A,
    feed: &Arc<Mutex<SessionFeed>>,
    id: &str,
) -> Result<SessionRecord, ApiError> {
    let record = api.complete(id).await.inspect_err(|error| {
        tracing::warn!(id, %error, "session complete failed");
    })?;
    feed.lock().await.overlay_mut().record_updated(record.clone());
    Ok(record)
}

// ─── Tests ──────────────────────────────────────────────────────────
