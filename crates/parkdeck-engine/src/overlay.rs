//! Local-edit overlay: sessions created or mutated locally that no poll
//! result has confirmed yet.
//!
//! Both buckets are keyed by the store-assigned id and are cleared as a
//! unit when a new poll result lands, never partially.

use std::collections::HashMap;

use parkdeck_core::SessionRecord;

// ─── OverlayStore ───────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct OverlayStore {
    /// Locally created sessions, most recent first.
    created: Vec<SessionRecord>,
    /// Locally mutated sessions; the last write for an id wins.
    updated: HashMap<String, SessionRecord>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a locally created session. Duplicate ids are a caller error;
    /// the single creation call site never produces one.
    pub fn record_created(&mut self, record: SessionRecord) {
        self.created.insert(0, record);
    }

    /// Insert or overwrite the local mutation for `record.id`.
    pub fn record_updated(&mut self, record: SessionRecord) {
        self.updated.insert(record.id.clone(), record);
    }

    /// Drop both buckets. Idempotent.
    pub fn reset(&mut self) {
        self.created.clear();
        self.updated.clear();
    }

    /// Pure merge: append the created bucket to `poll_result`, then
    /// substitute any record whose id has a local update. Ordering is the
    /// caller's concern.
    pub fn apply(&self, poll_result: Vec<SessionRecord>) -> Vec<SessionRecord> {
        poll_result
            .into_iter()
            .chain(self.created.iter().cloned())
            .map(|record| self.updated.get(&record.id).cloned().unwrap_or(record))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }

    pub fn created_len(&self) -> usize {
        self.created.len()
    }

    pub fn updated_len(&self) -> usize {
        self.updated.len()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
