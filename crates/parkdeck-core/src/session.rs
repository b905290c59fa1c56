//! Parking session domain model and lifecycle operations.
//!
//! Wire format: camelCase field names, RFC 3339 timestamps, optional fields
//! encoded as JSON `null`. Records are store-owned: the client never
//! fabricates an id and never deletes a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Vehicle metadata ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicensePlate {
    pub state: String,
    pub number: String,
}

/// Vehicle details attached to a session. Everything except the plate is
/// independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMetadata {
    pub color: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub license_plate: LicensePlate,
}

// ─── Parking session ────────────────────────────────────────────────

/// One parking session. `time_out` absent means the session is active;
/// once set it is terminal for that attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSession {
    pub time_in: DateTime<Utc>,
    pub time_out: Option<DateTime<Utc>>,
    pub metadata: Option<VehicleMetadata>,
}

impl ParkingSession {
    /// Start a session at `now`: no metadata, no time out.
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            time_in: now,
            time_out: None,
            metadata: None,
        }
    }

    /// Attach vehicle metadata, preserving both timestamps.
    pub fn with_metadata(self, metadata: VehicleMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..self
        }
    }

    /// End the session at `now`. All other fields are preserved.
    /// `now` must not precede `time_in`.
    pub fn complete(self, now: DateTime<Utc>) -> Self {
        Self {
            time_out: Some(now),
            ..self
        }
    }

    /// A session is active iff it has no time out.
    pub fn is_active(&self) -> bool {
        self.time_out.is_none()
    }

    /// Invariant check used at the decode boundary: `time_out`, when
    /// present, must not precede `time_in`.
    pub fn is_well_formed(&self) -> bool {
        self.time_out.is_none_or(|out| out >= self.time_in)
    }
}

// ─── Session record ─────────────────────────────────────────────────

/// A session as stored: the store-assigned document id plus the session
/// fields, flattened on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    #[serde(flatten)]
    pub session: ParkingSession,
}

impl SessionRecord {
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn time_in(&self) -> DateTime<Utc> {
        self.session.time_in
    }

    pub fn time_out(&self) -> Option<DateTime<Utc>> {
        self.session.time_out
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
