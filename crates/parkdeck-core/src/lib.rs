//! parkdeck-core: domain model and state containers.
//! Parking sessions, the list filter, the error taxonomy, and the
//! four-state async-data container. No IO, no tokio.

pub mod async_data;
pub mod error;
pub mod filter;
pub mod session;

pub use async_data::AsyncData;
pub use error::ApiError;
pub use filter::SessionFilter;
pub use session::{LicensePlate, ParkingSession, SessionRecord, VehicleMetadata};
