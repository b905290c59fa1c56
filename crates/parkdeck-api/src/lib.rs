//! parkdeck-api: HTTP boundary to the remote session store.
//! Issues authenticated list/create/complete calls and decodes typed
//! responses. No merge logic, just the boundary adapter.

pub mod client;
pub mod token;
pub mod wire;

pub use client::{HttpSessionApi, SessionApi};
pub use token::{StaticToken, TokenProvider};
pub use wire::ApiEnvelope;
