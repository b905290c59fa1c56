//! parkdeck-engine: optimistic-overlay reconciler.
//! Owns the async-data container and the local-edit overlay, drives poll
//! cycles against the session API, and computes the merged, sorted view.

pub mod overlay;
pub mod reconciler;

pub use overlay::OverlayStore;
pub use reconciler::{
    DEFAULT_DELAYED_AFTER, FeedPhase, SessionFeed, complete_session, create_session, poll_tick,
};
