//! List-filter parameters for the session collection endpoint.

use serde::{Deserialize, Serialize};

/// Body of a list call. All fields are nullable on the wire; the paging
/// fields are accepted by the endpoint but unused by the watch surface.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
    pub active: Option<bool>,
    pub page_size: Option<u32>,
    pub start: Option<u32>,
}

impl SessionFilter {
    /// The client-surface filter: restrict to active sessions or not.
    pub fn active_only(flag: bool) -> Self {
        Self {
            active: Some(flag),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_only_sets_flag_without_paging() {
        let filter = SessionFilter::active_only(true);
        assert_eq!(filter.active, Some(true));
        assert!(filter.page_size.is_none());
        assert!(filter.start.is_none());
    }

    #[test]
    fn wire_body_matches_endpoint_names() {
        let filter = SessionFilter {
            active: Some(false),
            page_size: Some(25),
            start: None,
        };
        let value = serde_json::to_value(&filter).expect("serialize");
        assert_eq!(value["active"], false);
        assert_eq!(value["pageSize"], 25);
        assert!(value["start"].is_null());
    }
}
