//! Listing page type.

use serde::{Deserialize, Serialize};

/// The result of one paginated listing request.
///
/// `next_continuation_token` is present iff more pages remain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Keys returned by this page
    pub keys: Vec<String>,

    /// Token to pass to the next request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_continuation_token: Option<String>,
}

impl ListingPage {
    /// Create a final page (no continuation).
    pub fn last(keys: Vec<String>) -> Self {
        Self {
            keys,
            next_continuation_token: None,
        }
    }

    /// Create a page followed by more pages.
    pub fn with_continuation(keys: Vec<String>, token: impl Into<String>) -> Self {
        Self {
            keys,
            next_continuation_token: Some(token.into()),
        }
    }

    /// Whether more pages remain after this one.
    pub fn has_more(&self) -> bool {
        self.next_continuation_token.is_some()
    }
}
