//! MediaWiki search API Data Transfer Objects
//!
//! These types match what `action=query&list=search&format=json` returns.
//! DO NOT use these types outside the wikipedia module.

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Missing when the API reports an error instead of results
    #[serde(default)]
    pub query: Option<SearchQuery>,
}

/// The `query` block of a search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

/// One search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchHit {
    /// Article title, e.g. "Hey Jude"
    pub title: String,
}

impl SearchResponse {
    /// Title of the highest-ranked hit.
    pub fn top_title(&self) -> Option<&str> {
        self.query
            .as_ref()?
            .search
            .first()
            .map(|hit| hit.title.as_str())
            .filter(|title| !title.trim().is_empty())
    }
}
