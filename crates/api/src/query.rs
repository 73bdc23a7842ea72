//! Shared query parameter types for collection handlers.

use serde::Deserialize;

/// Raw collection-read parameters (`?page=&size=&sort=`).
///
/// The tokens stay as strings so the query engine classifies them itself:
/// a non-numeric `page` is a 400 by the contract, not an extractor
/// rejection with its own response shape.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Presence of either token selects the paginated read path.
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }
}
