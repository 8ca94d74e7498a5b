//! Search panel state.
//!
//! Searches may overlap. Each one is tagged with a [`SearchToken`] from a
//! monotonically increasing sequence and only the response for the most
//! recently issued token is allowed to touch the visible results.

use crate::messages;
use crate::models::{Coordinate, InventoryResult};

/// Normalized search input. Blank fields are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub barcode: Option<String>,
    pub coordinates: Option<Coordinate>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(query: Option<&str>, barcode: Option<&str>) -> Self {
        Self {
            query: non_blank(query),
            barcode: non_blank(barcode),
            coordinates: None,
        }
    }

    #[must_use]
    pub fn near(mut self, coordinates: Option<Coordinate>) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Whether neither text nor barcode was given. Such a search is still
    /// sent; the backend decides what an unfiltered search returns.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_none() && self.barcode.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

impl SearchToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SearchPanel {
    latest: u64,
    results: Vec<InventoryResult>,
    message: Option<String>,
    loading: bool,
}

impl SearchPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a search: clears the message, raises `loading` and issues the
    /// token the response must carry.
    pub fn begin(&mut self) -> SearchToken {
        self.latest += 1;
        self.loading = true;
        self.message = None;
        SearchToken(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, token: SearchToken) -> bool {
        token.0 == self.latest
    }

    /// Applies a search outcome. Returns `false` (and changes nothing) when a
    /// newer search has been issued since `token`.
    ///
    /// A failed search empties the results and shows
    /// [`messages::SEARCH_FAILED`]; an empty success shows
    /// [`messages::NO_RESULTS`].
    pub fn finish<E>(
        &mut self,
        token: SearchToken,
        outcome: Result<Vec<InventoryResult>, E>,
    ) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(results) => {
                self.message = results
                    .is_empty()
                    .then(|| messages::NO_RESULTS.to_string());
                self.results = results;
            }
            Err(_) => {
                self.results.clear();
                self.message = Some(messages::SEARCH_FAILED.to_string());
            }
        }
        true
    }

    #[must_use]
    pub fn results(&self) -> &[InventoryResult] {
        &self.results
    }

    #[must_use]
    pub fn result(&self, index: usize) -> Option<&InventoryResult> {
        self.results.get(index)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Placeholder shown while the list is empty and nothing is loading.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        (self.results.is_empty() && !self.loading)
            .then_some(messages::START_SEARCHING)
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
