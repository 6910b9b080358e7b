use tracing::{debug, error, warn};

use crate::app::error::FetchError;
use crate::app::tmdb::Movie;

/// Tag carried by every search fetch; only the latest one may touch state.
pub type RequestId = u64;

/// Lifecycle of one asynchronous retrieval.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result list for the search box (or the popularity listing when it is empty).
#[derive(Debug, Default)]
pub struct SearchState {
    pub movies: Vec<Movie>,
    pub status: FetchStatus,
    latest_request: RequestId,
    active_query: String,
}

impl SearchState {
    /// Starts a fetch for `query` and returns the tag its result must carry.
    pub fn begin(&mut self, query: &str) -> RequestId {
        self.latest_request += 1;
        self.active_query = query.to_string();
        self.status = FetchStatus::Loading;
        self.latest_request
    }

    /// Applies a finished fetch. Returns `false` when it was superseded.
    ///
    /// On failure the previous `movies` stay in place.
    pub fn apply(&mut self, request: RequestId, outcome: Result<Vec<Movie>, FetchError>) -> bool {
        if request != self.latest_request {
            debug!(
                request,
                latest = self.latest_request,
                "Dropping superseded search result"
            );
            return false;
        }
        if !self.status.is_loading() {
            warn!(request, "Search result arrived twice");
            return false;
        }

        match outcome {
            Ok(movies) => {
                debug!(query = %self.active_query, count = movies.len(), "Search finished");
                self.movies = movies;
                self.status = FetchStatus::Success;
            }
            Err(err) => {
                error!(query = %self.active_query, error = %err, "Error fetching movies");
                self.status = FetchStatus::Failed(err.user_message().to_string());
            }
        }
        true
    }
}

/// The weekly trending strip.
#[derive(Debug, Default)]
pub struct TrendingState {
    pub movies: Vec<Movie>,
    pub status: FetchStatus,
}

impl TrendingState {
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Stores the list, or an empty one on failure. Returns `false` if not loading.
    pub fn apply(&mut self, outcome: Result<Vec<Movie>, FetchError>) -> bool {
        if !self.status.is_loading() {
            warn!("Trending result arrived while not loading");
            return false;
        }

        match outcome {
            Ok(movies) => {
                self.movies = movies;
                self.status = FetchStatus::Success;
            }
            Err(err) => {
                error!(error = %err, "Error fetching trending movies");
                self.movies.clear();
                self.status = FetchStatus::Failed(err.to_string());
            }
        }
        true
    }
}
