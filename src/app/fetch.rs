use std::sync::Arc;
use std::sync::mpsc;

use tracing::{debug, info};

use crate::app::FetchMessage;
use crate::app::error::FetchError;
use crate::app::state::RequestId;
use crate::app::tmdb::{CatalogApi, Movie, TmdbEndpoints, parse_page, redact_api_key};

/// Searches by text, or lists popular movies when `query` is empty.
pub fn fetch_movies(
    api: &dyn CatalogApi,
    endpoints: &TmdbEndpoints,
    query: &str,
) -> Result<Vec<Movie>, FetchError> {
    let url = endpoints.movies_url(query);
    debug!(url = %redact_api_key(&url), "Fetching movies");

    let body = api.get_json(&url)?;
    parse_page(body)
}

/// Fetches the weekly trending list, cut to the first `limit` entries.
pub fn load_trending_movies(
    api: &dyn CatalogApi,
    endpoints: &TmdbEndpoints,
    limit: usize,
) -> Result<Vec<Movie>, FetchError> {
    let url = endpoints.trending_url();
    debug!(url = %redact_api_key(&url), "Fetching trending movies");

    let mut movies = parse_page(api.get_json(&url)?)?;
    movies.truncate(limit);
    Ok(movies)
}

pub fn fetch_movies_threaded(
    api: Arc<dyn CatalogApi>,
    endpoints: TmdbEndpoints,
    request: RequestId,
    query: String,
    sender: mpsc::Sender<FetchMessage>,
) {
    let outcome = fetch_movies(api.as_ref(), &endpoints, &query);
    if let Ok(movies) = &outcome {
        info!(request, query = %query, count = movies.len(), "Movies fetched");
    }

    // The receiver is gone once the app has quit.
    let _ = sender.send(FetchMessage::Search {
        request,
        query,
        outcome,
    });
}

pub fn load_trending_movies_threaded(
    api: Arc<dyn CatalogApi>,
    endpoints: TmdbEndpoints,
    limit: usize,
    sender: mpsc::Sender<FetchMessage>,
) {
    let outcome = load_trending_movies(api.as_ref(), &endpoints, limit);
    let _ = sender.send(FetchMessage::Trending(outcome));
}
