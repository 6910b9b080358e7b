//! TMDB (The Movie Database) API client.
//!
//! Every request carries the API key as a query parameter and asks for JSON.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

const POSTER_SIZE: &str = "w200";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    /// Release year taken from `release_date` ("2023-07-19" -> "2023").
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// One page of a search, discover or trending listing.
#[derive(Debug, Deserialize)]
struct MoviePage {
    #[serde(default)]
    results: Option<Vec<Movie>>,
}

/// Extracts the `results` of a listing. A body without `results` is an empty page.
pub fn parse_page(body: serde_json::Value) -> Result<Vec<Movie>, FetchError> {
    let page: MoviePage = serde_json::from_value(body)
        .map_err(|e| FetchError::Parse(format!("Failed to parse movie page: {}", e)))?;

    Ok(page.results.unwrap_or_default())
}

/// Something that can GET a URL and hand back its JSON body.
pub trait CatalogApi: Send + Sync {
    fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Blocking TMDB client, meant to be called from a worker thread.
pub struct TmdbClient {
    client: Client,
}

impl TmdbClient {
    /// `None` leaves requests without a timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl CatalogApi for TmdbClient {
    fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        debug!(url = %redact_api_key(url), "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Builds the listing URLs for one API base and key.
#[derive(Debug, Clone)]
pub struct TmdbEndpoints {
    base_url: String,
    api_key: String,
}

impl TmdbEndpoints {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Text search when `query` is non-empty, the popularity listing otherwise.
    pub fn movies_url(&self, query: &str) -> String {
        if query.is_empty() {
            self.discover_url()
        } else {
            self.search_url(query)
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?query={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    pub fn discover_url(&self) -> String {
        format!(
            "{}/discover/movie?sort_by=popularity.desc&api_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }

    pub fn trending_url(&self) -> String {
        format!(
            "{}/trending/movie/week?api_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Full poster URL, or `None` when the movie has no poster.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| {
            format!(
                "{}/{}{}",
                image_base_url.trim_end_matches('/'),
                POSTER_SIZE,
                path
            )
        })
}

/// Masks the `api_key` value so URLs can go to the log.
pub fn redact_api_key(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|offset| value_start + offset)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
