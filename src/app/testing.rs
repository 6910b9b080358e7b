//! Mock catalog for tests.

use std::sync::Mutex;

use serde_json::{Value, json};

use crate::app::error::FetchError;
use crate::app::tmdb::CatalogApi;

/// Canned answer for requests whose URL contains a given fragment.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16),
    Malformed,
}

/// Records requested URLs and answers them from a list of canned responses.
///
/// URLs without a matching response get a 404.
#[derive(Debug, Default)]
pub struct MockCatalog {
    responses: Mutex<Vec<(String, MockResponse)>>,
    requests: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url_fragment: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .push((url_fragment.to_string(), response));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl CatalogApi for MockCatalog {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let response = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(MockResponse::Status(404));

        match response {
            MockResponse::Json(body) => Ok(body),
            MockResponse::Status(status) => Err(FetchError::Status { status }),
            MockResponse::Malformed => serde_json::from_str("<html>Bad Gateway</html>")
                .map_err(|e| FetchError::Parse(e.to_string())),
        }
    }
}

pub fn movie_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "poster_path": format!("/{}.jpg", id),
        "vote_average": 7.5,
        "release_date": "2024-03-01",
        "original_language": "en"
    })
}
