use thiserror::Error;

/// The only failure text a user ever sees for a search, whatever went wrong.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Errors that can occur while talking to the movie catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The catalog answered with a non-2xx status.
    #[error("Catalog API returned status {status}")]
    Status { status: u16 },

    /// The body was not JSON, or not shaped like a result page.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Text shown to the user. The cause is only kept for the log.
    pub fn user_message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }
}
