mod app;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod recorder;
pub mod state;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, FetchMessage, KeyAction};
pub use error::{FETCH_ERROR_MESSAGE, FetchError};
pub use recorder::{FileSearchRecorder, SearchRecorder};
pub use state::FetchStatus;
pub use tmdb::{CatalogApi, Movie, TmdbClient};
