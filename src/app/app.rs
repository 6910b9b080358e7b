use crate::app::debounce::Debouncer;
use crate::app::error::FetchError;
use crate::app::fetch::{fetch_movies_threaded, load_trending_movies_threaded};
use crate::app::recorder::SearchRecorder;
use crate::app::state::{FetchStatus, RequestId, SearchState, TrendingState};
use crate::app::tmdb::{CatalogApi, Movie, TmdbEndpoints, poster_url};
use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::{Arc, mpsc};
use std::time::Instant;
use tracing::{info, warn};

/// Sent by fetch workers back to the UI loop.
#[derive(Debug)]
pub enum FetchMessage {
    Search {
        request: RequestId,
        query: String,
        outcome: Result<Vec<Movie>, FetchError>,
    },
    Trending(Result<Vec<Movie>, FetchError>),
}

/// What the terminal loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

pub struct App {
    pub query: String,
    pub search: SearchState,
    pub trending: TrendingState,
    pub api_key_missing: bool,
    pub selected_movie_index: usize,
    pub list_state: ListState,
    debouncer: Debouncer<String>,
    api: Arc<dyn CatalogApi>,
    endpoints: TmdbEndpoints,
    image_base_url: String,
    trending_limit: usize,
    recorder: Option<Box<dyn SearchRecorder>>,
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
}

impl App {
    pub fn new(config: &Config, api: Arc<dyn CatalogApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            query: String::new(),
            search: SearchState::default(),
            trending: TrendingState::default(),
            api_key_missing: !config.has_api_key(),
            selected_movie_index: 0,
            list_state,
            debouncer: Debouncer::new(String::new(), config.debounce()),
            api,
            endpoints: TmdbEndpoints::new(&config.base_url, config.api_key()),
            image_base_url: config.image_base_url.clone(),
            trending_limit: config.trending_limit,
            recorder: None,
            sender,
            receiver,
        }
    }

    pub fn with_recorder(mut self, recorder: Box<dyn SearchRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Loads the trending strip and the listing for the initial empty query.
    pub fn start(&mut self) {
        self.load_trending_movies();
        let initial = self.debouncer.settled().clone();
        self.fetch_movies(&initial);
    }

    pub fn debounced_query(&self) -> &str {
        self.debouncer.settled()
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.debouncer.input(self.query.clone(), now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.debouncer.input(self.query.clone(), now);
        }
    }

    pub fn clear_query(&mut self, now: Instant) {
        self.query.clear();
        self.debouncer.input(String::new(), now);
    }

    /// Starts a search once the typed query has settled.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.fetch_movies(&query);
        }
    }

    pub fn fetch_movies(&mut self, query: &str) {
        let request = self.search.begin(query);
        info!(request, query = %query, "Starting movie fetch");

        let api = Arc::clone(&self.api);
        let endpoints = self.endpoints.clone();
        let sender = self.sender.clone();
        let query = query.to_string();

        std::thread::spawn(move || {
            fetch_movies_threaded(api, endpoints, request, query, sender);
        });
    }

    pub fn load_trending_movies(&mut self) {
        self.trending.begin();
        info!("Starting trending fetch");

        let api = Arc::clone(&self.api);
        let endpoints = self.endpoints.clone();
        let limit = self.trending_limit;
        let sender = self.sender.clone();

        std::thread::spawn(move || {
            load_trending_movies_threaded(api, endpoints, limit, sender);
        });
    }

    /// Applies every finished fetch without blocking. Returns how many arrived.
    pub fn drain_messages(&mut self) -> usize {
        let mut received = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
            received += 1;
        }
        received
    }

    fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Search {
                request,
                query,
                outcome,
            } => {
                if !self.search.apply(request, outcome) {
                    return;
                }
                if self.search.status == FetchStatus::Success {
                    self.selected_movie_index = 0;
                    self.list_state.select(Some(0));
                    self.record_search(&query);
                }
            }
            FetchMessage::Trending(outcome) => {
                self.trending.apply(outcome);
            }
        }
    }

    fn record_search(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        let (Some(recorder), Some(top_result)) = (self.recorder.as_mut(), self.search.movies.first())
        else {
            return;
        };

        if let Err(e) = recorder.record_search(query, top_result) {
            warn!(query = %query, error = %e, "Failed to record search");
        }
    }

    pub fn results_title(&self) -> String {
        let query = self.debounced_query();
        if query.is_empty() {
            "All Movies".to_string()
        } else {
            format!("Search Results for \"{}\"", query)
        }
    }

    pub fn poster_url(&self, movie: &Movie) -> Option<String> {
        poster_url(&self.image_base_url, movie.poster_path.as_deref())
    }

    pub fn next_movie(&mut self) {
        let movie_count = self.search.movies.len();
        if movie_count == 0 {
            return;
        }

        self.selected_movie_index = (self.selected_movie_index + 1) % movie_count;
        self.list_state.select(Some(self.selected_movie_index));
    }

    pub fn previous_movie(&mut self) {
        let movie_count = self.search.movies.len();
        if movie_count == 0 {
            return;
        }

        if self.selected_movie_index == 0 {
            self.selected_movie_index = movie_count - 1;
        } else {
            self.selected_movie_index = self.selected_movie_index.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected_movie_index));
    }

    /// Printable keys edit the query; chords other than Ctrl-c/j/k are ignored.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if ctrl => return KeyAction::Quit,
            KeyCode::Char('j') if ctrl => self.next_movie(),
            KeyCode::Char('k') if ctrl => self.previous_movie(),
            KeyCode::Char(c) if !chord => self.push_char(c, now),
            KeyCode::Backspace => self.pop_char(now),
            KeyCode::Esc => {
                if self.query.is_empty() {
                    return KeyAction::Quit;
                }
                self.clear_query(now);
            }
            KeyCode::Down => self.next_movie(),
            KeyCode::Up => self.previous_movie(),
            _ => {}
        }
        KeyAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::error::FETCH_ERROR_MESSAGE;
    use crate::app::recorder::RecorderError;
    use crate::app::testing::{MockCatalog, MockResponse, movie_json};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    type Recorded = Arc<Mutex<Vec<(String, u64)>>>;

    struct MemoryRecorder(Recorded);

    impl SearchRecorder for MemoryRecorder {
        fn record_search(&mut self, query: &str, top_result: &Movie) -> Result<(), RecorderError> {
            self.0.lock().unwrap().push((query.to_string(), top_result.id));
            Ok(())
        }
    }

    fn config() -> Config {
        Config {
            api_key: Some("key".to_string()),
            base_url: "https://api.test/3".to_string(),
            ..Config::default()
        }
    }

    fn app_with(api: MockCatalog) -> (App, Arc<MockCatalog>) {
        let api = Arc::new(api);
        let app = App::new(&config(), api.clone());
        (app, api)
    }

    /// Drains messages until nothing is loading, or panics after two seconds.
    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            app.drain_messages();
            if !app.search.status.is_loading() && !app.trending.status.is_loading() {
                return;
            }
            assert!(Instant::now() < deadline, "fetches did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn discover_and_trending() -> MockCatalog {
        let api = MockCatalog::new();
        let trending: Vec<_> = (1..=8).map(|id| movie_json(id, &format!("t{}", id))).collect();
        api.respond("/trending/movie/week", MockResponse::Json(json!({"results": trending})));
        api.respond(
            "/discover/movie",
            MockResponse::Json(json!({"results": [movie_json(10, "popular")]})),
        );
        api
    }

    #[test]
    fn test_start_loads_trending_and_discover() {
        let (mut app, api) = app_with(discover_and_trending());

        app.start();
        assert!(app.search.status.is_loading());
        assert!(app.trending.status.is_loading());
        settle(&mut app);

        assert_eq!(app.search.status, FetchStatus::Success);
        assert_eq!(app.search.movies[0].title, "popular");
        assert_eq!(app.trending.status, FetchStatus::Success);
        let ids: Vec<u64> = app.trending.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(api.requests().len(), 2);
        assert_eq!(app.results_title(), "All Movies");
    }

    #[test]
    fn test_failures_degrade_without_panicking() {
        let api = MockCatalog::new();
        api.respond("/trending/movie/week", MockResponse::Status(500));
        api.respond("/discover/movie", MockResponse::Malformed);
        let (mut app, _api) = app_with(api);

        app.start();
        settle(&mut app);

        assert_eq!(
            app.search.status,
            FetchStatus::Failed(FETCH_ERROR_MESSAGE.to_string())
        );
        assert!(app.trending.movies.is_empty());
        assert!(matches!(app.trending.status, FetchStatus::Failed(_)));
    }

    #[test]
    fn test_typing_searches_after_quiet_period() {
        let api = discover_and_trending();
        api.respond(
            "/search/movie?query=dune",
            MockResponse::Json(json!({"results": [movie_json(438631, "Dune")]})),
        );
        let (mut app, api) = app_with(api);
        app.start();
        settle(&mut app);

        let start = Instant::now();
        for (i, c) in "dune".chars().enumerate() {
            app.push_char(c, start + Duration::from_millis(i as u64 * 100));
        }
        app.tick(start + Duration::from_millis(400));
        assert!(!app.search.status.is_loading());

        app.tick(start + Duration::from_millis(800));
        assert!(app.search.status.is_loading());
        settle(&mut app);

        assert_eq!(app.debounced_query(), "dune");
        assert_eq!(app.results_title(), "Search Results for \"dune\"");
        assert_eq!(app.search.movies[0].title, "Dune");
        let searches = api
            .requests()
            .iter()
            .filter(|url| url.contains("/search/movie"))
            .count();
        assert_eq!(searches, 1);
    }

    #[test]
    fn test_clearing_query_returns_to_discover() {
        let (mut app, api) = app_with(discover_and_trending());
        let start = Instant::now();

        app.push_char('x', start);
        app.tick(start + Duration::from_millis(500));
        settle(&mut app);
        assert_eq!(app.search.status, FetchStatus::Failed(FETCH_ERROR_MESSAGE.to_string()));

        app.clear_query(start + Duration::from_millis(600));
        app.tick(start + Duration::from_millis(1100));
        settle(&mut app);

        assert_eq!(app.search.status, FetchStatus::Success);
        assert!(api.requests().last().unwrap().contains("/discover/movie"));
    }

    #[test]
    fn test_stale_response_does_not_overwrite_newer() {
        let (mut app, _api) = app_with(MockCatalog::new());
        let stale = app.search.begin("a");
        let current = app.search.begin("ab");

        app.sender
            .send(FetchMessage::Search {
                request: current,
                query: "ab".to_string(),
                outcome: Ok(vec![serde_json::from_value(movie_json(2, "ab")).unwrap()]),
            })
            .unwrap();
        app.sender
            .send(FetchMessage::Search {
                request: stale,
                query: "a".to_string(),
                outcome: Ok(vec![serde_json::from_value(movie_json(1, "a")).unwrap()]),
            })
            .unwrap();

        assert_eq!(app.drain_messages(), 2);
        assert_eq!(app.search.movies.len(), 1);
        assert_eq!(app.search.movies[0].title, "ab");
    }

    #[test]
    fn test_recorder_called_for_non_empty_search_with_results() {
        let api = discover_and_trending();
        api.respond(
            "/search/movie?query=heat",
            MockResponse::Json(json!({"results": [movie_json(949, "Heat"), movie_json(1, "Heat 2")]})),
        );
        api.respond("/search/movie?query=zzz", MockResponse::Json(json!({"results": []})));
        let recorded: Recorded = Arc::default();
        let (app, _api) = app_with(api);
        let mut app = app.with_recorder(Box::new(MemoryRecorder(recorded.clone())));

        app.start();
        settle(&mut app);
        app.fetch_movies("heat");
        settle(&mut app);
        app.fetch_movies("zzz");
        settle(&mut app);

        assert_eq!(*recorded.lock().unwrap(), vec![("heat".to_string(), 949)]);
    }

    #[test]
    fn test_selection_wraps() {
        let (mut app, _api) = app_with(MockCatalog::new());
        app.previous_movie();
        assert_eq!(app.selected_movie_index, 0);

        let request = app.search.begin("");
        app.search.apply(
            request,
            Ok((1..=3)
                .map(|id| serde_json::from_value(movie_json(id, "m")).unwrap())
                .collect()),
        );

        app.previous_movie();
        assert_eq!(app.selected_movie_index, 2);
        app.next_movie();
        assert_eq!(app.selected_movie_index, 0);
        assert_eq!(app.search.movies[app.selected_movie_index].id, 1);
    }

    #[test]
    fn test_modifier_chords_do_not_type() {
        let (mut app, _api) = app_with(MockCatalog::new());
        let now = Instant::now();

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(app.handle_key(ctrl_a, now), KeyAction::Continue);
        assert_eq!(app.handle_key(alt_b, now), KeyAction::Continue);
        assert_eq!(app.query, "");

        let upper = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE), now);
        app.handle_key(upper, now);
        assert_eq!(app.query, "xX");
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _api) = app_with(MockCatalog::new());
        let now = Instant::now();

        app.push_char('a', now);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.handle_key(esc, now), KeyAction::Continue);
        assert_eq!(app.query, "");
        assert_eq!(app.handle_key(esc, now), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, now), KeyAction::Quit);
    }

    #[test]
    fn test_missing_api_key_is_flagged() {
        let app = App::new(&Config::default(), Arc::new(MockCatalog::new()));
        assert!(app.api_key_missing);
    }
}
