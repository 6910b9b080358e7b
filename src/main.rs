use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use tracing::{error, info, warn};

use movie_finder::app::{App, FileSearchRecorder, KeyAction, TmdbClient};
use movie_finder::config::Config;
use movie_finder::{logging, ui};

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let log_path = logging::init_logging(&config);
    if let Err(e) = &log_path {
        eprintln!("Warning: logging disabled: {}", e);
    }
    info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path.ok(), "Starting movie_finder");
    if !config.has_api_key() {
        warn!("No TMDB API key configured; requests will be rejected");
    }

    let client = TmdbClient::new(config.request_timeout())?;
    let mut app = App::new(&config, Arc::new(client));
    if config.record_searches {
        match FileSearchRecorder::default_path() {
            Some(path) => {
                info!(path = %path.display(), "Recording searches");
                app = app.with_recorder(Box::new(FileSearchRecorder::new(
                    path,
                    &config.image_base_url,
                )));
            }
            None => warn!("No data directory; searches will not be recorded"),
        }
    }

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Terminal loop failed");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        // Apply whatever the fetch workers have finished
        app.drain_messages();
        app.tick(Instant::now());

        terminal.draw(|f| ui::ui(f, app))?;

        // Poll for events with a timeout to allow UI updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if app.handle_key(key, Instant::now()) == KeyAction::Quit {
            return Ok(());
        }
    }
}
