use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::footer::render_footer;
use super::header::render_header;
use super::main_content::render_main_content;
use super::missing_key::render_missing_api_key;
use super::trending::render_trending;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(7), // Trending strip
            Constraint::Min(1),    // Results
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_trending(frame, app, chunks[1]);

    // Every request fails without a key, so explain that instead of the error
    if app.api_key_missing {
        render_missing_api_key(frame, chunks[2]);
    } else {
        render_main_content(frame, app, chunks[2]);
    }

    render_footer(frame, app, chunks[3]);
}
