use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::loading::spinner;

/// Renders the top trending movies of the week, one per line
pub fn render_trending(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Trending This Week")
        .borders(Borders::ALL)
        .style(Style::default());

    let lines: Vec<Line> = if app.trending.status.is_loading() {
        vec![Line::from(format!("{} Loading trending movies...", spinner()))]
    } else if app.trending.movies.is_empty() {
        vec![Line::from(Span::styled(
            "No trending movies available.",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        app.trending
            .movies
            .iter()
            .enumerate()
            .map(|(index, movie)| {
                let poster = app
                    .poster_url(movie)
                    .unwrap_or_else(|| "No Image".to_string());

                Line::from(vec![
                    Span::styled(
                        format!("{} ", index + 1),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(movie.title.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  {}", poster), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
