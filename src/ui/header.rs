use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the search box with the current query
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let search_block = Block::default()
        .title("Find Movies You'll Enjoy Without the Hassle")
        .borders(Borders::ALL)
        .style(Style::default());

    let line = if app.query.is_empty() {
        Line::from(vec![
            Span::styled("🔍 ", Style::default()),
            Span::styled(
                "Search through thousands of movies",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("🔍 ", Style::default()),
            Span::styled(app.query.as_str(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Gray)),
        ])
    };

    let search = Paragraph::new(line).block(search_block);

    frame.render_widget(search, area);
}
