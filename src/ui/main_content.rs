use crate::app::{App, Movie};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::loading::render_loading;

/// Renders the result list, or its loading / error / empty state
pub fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = app.results_title();

    if app.search.status.is_loading() {
        render_loading(frame, &title, area);
        return;
    }

    if let Some(message) = app.search.status.error_message() {
        let error_paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )))
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        frame.render_widget(error_paragraph, area);
        return;
    }

    if app.search.movies.is_empty() {
        let empty_block = Block::default()
            .title(format!("{} - no movies found", title))
            .borders(Borders::ALL)
            .style(Style::default());

        frame.render_widget(empty_block, area);
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .movies
        .iter()
        .map(|movie| {
            let poster = app
                .poster_url(movie)
                .unwrap_or_else(|| "No Image".to_string());

            let content = vec![
                Line::from(vec![Span::styled(
                    movie.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from(vec![Span::styled(
                    format!("  {}", movie_summary(movie)),
                    Style::default().fg(Color::Gray),
                )]),
                Line::from(vec![Span::styled(
                    format!("  {}", poster),
                    Style::default().fg(Color::DarkGray),
                )]),
            ];

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("{} ({})", title, app.search.movies.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// "★ 7.8 • 2023 • en", with "N/A" for whatever is missing
fn movie_summary(movie: &Movie) -> String {
    let rating = movie
        .vote_average
        .map(|vote| format!("{:.1}", vote))
        .unwrap_or_else(|| "N/A".to_string());
    let year = movie.year().unwrap_or("N/A");
    let language = movie.original_language.as_deref().unwrap_or("N/A");

    format!("★ {} • {} • {}", rating, year, language)
}
