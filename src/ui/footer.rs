use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.search.status.is_loading() {
        "Loading movies... (type) to search, (Ctrl-c) to quit"
    } else if app.query.is_empty() {
        "(type) to search, (↑↓) scroll, (Esc) quit"
    } else {
        "(type) to search, (↑↓) scroll, (Esc) clear search, (Ctrl-c) quit"
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom =
        Paragraph::new(Text::styled(instruction_text, Style::default())).block(bottom_block);

    frame.render_widget(bottom, area);
}
