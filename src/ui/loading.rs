use chrono::Utc;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Current frame of the braille spinner.
pub fn spinner() -> char {
    let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
    spinner_chars[spinner_idx]
}

/// Renders a loading block with a spinner
pub fn render_loading(frame: &mut Frame, title: &str, area: Rect) {
    let loading_block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default());

    let loading_text = vec![
        Line::from(format!("{} Loading movies...", spinner())),
        Line::from(""),
    ];

    let loading_paragraph = Paragraph::new(loading_text)
        .block(loading_block)
        .wrap(Wrap { trim: true });

    frame.render_widget(loading_paragraph, area);
}
