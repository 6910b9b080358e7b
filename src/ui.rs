mod footer;
mod header;
mod loading;
mod main_content;
mod missing_key;
mod trending;
mod ui;

pub use ui::ui;
