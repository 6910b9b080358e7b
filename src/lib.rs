//! Terminal movie finder backed by the TMDB catalog.
//!
//! Typing searches the catalog once the query has been left alone for a
//! moment; an empty query lists popular movies. A weekly trending strip is
//! loaded once at startup.

pub mod app;
pub mod config;
pub mod logging;
pub mod ui;
