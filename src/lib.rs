//! Dojo - A TUI programming tutor with guided topic progression
//!
//! Dojo walks you through a fixed progression of topics per language,
//! unlocking each one as its prerequisites are completed, and drills you
//! with timed quizzes generated by a tutor service.

pub mod app;
pub mod config;
pub mod curriculum;
pub mod progress;
pub mod quiz;
pub mod service;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
