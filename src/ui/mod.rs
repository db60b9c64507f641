//! Terminal UI for the player
//!
//! Built on ratatui/crossterm. The app layer owns the terminal and the
//! event loop; `controls` holds the pure rendering primitives so the
//! control surface can be tested without a terminal.

pub mod app;
pub mod controls;
pub mod editor;
pub mod theme;

pub use app::PlayerApp;
pub use editor::NotesEditor;
pub use theme::Theme;
