//! # playdeck
//!
//! A terminal playback deck: one media session driven by a coordination
//! engine that routes user commands, mirrors element facts, and times the
//! control surface, with a notes editor and an optional generated lesson
//! alongside the player.
//!
//! The crate is organized around a strict write discipline:
//!
//! - `session`: the core. [`session::SessionState`] plus the only
//!   functions allowed to write it - the command router, the element
//!   bridge, the visibility timer, and the input decoders.
//! - `sim`: a deterministic [`sim::SimElement`] behind the element trait,
//!   used by the terminal host and by end-to-end tests.
//! - `lesson`: the JSON boundary to the lesson generation service.
//! - `ui`: the ratatui front end; it holds a read-only view of the state.
//! - `config` / `cli`: configuration file and command-line surface.

pub mod cli;
pub mod config;
pub mod lesson;
pub mod session;
pub mod sim;
pub mod ui;

pub use config::Config;
pub use session::{
    apply_command, Command, CommandOutcome, ElementSignal, MediaElement, MediaSource, Playback,
    SessionState,
};
pub use sim::SimElement;

/// Version string with the build's git SHA and date.
pub fn version_string() -> String {
    format!(
        "{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        env!("PLAYDECK_BUILD_DATE")
    )
}
