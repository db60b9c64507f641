//! Playback session core
//!
//! The coordination engine for one media session: a single mutable
//! [`state::SessionState`] plus the transition functions that are allowed
//! to write it. Input flows in through [`input`] and [`command`], element
//! facts flow in through [`bridge`], and the host tick drives
//! [`visibility`]. Everything here is synchronous and single-threaded;
//! each event runs to completion before the next is looked at, so no
//! transition ever observes a half-applied sibling.

pub mod bridge;
pub mod command;
pub mod element;
pub mod focus;
pub mod input;
pub mod state;
pub mod timefmt;
pub mod visibility;

pub use command::{apply_command, Command, CommandOutcome};
pub use element::{ElementSignal, FullscreenDenied, MediaElement, MediaSource};
pub use state::{Playback, SessionState, DEFAULT_HIDE_DELAY, PLAYBACK_RATES};
