//! Shared helpers for the integration suite

use std::path::PathBuf;
use std::time::{Duration, Instant};

use playdeck::session::{bridge, visibility, SessionState};
use playdeck::SimElement;

/// Host tick used throughout the suite; matches the default configuration.
pub const TICK: Duration = Duration::from_millis(250);

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Drive one host tick the way the terminal host does: advance the
/// element, fold its signals into the state, then fire the visibility
/// timer.
pub fn run_tick(state: &mut SessionState, sim: &mut SimElement, now: Instant) {
    sim.advance(TICK);
    while let Some(signal) = sim.poll_signal() {
        bridge::apply_signal(state, signal, now);
    }
    visibility::tick(state, now);
}
