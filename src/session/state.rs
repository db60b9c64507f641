//! Session state management
//!
//! Contains the central `SessionState` struct that holds all playback state
//! for one media session, plus the shared types used across session modules.
//!
//! Every field is private: the presentation layer reads through accessors and
//! all writes go through the transition functions in this module tree
//! (`command`, `bridge`, `visibility`, `input`). A session without a source
//! is inert - transitions return before touching any other field.

use std::time::{Duration, Instant};

use crate::session::element::MediaSource;

/// The discrete playback rates a session accepts.
///
/// `SetPlaybackRate` rejects anything outside this set.
pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Idle window before controls hide during playback (reference behavior).
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Derived playback state as the presentation layer sees it.
///
/// `Buffering` is a presentation flag layered over the play/pause intent;
/// it never replaces the intent itself (see `SessionState::playback`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// No source attached to this session
    Idle,
    /// Actively playing
    Playing,
    /// Paused by the user (or never started)
    Paused,
    /// Playback intent is set but the element reported a stall
    Buffering,
}

/// Central state record for one media session.
///
/// Owned by the coordination engine; created with a source (or explicitly
/// without one) and never re-sourced - a new source means a new session.
#[derive(Debug)]
pub struct SessionState {
    // === Source ===
    source: Option<MediaSource>,

    // === Playback ===
    /// Play/pause intent; only the command router writes this
    play_intent: bool,
    /// Element reported a stall; cleared when it resumes
    buffering: bool,
    current_time_seconds: f64,
    /// 0.0 until metadata (or a known duration) supplies one
    duration_seconds: f64,
    playback_rate: f64,

    // === Audio ===
    volume: f64,
    muted: bool,

    // === Platform mirror ===
    /// Mirrors the platform fullscreen element; written by the bridge only
    fullscreen: bool,

    // === Control-surface visibility ===
    controls_visible: bool,
    speed_menu_open: bool,
    /// Pending hide deadline; the one cancelable scheduled operation
    hide_deadline: Option<Instant>,
    hide_delay: Duration,
}

impl SessionState {
    /// Create session state for a supplied media source.
    ///
    /// Duration starts at the source's known duration when the caller has
    /// one, otherwise 0 until the element reports metadata. Playback starts
    /// paused with controls shown.
    pub fn new(source: MediaSource, hide_delay: Duration) -> Self {
        let duration_seconds = source
            .known_duration_seconds
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
            .max(0.0);

        Self {
            source: Some(source),
            play_intent: false,
            buffering: false,
            current_time_seconds: 0.0,
            duration_seconds,
            playback_rate: 1.0,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            controls_visible: true,
            speed_menu_open: false,
            hide_deadline: None,
            hide_delay,
        }
    }

    /// Create a session that has no playable source.
    ///
    /// Such a session is terminal: every command, signal, and timer tick is
    /// dropped and the presentation shows the no-media screen.
    pub fn without_source() -> Self {
        Self {
            source: None,
            play_intent: false,
            buffering: false,
            current_time_seconds: 0.0,
            duration_seconds: 0.0,
            playback_rate: 1.0,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            controls_visible: true,
            speed_menu_open: false,
            hide_deadline: None,
            hide_delay: DEFAULT_HIDE_DELAY,
        }
    }

    // === Read view (presentation layer + tests) ===

    /// Whether a playable source was supplied.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// The attached source, if any.
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    /// Derived playback state.
    ///
    /// `Idle` without a source. `Buffering` means playing intent with
    /// stalled delivery; a paused session reads `Paused` even while the
    /// element is starved, because the user's instruction wins the display.
    pub fn playback(&self) -> Playback {
        if self.source.is_none() {
            Playback::Idle
        } else if self.play_intent && self.buffering {
            Playback::Buffering
        } else if self.play_intent {
            Playback::Playing
        } else {
            Playback::Paused
        }
    }

    /// Current position in seconds.
    pub fn current_time_seconds(&self) -> f64 {
        self.current_time_seconds
    }

    /// Known duration in seconds; 0.0 while metadata is outstanding.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Stored volume in `[0, 1]`; preserved across mute.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether audio output is suppressed.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Volume actually written to the element: 0 while muted.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Current playback rate (a member of [`PLAYBACK_RATES`]).
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Mirror of the platform fullscreen element identity.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether the control surface is shown.
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Whether the speed menu popup is open.
    pub fn speed_menu_open(&self) -> bool {
        self.speed_menu_open
    }

    // === Transitions: playback ===

    /// True while the play/pause intent is "playing", independent of
    /// buffering. The toggle command branches on this, not on the derived
    /// state, so pausing works mid-stall.
    pub(crate) fn play_intent(&self) -> bool {
        self.play_intent
    }

    pub(crate) fn set_play_intent(&mut self, playing: bool) {
        self.play_intent = playing;
    }

    pub(crate) fn set_buffering(&mut self, buffering: bool) {
        self.buffering = buffering;
    }

    /// Write a position reported by the element.
    ///
    /// Lower-bounded at 0 always; upper-bounded by the duration once one is
    /// known. Before metadata the element is trusted as-is.
    pub(crate) fn set_time_from_element(&mut self, seconds: f64) {
        let mut t = seconds.max(0.0);
        if self.duration_seconds > 0.0 {
            t = t.min(self.duration_seconds);
        }
        self.current_time_seconds = t;
    }

    /// Clamp a seek target into `[0, duration]`.
    ///
    /// With an unknown duration this pins to 0, matching the reference
    /// behavior of seeking against a zero duration.
    pub(crate) fn clamp_seek_target(&self, seconds: f64) -> f64 {
        seconds.clamp(0.0, self.duration_seconds)
    }

    /// Record a seek the router already clamped and wrote to the element.
    pub(crate) fn set_current_time(&mut self, seconds: f64) {
        let mut t = seconds.max(0.0);
        if self.duration_seconds > 0.0 {
            t = t.min(self.duration_seconds);
        }
        self.current_time_seconds = t;
    }

    /// Record the duration from element metadata and re-clamp the position.
    pub(crate) fn set_duration(&mut self, seconds: f64) {
        self.duration_seconds = seconds.max(0.0);
        if self.duration_seconds > 0.0 {
            self.current_time_seconds = self.current_time_seconds.min(self.duration_seconds);
        }
    }

    // === Transitions: audio ===

    /// Set the volume from the volume control.
    ///
    /// Dragging the control to exactly 0 implies mute; any other value
    /// clears it through the `muted = (v == 0)` write.
    pub(crate) fn set_volume(&mut self, volume: f64) {
        let v = volume.clamp(0.0, 1.0);
        self.volume = v;
        self.muted = v == 0.0;
    }

    /// Flip mute. Muting preserves the stored volume; unmuting restores
    /// audible volume to full (1.0), not to the last nonzero value. That
    /// asymmetry is the documented quick "restore to full" behavior.
    pub(crate) fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.volume = 1.0;
        } else {
            self.muted = true;
        }
    }

    /// Step the volume by `delta`, clamped into `[0, 1]`.
    ///
    /// Only a positive nudge clears mute; nudging down to 0 leaves the muted
    /// flag as it was (the stored volume itself silences output).
    pub(crate) fn nudge_volume(&mut self, delta: f64) {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        if delta > 0.0 {
            self.muted = false;
        }
    }

    // === Transitions: rate ===

    /// Whether `rate` is a member of the allowed discrete set.
    pub fn is_allowed_rate(rate: f64) -> bool {
        PLAYBACK_RATES.iter().any(|&r| r == rate)
    }

    /// Apply an allowed rate and close the speed menu.
    ///
    /// Returns false (no state change at all) for a rate outside the set.
    pub(crate) fn set_playback_rate(&mut self, rate: f64) -> bool {
        if !Self::is_allowed_rate(rate) {
            return false;
        }
        self.playback_rate = rate;
        self.speed_menu_open = false;
        true
    }

    // === Transitions: platform mirror ===

    /// Written by the native event bridge only; the fullscreen request
    /// command never touches this.
    pub(crate) fn set_fullscreen_mirror(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    // === Transitions: control-surface visibility ===

    pub(crate) fn show_controls(&mut self) {
        self.controls_visible = true;
    }

    /// Hide the controls; the speed menu cannot outlive them.
    pub(crate) fn hide_controls(&mut self) {
        self.controls_visible = false;
        self.speed_menu_open = false;
    }

    pub(crate) fn toggle_speed_menu(&mut self) {
        self.speed_menu_open = !self.speed_menu_open;
    }

    pub(crate) fn close_speed_menu(&mut self) {
        self.speed_menu_open = false;
    }

    // === Hide-timer token ===

    pub(crate) fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    pub(crate) fn hide_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    pub(crate) fn arm_hide_timer(&mut self, deadline: Instant) {
        self.hide_deadline = Some(deadline);
    }

    pub(crate) fn cancel_hide_timer(&mut self) {
        self.hide_deadline = None;
    }
}
