//! Simulated media element
//!
//! A deterministic element for the terminal host and for end-to-end tests:
//! it owns a playback clock advanced by the host tick and reports back
//! through the same signal queue a real platform element would use. The
//! session core cannot tell the difference, which is the point.
//!
//! Determinism rules: time only moves when [`SimElement::advance`] is
//! called, metadata is announced on the first advance after attach, and an
//! optional scripted stall freezes the clock for a fixed span to exercise
//! the buffering path.

use std::collections::VecDeque;
use std::time::Duration;

use crate::session::element::{ElementSignal, FullscreenDenied, MediaElement};

/// Scripted stall: trips when playback reaches `at_seconds`, holds for
/// `hold_seconds` of wall time.
#[derive(Debug, Clone, Copy)]
struct StallScript {
    at_seconds: f64,
    hold_seconds: f64,
}

/// Deterministic in-process media element.
#[derive(Debug)]
pub struct SimElement {
    playing: bool,
    position: f64,
    duration: f64,
    rate: f64,
    output_volume: f64,
    deny_fullscreen: bool,
    metadata_announced: bool,
    stall: Option<StallScript>,
    stall_remaining: f64,
    stalled: bool,
    pending: VecDeque<ElementSignal>,
}

impl SimElement {
    /// Element for media of the given length.
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            playing: false,
            position: 0.0,
            duration: duration_seconds.max(0.0),
            rate: 1.0,
            output_volume: 1.0,
            deny_fullscreen: false,
            metadata_announced: false,
            stall: None,
            stall_remaining: 0.0,
            stalled: false,
            pending: VecDeque::new(),
        }
    }

    /// Script a stall when playback reaches `at_seconds`.
    pub fn with_stall(mut self, at_seconds: f64, hold_seconds: f64) -> Self {
        self.stall = Some(StallScript {
            at_seconds,
            hold_seconds,
        });
        self
    }

    /// Refuse fullscreen requests, like a platform without the permission.
    pub fn with_fullscreen_denied(mut self) -> Self {
        self.deny_fullscreen = true;
        self
    }

    /// Advance the element clock by one host tick.
    ///
    /// Emits `MetadataReady` on the first call, then `Progress` for every
    /// tick that moves the clock. The clock pins at the duration; a
    /// scripted stall freezes it and emits the `Stalled`/`Resumed` pair.
    pub fn advance(&mut self, dt: Duration) {
        if !self.metadata_announced {
            self.metadata_announced = true;
            self.pending.push_back(ElementSignal::MetadataReady {
                duration_seconds: self.duration,
            });
        }

        if self.stalled {
            self.stall_remaining -= dt.as_secs_f64();
            if self.stall_remaining <= 0.0 {
                self.stalled = false;
                self.pending.push_back(ElementSignal::Resumed);
            }
            return;
        }

        if !self.playing {
            return;
        }

        if let Some(script) = self.stall {
            if self.position >= script.at_seconds {
                self.stall = None;
                self.stalled = true;
                self.stall_remaining = script.hold_seconds;
                self.pending.push_back(ElementSignal::Stalled);
                return;
            }
        }

        if self.position < self.duration {
            self.position = (self.position + dt.as_secs_f64() * self.rate).min(self.duration);
            self.pending.push_back(ElementSignal::Progress {
                seconds: self.position,
            });
        }
    }

    /// An outside actor changed the platform fullscreen element.
    ///
    /// Exists so hosts and tests can exercise the mirror without going
    /// through a request from this player.
    pub fn force_fullscreen_change(&mut self, is_player_container: bool) {
        self.pending.push_back(ElementSignal::FullscreenChanged {
            is_player_container,
        });
    }

    /// Next queued signal, oldest first.
    pub fn poll_signal(&mut self) -> Option<ElementSignal> {
        self.pending.pop_front()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn output_volume(&self) -> f64 {
        self.output_volume
    }
}

impl MediaElement for SimElement {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
        self.pending.push_back(ElementSignal::Progress {
            seconds: self.position,
        });
    }

    fn set_output_volume(&mut self, volume: f64) {
        self.output_volume = volume.clamp(0.0, 1.0);
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenDenied> {
        if self.deny_fullscreen {
            return Err(FullscreenDenied::new("platform policy denies fullscreen"));
        }
        // Confirmation arrives through the signal queue, not the return
        self.pending.push_back(ElementSignal::FullscreenChanged {
            is_player_container: true,
        });
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.pending.push_back(ElementSignal::FullscreenChanged {
            is_player_container: false,
        });
    }
}
