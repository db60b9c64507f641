//! Media element boundary
//!
//! The session core drives playback through the [`MediaElement`] trait and
//! hears back through [`ElementSignal`] values. Everything behind the trait
//! is platform territory: the element owns the real playback clock, the
//! session state only mirrors what the element reports.

use thiserror::Error;

/// Descriptor for the media a session plays.
#[derive(Debug, Clone)]
pub struct MediaSource {
    /// Location of the media payload
    pub url: String,
    /// Optional still shown before first play
    pub poster_url: Option<String>,
    /// Duration when the caller already knows it; metadata overrides this
    pub known_duration_seconds: Option<f64>,
}

impl MediaSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            poster_url: None,
            known_duration_seconds: None,
        }
    }

    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }

    pub fn with_known_duration(mut self, seconds: f64) -> Self {
        self.known_duration_seconds = Some(seconds);
        self
    }
}

/// The platform refused a fullscreen request.
///
/// Not a session failure: the router logs it and playback continues
/// windowed.
#[derive(Debug, Error)]
#[error("platform denied fullscreen request: {reason}")]
pub struct FullscreenDenied {
    pub reason: String,
}

impl FullscreenDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Imperative surface of the underlying playback element.
///
/// Calls are intent, not state: the session records what the user asked for
/// and waits for [`ElementSignal`]s to learn what actually happened. None of
/// these calls block.
pub trait MediaElement {
    /// Ask the element to start or resume playback.
    fn play(&mut self);

    /// Ask the element to pause.
    fn pause(&mut self);

    /// Move the playback clock to `seconds` (already clamped by the caller).
    fn seek(&mut self, seconds: f64);

    /// Write the effective output volume (0 while muted).
    fn set_output_volume(&mut self, volume: f64);

    /// Write the playback rate (a member of the discrete allowed set).
    fn set_rate(&mut self, rate: f64);

    /// Ask the platform to enter fullscreen on the player container.
    ///
    /// Denial is an expected outcome on platforms that gate the request;
    /// the confirmation, when granted, arrives later as
    /// [`ElementSignal::FullscreenChanged`].
    fn request_fullscreen(&mut self) -> Result<(), FullscreenDenied>;

    /// Ask the platform to leave fullscreen.
    fn exit_fullscreen(&mut self);
}

/// Event emitted by the element or the platform, in arrival order.
///
/// The bridge (`session::bridge`) folds these into the state. Signals carry
/// facts about the element; user intent never travels this way.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSignal {
    /// The playback clock moved
    Progress { seconds: f64 },
    /// The element learned the real duration
    MetadataReady { duration_seconds: f64 },
    /// Playback starved for data
    Stalled,
    /// Playback recovered from a stall
    Resumed,
    /// The platform's fullscreen element changed
    FullscreenChanged { is_player_container: bool },
}
