//! Lesson collaborator boundary
//!
//! A session can carry a generated mini-lesson (objective, narration
//! script, pseudocode, worked trace, chapter timeline, quiz) produced by a
//! separate generation service. This module owns both sides of that
//! boundary as plain JSON documents: building the request, and parsing plus
//! validating the reply. Transport is the embedding host's problem - the
//! session core never opens a connection.
//!
//! Replies are validated strictly. A reply that parses but omits required
//! fields is a contract violation reported with the exact field names, so
//! the failure surface stays debuggable from a log line.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::session::timefmt::format_timestamp;

/// Fields a lesson reply must carry to be usable.
const REQUIRED_LESSON_FIELDS: [&str; 6] = [
    "objective",
    "script",
    "pseudocode",
    "example_trace",
    "timeline",
    "quiz",
];

/// Audience hint the generation service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    /// Parse the wire name, as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "beginner" => Some(DifficultyLevel::Beginner),
            "intermediate" => Some(DifficultyLevel::Intermediate),
            "advanced" => Some(DifficultyLevel::Advanced),
            _ => None,
        }
    }
}

/// The problem statement a question is embedded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemContext {
    pub title: String,
    pub description: String,
}

/// Request document sent to the generation service.
///
/// Wire format is camelCase; the service contract predates this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    /// Question the lesson should answer
    pub question: String,
    /// Problem the question comes from, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_context: Option<ProblemContext>,
    /// Sample input to ground the worked example
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_input: Option<String>,
    /// Audience hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
    /// Target lesson length, to pace the timeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_length_seconds: Option<f64>,
}

impl LessonRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            problem_context: None,
            example_input: None,
            difficulty_level: None,
            desired_length_seconds: None,
        }
    }

    /// Serialize the request document for the host to send.
    ///
    /// An empty question is the one request-side contract violation; the
    /// service would bounce it with a 400, so it is caught here first.
    pub fn to_wire(&self) -> Result<String, LessonError> {
        if self.question.trim().is_empty() {
            return Err(LessonError::MissingQuestion);
        }
        serde_json::to_string_pretty(self).map_err(LessonError::Malformed)
    }
}

/// One chapter marker on the lesson timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Position in seconds the entry refers to
    pub time: f64,
    pub label: String,
}

impl TimelineEntry {
    /// The `M:SS` form shown in the chapter list.
    pub fn formatted_time(&self) -> String {
        format_timestamp(self.time)
    }
}

/// A validated lesson ready for the presentation layer.
///
/// Unlike the request side, the data payload is snake_case on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub objective: String,
    /// Presentation theme hint, freeform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub script: String,
    pub pseudocode: String,
    /// Worked example trace; shape is the generator's to evolve
    pub example_trace: Value,
    pub timeline: Vec<TimelineEntry>,
    /// Quiz payload; rendered verbatim by the host
    pub quiz: Value,
    /// Optional narration markup for hosts that synthesize audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssml: Option<Value>,
}

impl Lesson {
    /// Latest timeline entry at or before `seconds`, for chapter highlight.
    pub fn timeline_entry_at(&self, seconds: f64) -> Option<&TimelineEntry> {
        self.timeline
            .iter()
            .filter(|entry| entry.time <= seconds)
            .last()
    }
}

/// Why a lesson request or reply was unusable.
#[derive(Debug, Error)]
pub enum LessonError {
    /// A request cannot be built without a question
    #[error("lesson request requires a question")]
    MissingQuestion,
    /// Not valid JSON, or not the envelope shape
    #[error("malformed lesson reply: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Parsed, but required fields are absent
    #[error("lesson reply missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },
    /// Parsed and complete, but the content fails validation
    #[error("lesson reply invalid: {reason}")]
    Invalid { reason: String },
    /// The service sent a failure envelope
    #[error("lesson request rejected: {error}")]
    Rejected {
        error: String,
        details: Option<String>,
        /// Suggested wait in seconds, sent with rate-limit failures
        retry_after_seconds: Option<f64>,
    },
}

impl LessonError {
    /// HTTP-style status the host surfaces for this failure.
    ///
    /// A request without a question is the caller's fault, 400. Service
    /// failure envelopes carry only an error string, so they are classified
    /// by content: a retry hint or rate-limit message is 429, auth and
    /// quota failures are 403, a bounced question is 400. Everything else -
    /// malformed replies, missing or invalid fields, unclassified errors -
    /// is the collaborator failing, surfaced as 500.
    pub fn status(&self) -> u16 {
        match self {
            LessonError::MissingQuestion => 400,
            LessonError::Malformed(_)
            | LessonError::MissingFields { .. }
            | LessonError::Invalid { .. } => 500,
            LessonError::Rejected {
                error,
                retry_after_seconds,
                ..
            } => {
                let text = error.to_ascii_lowercase();
                if retry_after_seconds.is_some() || text.contains("rate limit") {
                    429
                } else if text.contains("auth") || text.contains("quota") {
                    403
                } else if text.contains("question") {
                    400
                } else {
                    500
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    retry_after: Option<f64>,
}

/// Parse and validate one reply document.
pub fn parse_reply(raw: &str) -> Result<Lesson, LessonError> {
    let envelope: ReplyEnvelope = serde_json::from_str(raw)?;

    if !envelope.success {
        let Some(error) = envelope.error else {
            return Err(LessonError::MissingFields {
                fields: vec!["error".to_string()],
            });
        };
        return Err(LessonError::Rejected {
            error,
            details: envelope.details,
            retry_after_seconds: envelope.retry_after,
        });
    }

    let Some(data) = envelope.data else {
        return Err(LessonError::MissingFields {
            fields: vec!["data".to_string()],
        });
    };

    let missing: Vec<String> = match data.as_object() {
        Some(map) => REQUIRED_LESSON_FIELDS
            .iter()
            .filter(|&&field| !map.contains_key(field))
            .map(|&field| field.to_string())
            .collect(),
        None => {
            return Err(LessonError::Invalid {
                reason: "data is not an object".to_string(),
            })
        }
    };
    if !missing.is_empty() {
        return Err(LessonError::MissingFields { fields: missing });
    }

    let lesson: Lesson = serde_json::from_value(data)?;
    validate_lesson(&lesson)?;
    Ok(lesson)
}

/// Content rules beyond field presence.
pub fn validate_lesson(lesson: &Lesson) -> Result<(), LessonError> {
    if lesson.objective.trim().is_empty() {
        return Err(LessonError::Invalid {
            reason: "objective is empty".to_string(),
        });
    }
    if lesson.script.trim().is_empty() {
        return Err(LessonError::Invalid {
            reason: "script is empty".to_string(),
        });
    }
    if lesson.pseudocode.trim().is_empty() {
        return Err(LessonError::Invalid {
            reason: "pseudocode is empty".to_string(),
        });
    }
    for (index, entry) in lesson.timeline.iter().enumerate() {
        if !entry.time.is_finite() || entry.time < 0.0 {
            return Err(LessonError::Invalid {
                reason: format!("timeline[{index}] has invalid time {}", entry.time),
            });
        }
        if entry.label.trim().is_empty() {
            return Err(LessonError::Invalid {
                reason: format!("timeline[{index}] has an empty label"),
            });
        }
    }
    Ok(())
}
