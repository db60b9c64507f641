//! Lesson boundary tests against on-disk reply documents

use std::fs;

use playdeck::lesson::{self, DifficultyLevel, LessonError, LessonRequest, ProblemContext};

use super::helpers::fixtures_dir;

fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

#[test]
fn complete_reply_parses_into_a_lesson() {
    let lesson = lesson::parse_reply(&fixture("lesson_ok.json")).unwrap();
    assert_eq!(lesson.objective, "Trace one partition step of quicksort");
    assert_eq!(lesson.theme.as_deref(), Some("sorting"));
    assert_eq!(lesson.timeline.len(), 3);
    assert!(lesson.ssml.is_some());
}

#[test]
fn timeline_lookup_tracks_the_playhead() {
    let lesson = lesson::parse_reply(&fixture("lesson_ok.json")).unwrap();

    assert_eq!(lesson.timeline_entry_at(0.0).unwrap().label, "Picking the pivot");
    assert_eq!(lesson.timeline_entry_at(36.0).unwrap().label, "The sweep");
    assert_eq!(lesson.timeline_entry_at(500.0).unwrap().label, "Final swap");
}

#[test]
fn timeline_entries_format_for_the_chapter_list() {
    let lesson = lesson::parse_reply(&fixture("lesson_ok.json")).unwrap();
    let last = lesson.timeline.last().unwrap();
    assert_eq!(last.formatted_time(), "1:18");
}

#[test]
fn missing_fields_are_named_in_order() {
    match lesson::parse_reply(&fixture("lesson_missing_fields.json")) {
        Err(LessonError::MissingFields { fields }) => {
            assert_eq!(fields, vec!["pseudocode", "timeline"]);
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

#[test]
fn rate_limited_failure_maps_to_429_with_a_retry_hint() {
    let err = lesson::parse_reply(&fixture("lesson_failure.json")).unwrap_err();
    assert_eq!(err.status(), 429);
    match err {
        LessonError::Rejected {
            error,
            details,
            retry_after_seconds,
        } => {
            assert!(error.contains("rate limit"));
            assert!(details.is_some());
            assert_eq!(retry_after_seconds, Some(30.0));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn contract_violations_read_as_server_errors() {
    let err = lesson::parse_reply(&fixture("lesson_missing_fields.json")).unwrap_err();
    assert_eq!(err.status(), 500);

    let err = lesson::parse_reply("][ not json").unwrap_err();
    assert_eq!(err.status(), 500);
}

#[test]
fn request_document_round_trips_through_the_wire_format() {
    let mut request = LessonRequest::new("Why is the partition stable around the pivot?");
    request.problem_context = Some(ProblemContext {
        title: "Sort an array".to_string(),
        description: "Given an array of integers, sort it ascending.".to_string(),
    });
    request.example_input = Some("[5, 2, 8, 1, 4]".to_string());
    request.difficulty_level = Some(DifficultyLevel::Beginner);
    request.desired_length_seconds = Some(95.0);

    let wire = request.to_wire().unwrap();
    let parsed: LessonRequest = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed.question, request.question);
    assert_eq!(parsed.example_input, request.example_input);
    assert_eq!(parsed.difficulty_level, Some(DifficultyLevel::Beginner));
    assert_eq!(parsed.desired_length_seconds, Some(95.0));
    assert!(wire.contains("\"problemContext\""));
    assert!(wire.contains("\"desiredLengthSeconds\""));
}

#[test]
fn empty_question_cannot_leave_the_client() {
    let err = LessonRequest::new("").to_wire().unwrap_err();
    assert_eq!(err.status(), 400);
}
