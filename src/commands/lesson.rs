//! Lesson subcommands handler

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use playdeck::lesson::{self, DifficultyLevel, LessonRequest, ProblemContext};
use playdeck::ui::Theme;

/// Validate a lesson reply document and summarize it.
#[cfg(not(tarpaulin_include))]
pub fn handle_validate(file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read lesson file {}", file.display()))?;
    let theme = Theme::default();

    match lesson::parse_reply(&raw) {
        Ok(lesson) => {
            println!("{}", theme.success_text("valid lesson"));
            println!("  objective: {}", lesson.objective);
            println!("  timeline entries: {}", lesson.timeline.len());
            if let Some(last) = lesson.timeline.last() {
                println!("  last chapter: {} at {}", last.label, last.formatted_time());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", theme.error_text("invalid lesson"));
            Err(anyhow!("status {}: {err}", err.status()))
        }
    }
}

/// Print a request document for the generation service.
#[cfg(not(tarpaulin_include))]
pub fn handle_request(
    question: &str,
    title: Option<&str>,
    description: Option<&str>,
    example_input: Option<&str>,
    difficulty: Option<&str>,
    length: Option<f64>,
) -> Result<()> {
    let mut request = LessonRequest::new(question);
    // clap guarantees the pair arrives together
    if let (Some(title), Some(description)) = (title, description) {
        request.problem_context = Some(ProblemContext {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
    request.example_input = example_input.map(str::to_string);
    request.difficulty_level = difficulty.and_then(DifficultyLevel::from_name);
    request.desired_length_seconds = length;

    match request.to_wire() {
        Ok(document) => {
            println!("{document}");
            Ok(())
        }
        Err(err) => {
            let theme = Theme::default();
            eprintln!("{}", theme.error_text("invalid lesson request"));
            Err(anyhow!("status {}: {err}", err.status()))
        }
    }
}
