//! Command-line interface definitions
//!
//! Lives in the library so the xtask man-page and completion generators
//! can reach the command tree without going through the binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Terminal playback deck with a notes editor and generated lessons.
#[derive(Debug, Parser)]
#[command(
    name = "playdeck",
    version = crate::version_string(),
    about = "Terminal media playback deck with notes and generated lessons",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the player on a media source
    Play(PlayArgs),
    /// Build and validate lesson documents
    Lesson {
        #[command(subcommand)]
        command: LessonCommands,
    },
    /// Show or locate the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Media source location (omit to open the empty player)
    pub source: Option<String>,

    /// Length of the simulated media, in seconds
    #[arg(long, default_value_t = 120.0)]
    pub duration: f64,

    /// Poster shown before first play
    #[arg(long)]
    pub poster: Option<String>,

    /// Lesson reply document to load alongside the media
    #[arg(long, value_name = "FILE")]
    pub lesson: Option<PathBuf>,

    /// Simulate a platform that refuses fullscreen requests
    #[arg(long)]
    pub deny_fullscreen: bool,

    /// Script a playback stall: trips at AT seconds, holds for SECS
    #[arg(long, value_name = "AT:SECS")]
    pub stall: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum LessonCommands {
    /// Parse and validate a lesson reply document
    Validate {
        /// Reply document to check
        file: PathBuf,
    },
    /// Print a lesson request document for the generation service
    Request {
        /// Question the lesson should answer
        question: String,
        /// Title of the problem the question comes from
        #[arg(long, requires = "description")]
        title: Option<String>,
        /// Description of the problem the question comes from
        #[arg(long, requires = "title")]
        description: Option<String>,
        /// Sample input to ground the worked example
        #[arg(long, value_name = "TEXT")]
        example_input: Option<String>,
        /// Audience hint
        #[arg(long, value_parser = ["beginner", "intermediate", "advanced"])]
        difficulty: Option<String>,
        /// Desired lesson length in seconds
        #[arg(long, value_name = "SECONDS")]
        length: Option<f64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}
