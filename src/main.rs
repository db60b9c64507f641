//! playdeck binary entry point

mod commands;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use playdeck::cli::{Cli, Commands, ConfigCommands, LessonCommands};

/// Install the tracing subscriber.
///
/// Silent unless `RUST_LOG` asks for output; everything goes to stderr so
/// log lines never land inside the alternate screen.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::handle_play(&args),
        Commands::Lesson { command } => match command {
            LessonCommands::Validate { file } => commands::lesson::handle_validate(&file),
            LessonCommands::Request {
                question,
                title,
                description,
                example_input,
                difficulty,
                length,
            } => commands::lesson::handle_request(
                &question,
                title.as_deref(),
                description.as_deref(),
                example_input.as_deref(),
                difficulty.as_deref(),
                length,
            ),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "playdeck", &mut io::stdout());
            Ok(())
        }
    }
}
