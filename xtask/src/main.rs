//! Build tasks for playdeck
//!
//! `cargo run -p xtask -- man` renders man pages, `completions` renders
//! shell completion scripts. Output lands under `target/dist/`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use playdeck::cli::Cli as PlaydeckCli;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Build tasks for playdeck")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Debug, Subcommand)]
enum Task {
    /// Generate man pages into target/dist/man
    Man,
    /// Generate shell completions into target/dist/completions
    Completions,
}

fn main() -> Result<()> {
    let xtask = Xtask::parse();
    match xtask.command {
        Task::Man => generate_man_pages(),
        Task::Completions => generate_completions(),
    }
}

fn dist_dir(kind: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("target").join("dist").join(kind);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

/// Render one man page per subcommand plus the top-level page.
fn generate_man_pages() -> Result<()> {
    let dir = dist_dir("man")?;
    let command = PlaydeckCli::command();

    let mut rendered = Vec::new();
    clap_mangen::Man::new(command.clone())
        .render(&mut rendered)
        .context("failed to render man page")?;
    let path = dir.join("playdeck.1");
    fs::write(&path, &rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());

    for sub in command.get_subcommands() {
        if sub.is_hide_set() {
            continue;
        }
        let name = format!("playdeck-{}", sub.get_name());
        let mut rendered = Vec::new();
        clap_mangen::Man::new(sub.clone().name(name.clone()))
            .render(&mut rendered)
            .with_context(|| format!("failed to render man page for {name}"))?;
        let path = dir.join(format!("{name}.1"));
        fs::write(&path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

/// Render completion scripts for the common shells.
fn generate_completions() -> Result<()> {
    let dir = dist_dir("completions")?;
    let mut command = PlaydeckCli::command();

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        let path =
            clap_complete::generate_to(shell, &mut command, "playdeck", &dir)
                .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
