mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, init, inspect, render, sanitize, EditArgs, InitArgs, InspectArgs, RenderArgs,
    SanitizeArgs,
};
use tracing_subscriber::EnvFilter;

/// Artboard CLI - two-faced design editor
#[derive(Parser, Debug)]
#[command(name = "artboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new empty design in the store directory
    Init(InitArgs),

    /// Print the rendered VDOM of a design as JSON
    Render(RenderArgs),

    /// List the elements of a design in paint order
    Inspect(InspectArgs),

    /// Print sanitized colors
    Sanitize(SanitizeArgs),

    /// Apply an edit script to a design and save it
    Edit(EditArgs),
}

fn main() {
    // Logs go to stderr so rendered JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ARTBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Sanitize(args) => sanitize(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
