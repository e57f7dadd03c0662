use anyhow::Result;
use artboard_common::{is_valid_color, sanitize as sanitize_color};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Colors to check, e.g. "#fff" "oklch(0.6 0.1 30)"
    #[arg(required = true)]
    pub colors: Vec<String>,

    /// Print only the sanitized values, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn sanitize(args: SanitizeArgs, _cwd: &str) -> Result<()> {
    for input in &args.colors {
        let output = sanitize_color(input);
        if args.quiet {
            println!("{}", output);
        } else if is_valid_color(input) {
            println!("  {} {}", "✓".green(), output);
        } else {
            println!("  {} {} → {}", "✗".yellow(), input, output.bright_white());
        }
    }
    Ok(())
}
