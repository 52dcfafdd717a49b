mod commands;
mod output;

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;

use commands::{
    normalize::{NormalizeArgs, handle_normalize},
    sort::{SortArgs, handle_sort},
};
use output::{OutputFormat, Printer};
use querynorm::{CanonicalKey, NormalizerConfig};

#[derive(Parser)]
#[command(name = "querynorm", version)]
#[command(about = "Normalize document-database query options")]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format (defaults to the config file's output.format, then table)
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Configuration file (defaults to querynorm.toml in the current directory or its ancestors)
    #[arg(long, env = "QUERYNORM_CONFIG")]
    config: Option<PathBuf>,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a JSON options document into its canonical form
    #[command(after_long_help = commands::normalize::AFTER_HELP)]
    Normalize(NormalizeArgs),

    /// Parse a sort expression into [field, direction] pairs
    #[command(after_long_help = commands::sort::AFTER_HELP)]
    Sort(SortArgs),
}

/// Shape each canonical key is coerced into on write.
fn canonical_shape(key: CanonicalKey) -> &'static str {
    match key {
        CanonicalKey::Fields => "ordered field list, or a field weight document",
        CanonicalKey::Sort => "ordered [field, 1|-1] pairs, or a verbatim direction document",
        CanonicalKey::Limit | CanonicalKey::Skip => "integer; blank strings clear the key",
    }
}

/// Long help listing every canonical key with its alias and coerced shape.
fn key_reference() -> String {
    let mut buffer = String::from("Canonical keys:\n");
    for key in CanonicalKey::ALL {
        let name = match key.alias() {
            Some(alias) => format!("{} / {alias}", key.as_str()),
            None => key.as_str().to_string(),
        };
        let _ = writeln!(buffer, "  {name:<15} {}", canonical_shape(key));
    }
    buffer.push_str("\nOther keys pass through unchanged. Set RUST_LOG=querynorm=debug to trace coercions.\n");
    buffer
}

fn main() {
    env_logger::init();

    let matches = Cli::command().after_long_help(key_reference()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = execute(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => Some(path),
        None => NormalizerConfig::discover(&std::env::current_dir()?),
    };
    let config = match &config_path {
        Some(path) => NormalizerConfig::load(path)?,
        None => NormalizerConfig::default(),
    };

    let configured_format = OutputFormat::from_config(&config.output.format);
    let printer = Printer {
        format: cli.output.or(configured_format.clone()).unwrap_or_default(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    match &config_path {
        Some(path) => printer.note(&format!("using config {}", path.display())),
        None => printer.note("no querynorm.toml found; using built-in defaults"),
    }
    if configured_format.is_none() {
        printer.warning(&format!(
            "unknown output.format '{}' in config; falling back to table",
            config.output.format
        ));
    }

    match cli.command {
        Commands::Normalize(args) => handle_normalize(args, &config, &printer)?,
        Commands::Sort(args) => handle_sort(args, &printer)?,
    }

    Ok(())
}
