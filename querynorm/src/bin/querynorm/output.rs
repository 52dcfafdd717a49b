use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, Table, presets};
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

impl OutputFormat {
    /// Parse the `output.format` setting from `querynorm.toml`.
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Results that can be rendered in every [`OutputFormat`].
pub trait Render: Serialize {
    fn table(&self, no_color: bool) -> Table;
    fn compact(&self) -> String;
}

#[derive(Clone, Debug, Default)]
pub struct Printer {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

impl Printer {
    /// Format `data` for stdout, or `None` when output is suppressed.
    pub fn render<T: Render>(&self, data: &T) -> Result<Option<String>> {
        if self.quiet {
            return Ok(None);
        }
        let text = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Table => data.table(self.no_color).to_string(),
            OutputFormat::Compact => data.compact(),
        };
        Ok(Some(text))
    }

    pub fn display<T: Render>(&self, data: &T) -> Result<()> {
        if let Some(text) = self.render(data)? {
            println!("{text}");
        }
        Ok(())
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {message}", "warning:".yellow().bold());
        }
    }

    /// Diagnostic line shown only with `--verbose`.
    pub fn note(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{}", message.dimmed());
        }
    }

    /// Human-facing status line; JSON output stays machine-readable.
    pub fn info(&self, message: &str) {
        if !self.quiet && self.format != OutputFormat::Json {
            println!("{message}");
        }
    }
}

/// Table with a bold header row; plain ASCII borders when color is off.
pub fn table_with_header(no_color: bool, headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(if no_color { presets::ASCII_FULL } else { presets::UTF8_FULL_CONDENSED });
    let header: Vec<Cell> = headers
        .iter()
        .map(|name| {
            let cell = Cell::new(name).add_attribute(Attribute::Bold);
            if no_color { cell } else { cell.fg(Color::Cyan) }
        })
        .collect();
    table.set_header(header);
    table
}
