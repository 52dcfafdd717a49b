use std::io::Read;

use anyhow::{Context, Result, bail};
use clap::Args;
use comfy_table::{Cell, Table};
use querynorm::{NormalizerConfig, OptionValue, OptionsHash};
use serde::Serialize;

use crate::output::{Printer, Render, table_with_header};

pub const AFTER_HELP: &str = r#"Examples:
  querynorm normalize '{"order": "created_at desc", "select": "name, email", "offset": "20"}'
  cat options.json | querynorm --output json normalize -
"#;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Options as a JSON object, or '-' to read from stdin
    pub input: String,

    /// Ignore the [defaults] table of querynorm.toml
    #[arg(long)]
    pub no_defaults: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct NormalizedOptions(pub OptionsHash);

impl Render for NormalizedOptions {
    fn table(&self, no_color: bool) -> Table {
        let mut table = table_with_header(no_color, &["Option", "Value"]);
        for (key, value) in &self.0 {
            table.add_row(vec![Cell::new(key), Cell::new(value.to_json())]);
        }
        table
    }

    fn compact(&self) -> String {
        self.0.to_json().to_string()
    }
}

pub fn handle_normalize(args: NormalizeArgs, config: &NormalizerConfig, output: &Printer) -> Result<()> {
    let source = read_input(&args.input)?;
    let options = normalize_source(&source, config, args.no_defaults)?;

    if options.is_empty() {
        output.info("no options left after normalization");
        return Ok(());
    }
    output.display(&NormalizedOptions(options))
}

/// Seed config defaults (unless disabled), then apply the caller's JSON options on top.
pub fn normalize_source(source: &str, config: &NormalizerConfig, no_defaults: bool) -> Result<OptionsHash> {
    let mut options = if no_defaults {
        OptionsHash::new()
    } else {
        config.defaults_hash().context("invalid [defaults] in config")?
    };

    let parsed: serde_json::Value = serde_json::from_str(source).context("options must be valid JSON")?;
    let OptionValue::Map(entries) = OptionValue::from(parsed) else {
        bail!("options must be a JSON object");
    };
    options.try_extend(entries)?;
    Ok(options)
}

fn read_input(input: &str) -> Result<String> {
    if input != "-" {
        return Ok(input.to_string());
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read options from stdin")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_defaults() -> NormalizerConfig {
        NormalizerConfig::from_toml_str("[defaults]\nlimit = 25\nsort = \"created_at desc\"\n").expect("config")
    }

    #[test]
    fn caller_options_override_defaults() {
        let options = normalize_source(r#"{"order": "name", "offset": "5"}"#, &config_with_defaults(), false)
            .expect("normalize");
        assert_eq!(
            options.to_json(),
            serde_json::json!({"limit": 25, "sort": [["name", 1]], "skip": 5})
        );
    }

    #[test]
    fn defaults_can_be_skipped() {
        let options = normalize_source(r#"{"select": "a"}"#, &config_with_defaults(), true).expect("normalize");
        assert_eq!(options.to_json(), serde_json::json!({"fields": ["a"]}));
    }

    #[test]
    fn rejects_non_object_input() {
        let err = normalize_source("[1]", &NormalizerConfig::default(), true).expect_err("array input");
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn compact_rendering_is_json() {
        let options = OptionsHash::from_seed([("limit", 3)]).expect("seed");
        assert_eq!(NormalizedOptions(options).compact(), r#"{"limit":3}"#);
    }
}
