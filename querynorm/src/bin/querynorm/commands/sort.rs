use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use querynorm::{SortKey, parse_sort_expression};
use serde::Serialize;

use crate::output::{Printer, Render, table_with_header};

pub const AFTER_HELP: &str = "Grammar: segments are separated by commas; each is `field [asc|desc]`, \
case-insensitive, ascending when omitted. `id` sorts on `_id`; blank segments are dropped.

Examples:
  querynorm sort 'created_at desc, name'
  querynorm --output json sort '$natural desc'
";

#[derive(Args)]
pub struct SortArgs {
    /// Comma-separated `field [asc|desc]` segments
    pub expression: String,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ParsedSort(pub Vec<SortKey>);

impl Render for ParsedSort {
    fn table(&self, no_color: bool) -> Table {
        let mut table = table_with_header(no_color, &["#", "Field", "Direction"]);
        for (index, key) in self.0.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(&key.field),
                Cell::new(format!("{} ({})", key.direction, key.direction.as_i32())),
            ]);
        }
        table
    }

    fn compact(&self) -> String {
        self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

pub fn handle_sort(args: SortArgs, output: &Printer) -> Result<()> {
    let parsed = ParsedSort(parse_sort_expression(&args.expression));
    if parsed.0.is_empty() {
        output.warning("expression has no sort segments; the sort option would be cleared");
        return Ok(());
    }
    output.display(&parsed)
}
