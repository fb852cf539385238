//! Rendering of tree views, node rows and edit outcomes.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use reqtree_entity::tree::ViewNode;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable outline or table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a projected view: an indented outline, or the projection as JSON.
pub fn print_view(view: &[ViewNode<'_>], format: OutputFormat) {
    match format {
        OutputFormat::Table if view.is_empty() => println!("(empty tree)"),
        OutputFormat::Table => print!("{}", outline(view)),
        OutputFormat::Json => print_json(&view),
    }
}

/// Print node rows as a table, or as a JSON array.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("{empty}"),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::psql());
            println!("{table}");
        }
        OutputFormat::Json => print_json(&rows),
    }
}

/// Report a tree file written by an edit.
pub fn print_written(summary: &str, target: &Path) {
    println!("✓ {summary}, wrote {}", target.display());
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to encode output: {e}")),
    }
}

/// One line per node in display order, two spaces of indent per level.
/// Groups are marked `+`, requests `-`.
fn outline(view: &[ViewNode<'_>]) -> String {
    let mut out = String::new();
    let mut stack: Vec<(usize, &ViewNode<'_>)> = view.iter().rev().map(|node| (0, node)).collect();
    while let Some((depth, node)) = stack.pop() {
        let marker = if node.is_folder { '+' } else { '-' };
        let _ = writeln!(
            out,
            "{}{marker} {}  {}",
            "  ".repeat(depth),
            node.label,
            node.key
        );
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    out
}
