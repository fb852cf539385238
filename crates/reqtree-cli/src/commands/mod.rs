//! CLI command definitions and dispatch.

pub mod edit;
pub mod find;
pub mod view;

use std::path::Path;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::debug;

use reqtree_core::config::AppConfig;
use reqtree_core::error::AppError;
use reqtree_entity::tree::RequestTree;

use crate::output::OutputFormat;

/// Inspect and edit request tree files
#[derive(Debug, Parser)]
#[command(name = "reqtree", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the tree as it is displayed
    View(view::ViewArgs),
    /// List every request in tree order
    Leaves(view::LeavesArgs),
    /// Look a node up by node or request id
    Find(find::FindArgs),
    /// Remove a node and its subtree
    Remove(edit::RemoveArgs),
    /// Apply a drag-and-drop answer to a tree
    Drop(edit::DropArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::View(args) => view::execute_view(args, config, self.format).await,
            Commands::Leaves(args) => view::execute_leaves(args, self.format).await,
            Commands::Find(args) => find::execute(args, self.format).await,
            Commands::Remove(args) => edit::execute_remove(args).await,
            Commands::Drop(args) => edit::execute_drop(args).await,
        }
    }
}

/// Helper: read a JSON tree file
pub async fn read_tree(path: &Path) -> Result<RequestTree, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let tree: RequestTree = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), nodes = tree.len(), "Read tree file");
    Ok(tree)
}

/// Helper: write a tree as pretty JSON
pub async fn write_tree(path: &Path, tree: &RequestTree) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(tree)?;
    tokio::fs::write(path, json).await?;
    debug!(path = %path.display(), nodes = tree.len(), "Wrote tree file");
    Ok(())
}

/// Helper: parse an identifier argument
pub fn parse_id<T>(raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid id '{raw}': {e}")))
}
