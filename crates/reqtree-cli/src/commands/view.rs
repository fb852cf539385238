//! Read-only views of a tree file.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use reqtree_core::config::AppConfig;
use reqtree_core::error::AppError;
use reqtree_entity::request::RequestModel;
use reqtree_service::tree::{collect_leaves, tree_to_view_with};

use crate::output::{self, OutputFormat};

/// Arguments for `view`
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Tree file (JSON)
    #[arg(short, long)]
    pub tree: PathBuf,
}

/// Arguments for `leaves`
#[derive(Debug, Args)]
pub struct LeavesArgs {
    /// Tree file (JSON)
    #[arg(short, long)]
    pub tree: PathBuf,
}

/// One request
#[derive(Debug, Serialize, Tabled)]
struct LeafRow {
    name: String,
    method: String,
    url: String,
    file: String,
}

impl From<&RequestModel> for LeafRow {
    fn from(request: &RequestModel) -> Self {
        Self {
            name: request.name.clone(),
            method: request.method.to_string(),
            url: request.url.clone(),
            file: request.rest_file_path.clone(),
        }
    }
}

/// Execute `view`
pub async fn execute_view(
    args: &ViewArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tree = super::read_tree(&args.tree).await?;
    let view = tree_to_view_with(&tree, &config.tree);
    output::print_view(&view, format);
    Ok(())
}

/// Execute `leaves`
pub async fn execute_leaves(args: &LeavesArgs, format: OutputFormat) -> Result<(), AppError> {
    let tree = super::read_tree(&args.tree).await?;
    let rows: Vec<LeafRow> = collect_leaves(&tree).into_iter().map(LeafRow::from).collect();
    output::print_rows(&rows, format, "No requests in this tree.");
    Ok(())
}
