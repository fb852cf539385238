//! Offline edits of a tree file.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use reqtree_core::error::AppError;
use reqtree_core::types::NodeId;
use reqtree_entity::tree::DragAndDropResult;
use reqtree_service::tree::{apply_drag_and_drop, find_node, remove_node};

use crate::output;

/// Arguments for `remove`
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Tree file (JSON)
    #[arg(short, long)]
    pub tree: PathBuf,
    /// Node ID to remove
    #[arg(short, long)]
    pub id: String,
    /// Write the result here instead of overwriting the tree file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `drop`
#[derive(Debug, Args)]
pub struct DropArgs {
    /// Tree file (JSON)
    #[arg(short, long)]
    pub tree: PathBuf,
    /// ID of the dragged node
    #[arg(short, long)]
    pub drag: String,
    /// Backend answer (JSON `DragAndDropResult`)
    #[arg(short, long)]
    pub result: PathBuf,
    /// Drop index within the target
    #[arg(short, long, default_value = "0")]
    pub index: usize,
    /// Write the result here instead of overwriting the tree file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute `remove`
pub async fn execute_remove(args: &RemoveArgs) -> Result<(), AppError> {
    let tree = super::read_tree(&args.tree).await?;
    let node_id: NodeId = super::parse_id(&args.id)?;
    let node = find_node(&tree, node_id)
        .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))?;

    let removed = node.subtree_len();
    let next = remove_node(&tree, node).into_result()?;

    let target = args.output.as_ref().unwrap_or(&args.tree);
    super::write_tree(target, &next).await?;
    info!(node_id = %node_id, removed, "Removed node");
    output::print_written(&format!("Removed {removed} node(s)"), target);
    Ok(())
}

/// Execute `drop`
pub async fn execute_drop(args: &DropArgs) -> Result<(), AppError> {
    let tree = super::read_tree(&args.tree).await?;
    let drag_id: NodeId = super::parse_id(&args.drag)?;
    let raw = tokio::fs::read_to_string(&args.result).await?;
    let result: DragAndDropResult = serde_json::from_str(&raw)?;

    let drag_node = find_node(&tree, drag_id)
        .ok_or_else(|| AppError::not_found(format!("Node {drag_id} not found")))?;
    let next = apply_drag_and_drop(&tree, drag_node, &result, args.index).into_result()?;

    let target = args.output.as_ref().unwrap_or(&args.tree);
    super::write_tree(target, &next).await?;
    info!(
        node_id = %drag_id,
        target = %result.new_drop_node.id,
        "Applied drag-and-drop"
    );
    output::print_written(&format!("Moved {drag_id}"), target);
    Ok(())
}
