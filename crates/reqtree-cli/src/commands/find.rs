//! Node lookup.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use reqtree_core::error::AppError;
use reqtree_core::types::{NodeId, RequestId};
use reqtree_entity::tree::{RequestTree, TreeNode};
use reqtree_service::tree::{find_node, find_node_by_request, find_parent, position_in_parent};

use crate::output::{self, OutputFormat};

/// Arguments for `find`
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Tree file (JSON)
    #[arg(short, long)]
    pub tree: PathBuf,
    /// Node ID, or request ID with `--request`
    #[arg(short, long)]
    pub id: String,
    /// Treat the ID as a request ID
    #[arg(short, long)]
    pub request: bool,
}

/// A located node and where it sits
#[derive(Debug, Serialize, Tabled)]
struct FoundRow {
    id: String,
    name: String,
    kind: &'static str,
    filepath: String,
    parent: String,
    position: String,
    children: usize,
}

/// Execute `find`
pub async fn execute(args: &FindArgs, format: OutputFormat) -> Result<(), AppError> {
    let tree = super::read_tree(&args.tree).await?;
    let node = if args.request {
        let request_id: RequestId = super::parse_id(&args.id)?;
        find_node_by_request(&tree, request_id)
    } else {
        let node_id: NodeId = super::parse_id(&args.id)?;
        find_node(&tree, node_id)
    }
    .ok_or_else(|| AppError::not_found(format!("No node matches '{}'", args.id)))?;

    output::print_rows(&[found_row(&tree, node)], format, "");
    Ok(())
}

fn found_row(tree: &RequestTree, node: &TreeNode) -> FoundRow {
    let kind = if node.is_request() {
        "request"
    } else if node.is_file_group() {
        "file group"
    } else {
        "group"
    };
    FoundRow {
        id: node.id.to_string(),
        name: node.name.clone(),
        kind,
        filepath: node.filepath.clone(),
        parent: find_parent(tree, node)
            .map(|parent| parent.id.to_string())
            .unwrap_or_else(|| "-".to_string()),
        position: position_in_parent(tree, node.id)
            .map(|position| position.to_string())
            .unwrap_or_else(|| "-".to_string()),
        children: node.children.len(),
    }
}
