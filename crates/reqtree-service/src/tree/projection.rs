//! Projection of the domain tree into display nodes.

use reqtree_core::config::tree::TreeConfig;
use reqtree_entity::tree::{NodeKind, RequestTree, TreeNode, ViewNode};

/// Project `tree` with the default configuration.
pub fn tree_to_view(tree: &RequestTree) -> Vec<ViewNode<'_>> {
    tree_to_view_with(tree, &TreeConfig::default())
}

/// Project the root's children (the root itself is never displayed),
/// preserving child order at every level.
pub fn tree_to_view_with<'a>(tree: &'a RequestTree, config: &TreeConfig) -> Vec<ViewNode<'a>> {
    tree.root
        .children
        .iter()
        .map(|child| project(child, &config.file_group_indicator))
        .collect()
}

fn project<'a>(node: &'a TreeNode, file_group_indicator: &str) -> ViewNode<'a> {
    let (label, is_folder) = match &node.kind {
        NodeKind::Request(request) => (request.name.clone(), false),
        NodeKind::Group {
            is_file_group: true,
        } => (format!("{}{}", node.name, file_group_indicator), true),
        NodeKind::Group {
            is_file_group: false,
        } => (node.name.clone(), true),
    };

    ViewNode {
        id: node.id,
        key: node.id.to_string(),
        label,
        is_folder,
        children: node
            .children
            .iter()
            .map(|child| project(child, file_group_indicator))
            .collect(),
        backing: node,
    }
}
