//! Drag-and-drop reconciliation.
//!
//! The backend decides where exactly a moved node lands and returns the
//! authoritative drop target. The functions here only perform structural
//! surgery on a copy of the local tree to splice that answer in.

use reqtree_core::error::TreeError;
use reqtree_core::types::NodeId;
use reqtree_entity::tree::{DragAndDropResult, RequestTree, TreeNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TreeUpdate;
use super::mutation::{clone_tree, replace_node, substitute_child};
use super::traversal::{find_node, find_node_mut, find_parent_by_id, find_parent_mut};

/// Where a dragged node should go: a group and an index among its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    /// The group (or root) receiving the node.
    pub node_id: NodeId,
    /// Insertion index among the group's children.
    pub index: usize,
}

/// How a drop must be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// The node was dropped onto itself.
    Ignore,
    /// The target is the node's current parent: a sibling reorder.
    Reorder,
    /// The node changes parent.
    Move,
}

/// Resolve what a UI drop event targets.
///
/// `None` means the drop landed at the top level. Dropping onto a group
/// targets that group at `drop_index`. Dropping onto a leaf targets the
/// leaf's parent at the leaf's own slot, since leaves hold no children.
pub fn resolve_drop_target(
    tree: &RequestTree,
    dropped_on: Option<NodeId>,
    drop_index: usize,
) -> Result<DropTarget, TreeError> {
    let Some(node_id) = dropped_on else {
        return Ok(DropTarget {
            node_id: tree.root.id,
            index: drop_index,
        });
    };

    let node = find_node(tree, node_id).ok_or(TreeError::DropTargetNotFound { node_id })?;
    if node.is_group() {
        return Ok(DropTarget {
            node_id,
            index: drop_index,
        });
    }

    let parent = find_parent_by_id(tree, node_id).ok_or(TreeError::DropTargetNotFound { node_id })?;
    let index = parent
        .child_position(node_id)
        .ok_or(TreeError::DropTargetNotFound { node_id })?;
    Ok(DropTarget {
        node_id: parent.id,
        index,
    })
}

/// Decide whether dropping `drag_id` on `target` is a reorder or a move.
pub fn classify_drop(tree: &RequestTree, drag_id: NodeId, target: &DropTarget) -> DropAction {
    if drag_id == target.node_id {
        return DropAction::Ignore;
    }
    match find_parent_by_id(tree, drag_id) {
        Some(parent) if parent.id == target.node_id => DropAction::Reorder,
        _ => DropAction::Move,
    }
}

/// Fold the backend's drag-and-drop answer into the stale local tree.
///
/// Lookups run against a fresh copy of `stale`; any missing node aborts with
/// a dedicated error and the unchanged copy, signalling that the caller
/// should re-fetch the tree rather than patch further.
pub fn apply_drag_and_drop(
    stale: &RequestTree,
    drag_node: &TreeNode,
    result: &DragAndDropResult,
    drop_index: usize,
) -> TreeUpdate {
    let new_drop_node = &result.new_drop_node;
    let mut copy = clone_tree(stale);

    if drag_node.id == new_drop_node.id {
        debug!(node_id = %drag_node.id, "Node dropped onto itself, nothing to reconcile");
        return TreeUpdate::applied(copy);
    }

    if find_node(&copy, drag_node.id).is_none() {
        return TreeUpdate::failed(copy, TreeError::NoCopyDragNode { node_id: drag_node.id });
    }
    if find_node(&copy, new_drop_node.id).is_none() {
        return TreeUpdate::failed(
            copy,
            TreeError::NoCopyDropNode {
                node_id: new_drop_node.id,
            },
        );
    }
    let Some(drag_parent_id) = find_parent_by_id(&copy, drag_node.id).map(|parent| parent.id)
    else {
        return TreeUpdate::failed(copy, TreeError::NoCopyDragParent { node_id: drag_node.id });
    };
    let drag_grand_parent_id = if result.remove_drag_node_parent {
        match find_parent_by_id(&copy, drag_parent_id).map(|parent| parent.id) {
            Some(id) => Some(id),
            None => {
                return TreeUpdate::failed(
                    copy,
                    TreeError::NoCopyDragGrandParent {
                        node_id: drag_parent_id,
                    },
                );
            }
        }
    } else {
        None
    };

    if copy.root.id == new_drop_node.id {
        // The backend's root already holds the node at its final slot.
        copy.root = new_drop_node.clone();
        if drag_parent_id == new_drop_node.id {
            debug!(node_id = %drag_node.id, "Replaced root with reordered root");
            return TreeUpdate::applied(copy);
        }
    } else if drag_parent_id == new_drop_node.id {
        // The node never leaves its parent; only its slot changes.
        if !splice_within_parent(&mut copy, drag_parent_id, drag_node.id, drop_index) {
            return TreeUpdate::failed(copy, TreeError::NoCopyDragParent { node_id: drag_node.id });
        }
        debug!(node_id = %drag_node.id, drop_index, "Reordered node within its parent");
        return TreeUpdate::applied(copy);
    } else {
        let substituted = match find_parent_mut(&mut copy, new_drop_node.id) {
            Some(drop_parent) => {
                substitute_child(drop_parent, new_drop_node.clone());
                true
            }
            None => false,
        };
        if !substituted {
            return TreeUpdate::failed(
                clone_tree(stale),
                TreeError::NoCopyDropParent {
                    node_id: new_drop_node.id,
                },
            );
        }
    }

    // Detach after substitution and by id: the old parent may sit inside the
    // substituted drop node, and the dragged id now occurs twice.
    let (holder_id, detached_id, missing) = match drag_grand_parent_id {
        Some(grand_parent_id) => (
            grand_parent_id,
            drag_parent_id,
            TreeError::NoCopyDragGrandParent {
                node_id: drag_parent_id,
            },
        ),
        None => (
            drag_parent_id,
            drag_node.id,
            TreeError::NoCopyDragParent {
                node_id: drag_node.id,
            },
        ),
    };
    let detached = match find_node_mut(&mut copy, holder_id) {
        Some(holder) => {
            holder.children.retain(|child| child.id != detached_id);
            true
        }
        None => false,
    };
    if !detached {
        return TreeUpdate::failed(clone_tree(stale), missing);
    }

    debug!(
        node_id = %drag_node.id,
        from = %drag_parent_id,
        to = %new_drop_node.id,
        removed_parent = result.remove_drag_node_parent,
        "Reconciled cross-parent move"
    );
    TreeUpdate::applied(copy)
}

/// Substitute the backend's reordered version of a parent node.
pub fn reorder_replace(tree: &RequestTree, new_node: TreeNode) -> TreeUpdate {
    let node_id = new_node.id;
    let update = replace_node(tree, new_node);
    if update.is_ok() {
        debug!(node_id = %node_id, "Applied reordered children");
    }
    update
}

/// Move `node_id` to `drop_index` among the children of `parent_id`.
///
/// Indices past the old slot shift down by one once the node is lifted out.
fn splice_within_parent(
    tree: &mut RequestTree,
    parent_id: NodeId,
    node_id: NodeId,
    drop_index: usize,
) -> bool {
    let Some(parent) = find_node_mut(tree, parent_id) else {
        return false;
    };
    let Some(position) = parent.child_position(node_id) else {
        return false;
    };
    let node = parent.children.remove(position);
    let index = if drop_index > position {
        drop_index - 1
    } else {
        drop_index
    };
    let index = index.min(parent.children.len());
    parent.children.insert(index, node);
    true
}
