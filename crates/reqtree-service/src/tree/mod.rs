//! Pure operations over [`RequestTree`] values.
//!
//! No function in this module mutates its input. Mutations deep-copy the
//! tree, look nodes up again inside the copy and edit only the copy.

pub mod mutation;
pub mod projection;
pub mod reconcile;
pub mod traversal;

use reqtree_core::error::TreeError;
use reqtree_entity::tree::RequestTree;
use tracing::debug;

pub use mutation::{
    clone_tree, insert_child, remove_node, rename_group, replace_node, update_request,
};
pub use projection::{tree_to_view, tree_to_view_with};
pub use reconcile::{
    DropAction, DropTarget, apply_drag_and_drop, classify_drop, reorder_replace,
    resolve_drop_target,
};
pub use traversal::{
    collect_leaves, contains, find_node, find_node_by_request, find_parent, find_parent_by_id,
    is_child_of, is_descendant_of_group, position_in_parent, requests_in_file,
    requests_in_same_group,
};

/// The outcome of a tree mutation: the next tree plus an optional error.
///
/// On error `tree` is the best-effort result: an unchanged copy of the
/// input, never a partially corrupted one. Callers decide whether to show
/// it or re-fetch the authoritative tree.
#[must_use]
#[derive(Debug, Clone)]
pub struct TreeUpdate {
    /// The next tree value.
    pub tree: RequestTree,
    /// Why the operation could not be applied, if it could not.
    pub error: Option<TreeError>,
}

impl TreeUpdate {
    /// A successfully applied update.
    pub fn applied(tree: RequestTree) -> Self {
        Self { tree, error: None }
    }

    /// A failed update carrying the unchanged copy.
    pub fn failed(tree: RequestTree, error: TreeError) -> Self {
        debug!(code = error.code(), error = %error, "Tree update not applied");
        Self {
            tree,
            error: Some(error),
        }
    }

    /// Whether the update applied cleanly.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the fallback tree on error.
    pub fn into_result(self) -> Result<RequestTree, TreeError> {
        match self.error {
            None => Ok(self.tree),
            Some(error) => Err(error),
        }
    }
}
