//! Values returned by the backend for drag-and-drop moves.

use serde::{Deserialize, Serialize};

use super::node::TreeNode;

/// The backend's answer to a cross-parent drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragAndDropResult {
    /// Authoritative version of the drop target, already containing the
    /// moved node at its final position.
    pub new_drop_node: TreeNode,
    /// The dragged node's parent was a file group that is now empty and
    /// must be removed from its own parent.
    #[serde(default)]
    pub remove_drag_node_parent: bool,
}
