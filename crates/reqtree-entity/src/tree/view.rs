//! Display-oriented projection nodes.

use reqtree_core::types::NodeId;
use serde::Serialize;

use super::node::TreeNode;

/// An ephemeral display node derived from a [`TreeNode`].
///
/// View nodes borrow their backing tree node, so they can never outlive or
/// take part in the ownership of the tree they were projected from.
#[derive(Debug, Clone, Serialize)]
pub struct ViewNode<'a> {
    /// Id of the backing node.
    pub id: NodeId,
    /// Selection key, equal to the backing node's id.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Folder (group) or leaf (request).
    pub is_folder: bool,
    /// Projected children in tree order.
    pub children: Vec<ViewNode<'a>>,
    /// The tree node this view node was projected from.
    #[serde(skip)]
    pub backing: &'a TreeNode,
}

impl<'a> ViewNode<'a> {
    /// The backing node when it is a group.
    pub fn group_node(&self) -> Option<&'a TreeNode> {
        self.backing.is_group().then_some(self.backing)
    }

    /// The backing node when it is a request leaf.
    pub fn request_node(&self) -> Option<&'a TreeNode> {
        self.backing.is_request().then_some(self.backing)
    }
}
