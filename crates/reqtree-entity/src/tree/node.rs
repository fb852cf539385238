//! The recursive tree node type and the tree that owns it.
//!
//! A [`RequestTree`] exclusively owns its root, which transitively owns all
//! descendants. `Clone` is a deep copy, so a cloned tree never aliases the
//! nodes of its source.

use std::path::Path;

use reqtree_core::types::NodeId;
use serde::{Deserialize, Serialize};

use crate::request::RequestModel;

/// What a tree node holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A folder-like node containing child nodes.
    Group {
        /// The group's children are requests stored in one physical file.
        #[serde(default)]
        is_file_group: bool,
    },
    /// A leaf wrapping exactly one request.
    Request(RequestModel),
}

/// A node of the request tree: either a group or a request leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique within the whole tree.
    pub id: NodeId,
    /// Display name of groups. Leaves are labelled by their request.
    #[serde(default)]
    pub name: String,
    /// Backing file-system location, empty until the backend persisted it.
    #[serde(default)]
    pub filepath: String,
    /// Group or request.
    pub kind: NodeKind,
    /// Ordered children; the order is the display and execution order.
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// A fresh plain group with no name and no children.
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            name: String::new(),
            filepath: String::new(),
            kind: NodeKind::Group {
                is_file_group: false,
            },
            children: Vec::new(),
        }
    }

    /// A leaf wrapping `request`, stored at `filepath`.
    pub fn new_request(request: RequestModel, filepath: impl Into<String>) -> Self {
        Self {
            name: request.name.clone(),
            filepath: filepath.into(),
            kind: NodeKind::Request(request),
            ..Self::new()
        }
    }

    /// A folder group backed by the directory at `path`.
    pub fn new_group(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: name_from_path(&path),
            filepath: path,
            ..Self::new()
        }
    }

    /// A group of requests that share the single file at `path`.
    pub fn new_file_group(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: name_from_path(&path),
            filepath: path,
            kind: NodeKind::Group {
                is_file_group: true,
            },
            ..Self::new()
        }
    }

    /// Builder-style helper replacing the children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether the node is a group.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Whether the node is a request leaf.
    pub fn is_request(&self) -> bool {
        matches!(self.kind, NodeKind::Request(_))
    }

    /// Whether the node groups requests of one physical file.
    pub fn is_file_group(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Group {
                is_file_group: true
            }
        )
    }

    /// The wrapped request of a leaf.
    pub fn request(&self) -> Option<&RequestModel> {
        match &self.kind {
            NodeKind::Request(request) => Some(request),
            NodeKind::Group { .. } => None,
        }
    }

    /// Mutable access to the wrapped request of a leaf.
    pub fn request_mut(&mut self) -> Option<&mut RequestModel> {
        match &mut self.kind {
            NodeKind::Request(request) => Some(request),
            NodeKind::Group { .. } => None,
        }
    }

    /// Position of the direct child with `id`.
    pub fn child_position(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.id == id)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::subtree_len)
            .sum::<usize>()
    }
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::new()
    }
}

fn name_from_path(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// A single-rooted request tree. The root is never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTree {
    /// The synthetic root group whose children are the top-level items.
    pub root: TreeNode,
}

impl RequestTree {
    /// A tree with a fresh empty root.
    pub fn new() -> Self {
        Self {
            root: TreeNode::new(),
        }
    }

    /// A tree whose root holds the given top-level items.
    pub fn with_children(children: Vec<TreeNode>) -> Self {
        Self {
            root: TreeNode::new().with_children(children),
        }
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

impl Default for RequestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = TreeNode::new();
        assert!(node.name.is_empty());
        assert!(node.children.is_empty());
        assert!(node.is_group());
        assert!(!node.is_file_group());
        assert!(node.request().is_none());
    }

    #[test]
    fn test_group_name_from_path() {
        let group = TreeNode::new_group("/collections/api/users");
        assert_eq!(group.name, "users");
        assert_eq!(group.filepath, "/collections/api/users");

        let file_group = TreeNode::new_file_group("/collections/api/auth.http");
        assert_eq!(file_group.name, "auth.http");
        assert!(file_group.is_file_group());
    }

    #[test]
    fn test_request_node_takes_request_name() {
        let node = TreeNode::new_request(RequestModel::new("List users"), "/c/users.http");
        assert!(node.is_request());
        assert_eq!(node.name, "List users");
        assert_eq!(node.request().map(|r| r.name.as_str()), Some("List users"));
    }

    #[test]
    fn test_clone_is_deep() {
        let tree = RequestTree::with_children(vec![
            TreeNode::new_group("/c/a").with_children(vec![TreeNode::new()]),
        ]);
        let mut copy = tree.clone();
        copy.root.children[0].children.clear();

        assert_eq!(tree.root.children[0].children.len(), 1);
        assert_eq!(tree.len(), 3);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_kind_serializes_tagged() {
        let json = serde_json::to_value(TreeNode::new_file_group("/c/f.http")).expect("serialize");
        assert_eq!(json["kind"]["type"], "group");
        assert_eq!(json["kind"]["is_file_group"], true);

        let leaf = TreeNode::new_request(RequestModel::new("r"), "/c/r.http");
        let json = serde_json::to_string(&leaf).expect("serialize");
        let parsed: TreeNode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, leaf);
    }
}
