//! Lookup and traversal primitives.
//!
//! Every lookup walks the tree from the root; nothing is indexed. Sibling
//! order matters only for the results that are sequences.

use std::collections::VecDeque;

use reqtree_core::types::{NodeId, RequestId};
use reqtree_entity::request::RequestModel;
use reqtree_entity::tree::{RequestTree, TreeNode};

/// Breadth-first search from `root` for the first node matching `predicate`.
fn search<'a>(root: &'a TreeNode, predicate: impl Fn(&TreeNode) -> bool) -> Option<&'a TreeNode> {
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if predicate(current) {
            return Some(current);
        }
        queue.extend(current.children.iter());
    }
    None
}

fn search_mut<'a>(
    root: &'a mut TreeNode,
    predicate: impl Fn(&TreeNode) -> bool,
) -> Option<&'a mut TreeNode> {
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if predicate(current) {
            return Some(current);
        }
        queue.extend(current.children.iter_mut());
    }
    None
}

/// The node with `id`.
pub fn find_node(tree: &RequestTree, id: NodeId) -> Option<&TreeNode> {
    search(&tree.root, |node| node.id == id)
}

/// The leaf wrapping the request with `request_id`.
pub fn find_node_by_request(tree: &RequestTree, request_id: RequestId) -> Option<&TreeNode> {
    search(&tree.root, |node| {
        node.request().is_some_and(|request| request.id == request_id)
    })
}

/// The direct parent of `node`, `None` for the root or an absent node.
pub fn find_parent<'a>(tree: &'a RequestTree, node: &TreeNode) -> Option<&'a TreeNode> {
    find_parent_by_id(tree, node.id)
}

/// The direct parent of the node with `id`.
pub fn find_parent_by_id(tree: &RequestTree, id: NodeId) -> Option<&TreeNode> {
    search(&tree.root, |node| node.child_position(id).is_some())
}

/// Whether `child` is a direct child of `parent`.
pub fn is_child_of(tree: &RequestTree, child: &TreeNode, parent: &TreeNode) -> bool {
    find_parent(tree, child).is_some_and(|found| found.id == parent.id)
}

/// Whether a node with `id` is part of the tree.
pub fn contains(tree: &RequestTree, id: NodeId) -> bool {
    find_node(tree, id).is_some()
}

/// Whether some leaf anywhere below `group` wraps the request `request_id`.
pub fn is_descendant_of_group(request_id: RequestId, group: &TreeNode) -> bool {
    let mut stack: Vec<&TreeNode> = group.children.iter().collect();
    while let Some(current) = stack.pop() {
        if current
            .request()
            .is_some_and(|request| request.id == request_id)
        {
            return true;
        }
        stack.extend(current.children.iter());
    }
    false
}

/// Every request in tree order: depth-first, children before later siblings.
pub fn collect_leaves(tree: &RequestTree) -> Vec<&RequestModel> {
    let mut requests = Vec::new();
    let mut stack = vec![&tree.root];
    while let Some(current) = stack.pop() {
        if let Some(request) = current.request() {
            requests.push(request);
        }
        stack.extend(current.children.iter().rev());
    }
    requests
}

/// Index of the node with `id` among its siblings.
pub fn position_in_parent(tree: &RequestTree, id: NodeId) -> Option<usize> {
    find_parent_by_id(tree, id).and_then(|parent| parent.child_position(id))
}

/// The other requests sharing the direct parent of the leaf wrapping
/// `request_id`, in sibling order.
pub fn requests_in_same_group(tree: &RequestTree, request_id: RequestId) -> Vec<&RequestModel> {
    let Some(leaf) = find_node_by_request(tree, request_id) else {
        return Vec::new();
    };
    let Some(parent) = find_parent(tree, leaf) else {
        return Vec::new();
    };
    parent
        .children
        .iter()
        .filter_map(TreeNode::request)
        .filter(|request| request.id != request_id)
        .collect()
}

/// All requests stored in the physical file `filepath`, in tree order.
pub fn requests_in_file<'a>(tree: &'a RequestTree, filepath: &str) -> Vec<&'a RequestModel> {
    collect_leaves(tree)
        .into_iter()
        .filter(|request| request.rest_file_path == filepath)
        .collect()
}

pub(crate) fn find_node_mut(tree: &mut RequestTree, id: NodeId) -> Option<&mut TreeNode> {
    search_mut(&mut tree.root, |node| node.id == id)
}

pub(crate) fn find_node_by_request_mut(
    tree: &mut RequestTree,
    request_id: RequestId,
) -> Option<&mut TreeNode> {
    search_mut(&mut tree.root, |node| {
        node.request().is_some_and(|request| request.id == request_id)
    })
}

pub(crate) fn find_parent_mut(tree: &mut RequestTree, id: NodeId) -> Option<&mut TreeNode> {
    search_mut(&mut tree.root, |node| node.child_position(id).is_some())
}
