//! Copy-on-write mutation operations.
//!
//! Each operation deep-copies the whole tree, resolves the nodes it edits
//! inside the copy by id and returns the edited copy. References into the
//! caller's tree are never reused, so the input stays untouched.

use reqtree_core::error::TreeError;
use reqtree_core::types::NodeId;
use reqtree_entity::request::RequestModel;
use reqtree_entity::tree::{NodeKind, RequestTree, TreeNode};

use super::TreeUpdate;
use super::traversal::{find_node_by_request_mut, find_node_mut, find_parent_by_id, find_parent_mut};

/// Deep value copy of `tree`.
pub fn clone_tree(tree: &RequestTree) -> RequestTree {
    tree.clone()
}

/// Insert `node` as the first child of the group `parent_id`.
///
/// New nodes go to position 0 so the newest item is visible first.
pub fn insert_child(tree: &RequestTree, parent_id: NodeId, node: TreeNode) -> TreeUpdate {
    let mut copy = clone_tree(tree);

    let inserted = match find_node_mut(&mut copy, parent_id) {
        Some(parent) if parent.is_group() => {
            parent.children.insert(0, node);
            true
        }
        _ => false,
    };

    if !inserted {
        return TreeUpdate::failed(copy, TreeError::ParentNotFound { parent_id });
    }
    TreeUpdate::applied(copy)
}

/// Remove `target` (and its subtree) from its parent.
pub fn remove_node(tree: &RequestTree, target: &TreeNode) -> TreeUpdate {
    let node_id = target.id;
    // Resolved in the input so the lookup is not repeated after mutation.
    let parent_id = find_parent_by_id(tree, node_id).map(|parent| parent.id);
    let mut copy = clone_tree(tree);

    let Some(parent_id) = parent_id else {
        return TreeUpdate::failed(copy, TreeError::OldParentNotFound { node_id });
    };

    let removed = match find_node_mut(&mut copy, parent_id) {
        Some(parent) => {
            parent.children.retain(|child| child.id != node_id);
            true
        }
        None => false,
    };

    if !removed {
        return TreeUpdate::failed(copy, TreeError::OldParentNotFound { node_id });
    }
    TreeUpdate::applied(copy)
}

/// Substitute the node sharing `new_node.id`, keeping its sibling position.
///
/// Replacing the root swaps the whole root.
pub fn replace_node(tree: &RequestTree, new_node: TreeNode) -> TreeUpdate {
    let node_id = new_node.id;
    let mut copy = clone_tree(tree);

    if copy.root.id == node_id {
        copy.root = new_node;
        return TreeUpdate::applied(copy);
    }

    let replaced = match find_parent_mut(&mut copy, node_id) {
        Some(parent) => {
            substitute_child(parent, new_node);
            true
        }
        None => false,
    };

    if !replaced {
        return TreeUpdate::failed(copy, TreeError::ReplaceParentNotFound { node_id });
    }
    TreeUpdate::applied(copy)
}

/// Rename the group `group_id` and move it to `new_path`.
///
/// Descendant file paths (and the file paths of their requests) that start
/// with the group's old path are rewritten to start with `new_path`.
pub fn rename_group(
    tree: &RequestTree,
    group_id: NodeId,
    new_name: &str,
    new_path: &str,
) -> TreeUpdate {
    let mut copy = clone_tree(tree);

    let renamed = match find_node_mut(&mut copy, group_id) {
        Some(group) if group.is_group() => {
            let old_path = std::mem::replace(&mut group.filepath, new_path.to_string());
            group.name = new_name.to_string();
            rewrite_descendant_paths(group, &old_path, new_path);
            true
        }
        _ => false,
    };

    if !renamed {
        return TreeUpdate::failed(copy, TreeError::GroupNotFound { group_id });
    }
    TreeUpdate::applied(copy)
}

/// Swap in a new version of a request, matched by request id.
pub fn update_request(tree: &RequestTree, request: RequestModel) -> TreeUpdate {
    let request_id = request.id;
    let mut copy = clone_tree(tree);

    let updated = match find_node_by_request_mut(&mut copy, request_id) {
        Some(leaf) => {
            leaf.name = request.name.clone();
            leaf.kind = NodeKind::Request(request);
            true
        }
        None => false,
    };

    if !updated {
        return TreeUpdate::failed(copy, TreeError::RequestNotFound { request_id });
    }
    TreeUpdate::applied(copy)
}

/// Replace the direct child of `parent` that shares `new_child.id`.
pub(crate) fn substitute_child(parent: &mut TreeNode, new_child: TreeNode) {
    if let Some(slot) = parent
        .children
        .iter_mut()
        .find(|child| child.id == new_child.id)
    {
        *slot = new_child;
    }
}

fn rewrite_descendant_paths(group: &mut TreeNode, old_path: &str, new_path: &str) {
    if old_path.is_empty() {
        return;
    }
    let mut stack: Vec<&mut TreeNode> = group.children.iter_mut().collect();
    while let Some(node) = stack.pop() {
        if let Some(path) = rebase_path(&node.filepath, old_path, new_path) {
            node.filepath = path;
        }
        if let Some(request) = node.request_mut() {
            if let Some(path) = rebase_path(&request.rest_file_path, old_path, new_path) {
                request.rest_file_path = path;
            }
        }
        stack.extend(node.children.iter_mut());
    }
}

/// `path` moved from under `old_path` to under `new_path`, if it lies there.
/// `/c/a` contains `/c/a/x.http` but not `/c/ab.http`.
fn rebase_path(path: &str, old_path: &str, new_path: &str) -> Option<String> {
    let rest = path.strip_prefix(old_path)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(format!("{new_path}{rest}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{child_ids, leaf, sample};
    use crate::tree::traversal::{collect_leaves, find_node, find_parent_by_id};

    #[test]
    fn test_insert_child_prepends() {
        let s = sample();
        let new_leaf = leaf("new", "/c/a/new.http");
        let new_id = new_leaf.id;

        let update = insert_child(&s.tree, s.group_a, new_leaf);
        assert!(update.is_ok());

        let a = find_node(&update.tree, s.group_a).expect("a");
        assert_eq!(child_ids(a), vec![new_id, s.leaf_x, s.leaf_y]);
        assert_eq!(find_parent_by_id(&update.tree, new_id).map(|p| p.id), Some(s.group_a));
    }

    #[test]
    fn test_insert_child_leaves_input_untouched() {
        let s = sample();
        let before = s.tree.clone();

        let mut update = insert_child(&s.tree, s.tree.root.id, TreeNode::new());
        update.tree.root.children.clear();

        assert_eq!(s.tree, before);
    }

    #[test]
    fn test_insert_child_missing_parent() {
        let s = sample();
        let missing = NodeId::new();

        let update = insert_child(&s.tree, missing, TreeNode::new());
        assert_eq!(update.error, Some(TreeError::ParentNotFound { parent_id: missing }));
        assert_eq!(update.tree, s.tree);
    }

    #[test]
    fn test_insert_child_under_leaf_is_rejected() {
        let s = sample();
        let update = insert_child(&s.tree, s.leaf_w, TreeNode::new());
        assert_eq!(
            update.error,
            Some(TreeError::ParentNotFound {
                parent_id: s.leaf_w
            })
        );
    }

    #[test]
    fn test_remove_leaf_then_group() {
        let x = leaf("x", "/c/a/x.http");
        let a = TreeNode::new_group("/c/a").with_children(vec![x.clone()]);
        let tree = RequestTree::with_children(vec![a.clone()]);

        let after_leaf = remove_node(&tree, &x).into_result().expect("leaf removed");
        assert!(find_node(&after_leaf, x.id).is_none());
        let remaining_a = find_node(&after_leaf, a.id).expect("a kept");
        assert!(remaining_a.children.is_empty());

        let after_group = remove_node(&after_leaf, remaining_a)
            .into_result()
            .expect("group removed");
        assert!(after_group.root.children.is_empty());
    }

    #[test]
    fn test_remove_group_drops_subtree() {
        let s = sample();
        let b = find_node(&s.tree, s.group_b).expect("b").clone();

        let update = remove_node(&s.tree, &b);
        assert!(update.is_ok());
        assert!(find_node(&update.tree, s.leaf_z).is_none());
        assert_eq!(collect_leaves(&update.tree).len(), 3);
    }

    #[test]
    fn test_remove_root_fails() {
        let s = sample();
        let update = remove_node(&s.tree, &s.tree.root);
        assert_eq!(
            update.error,
            Some(TreeError::OldParentNotFound {
                node_id: s.tree.root.id
            })
        );
        assert_eq!(update.tree, s.tree);
    }

    #[test]
    fn test_replace_with_equal_node_is_noop() {
        let s = sample();
        let a = find_node(&s.tree, s.group_a).expect("a").clone();

        let update = replace_node(&s.tree, a);
        assert!(update.is_ok());
        assert_eq!(update.tree, s.tree);
    }

    #[test]
    fn test_replace_keeps_position() {
        let s = sample();
        let mut b = find_node(&s.tree, s.group_b).expect("b").clone();
        b.name = "renamed".to_string();
        b.children.clear();

        let tree = replace_node(&s.tree, b).into_result().expect("replaced");
        assert_eq!(child_ids(&tree.root), vec![s.group_a, s.group_b, s.leaf_w]);
        let b = find_node(&tree, s.group_b).expect("b");
        assert_eq!(b.name, "renamed");
        assert!(b.children.is_empty());
    }

    #[test]
    fn test_replace_root() {
        let s = sample();
        let mut root = s.tree.root.clone();
        root.children.truncate(1);

        let tree = replace_node(&s.tree, root).into_result().expect("root replaced");
        assert_eq!(child_ids(&tree.root), vec![s.group_a]);
    }

    #[test]
    fn test_replace_missing_node() {
        let s = sample();
        let stranger = TreeNode::new();
        let id = stranger.id;
        let update = replace_node(&s.tree, stranger);
        assert_eq!(update.error, Some(TreeError::ReplaceParentNotFound { node_id: id }));
    }

    #[test]
    fn test_rename_group_rewrites_descendant_paths() {
        let s = sample();
        let tree = rename_group(&s.tree, s.group_b, "bee", "/c/bee")
            .into_result()
            .expect("renamed");

        let b = find_node(&tree, s.group_b).expect("b");
        assert_eq!(b.name, "bee");
        assert_eq!(b.filepath, "/c/bee");

        let f = find_node(&tree, s.file_group).expect("f");
        assert_eq!(f.filepath, "/c/bee/f.http");
        let z = find_node(&tree, s.leaf_z).expect("z");
        assert_eq!(z.filepath, "/c/bee/f.http");
        assert_eq!(z.request().map(|r| r.rest_file_path.as_str()), Some("/c/bee/f.http"));

        // Unrelated subtrees keep their paths.
        let x = find_node(&tree, s.leaf_x).expect("x");
        assert_eq!(x.filepath, "/c/a/x.http");
    }

    #[test]
    fn test_rename_group_leaves_sibling_with_shared_prefix() {
        let s = sample();
        let stray = leaf("ab", "/c/ab.http");
        let stray_id = stray.id;
        let tree = insert_child(&s.tree, s.group_a, stray)
            .into_result()
            .expect("inserted");

        let tree = rename_group(&tree, s.group_a, "renamed", "/c/renamed")
            .into_result()
            .expect("renamed");

        let stray = find_node(&tree, stray_id).expect("stray");
        assert_eq!(stray.filepath, "/c/ab.http");
        assert_eq!(stray.request().map(|r| r.rest_file_path.as_str()), Some("/c/ab.http"));
        let x = find_node(&tree, s.leaf_x).expect("x");
        assert_eq!(x.filepath, "/c/renamed/x.http");
    }

    #[test]
    fn test_rename_group_without_path_keeps_descendants() {
        let child = leaf("q", "/elsewhere/q.http");
        let child_id = child.id;
        let group = TreeNode::new_group("").with_children(vec![child]);
        let group_id = group.id;
        let tree = RequestTree::with_children(vec![group]);

        let tree = rename_group(&tree, group_id, "named", "/c/named")
            .into_result()
            .expect("renamed");

        let q = find_node(&tree, child_id).expect("q");
        assert_eq!(q.filepath, "/elsewhere/q.http");
        assert_eq!(rebase_path("/c/a", "/c/a", "/d"), Some("/d".to_string()));
    }

    #[test]
    fn test_rename_non_group_fails() {
        let s = sample();
        let update = rename_group(&s.tree, s.leaf_x, "n", "/n");
        assert_eq!(update.error, Some(TreeError::GroupNotFound { group_id: s.leaf_x }));
    }

    #[test]
    fn test_update_request_matches_request_id() {
        let s = sample();
        let mut request = find_node(&s.tree, s.leaf_y)
            .and_then(TreeNode::request)
            .expect("y request")
            .clone();
        request.name = "y2".to_string();
        request.url = "https://example.com".to_string();

        let tree = update_request(&s.tree, request).into_result().expect("updated");
        let y = find_node(&tree, s.leaf_y).expect("y");
        assert_eq!(y.name, "y2");
        assert_eq!(y.request().map(|r| r.url.as_str()), Some("https://example.com"));
    }

    #[test]
    fn test_update_unknown_request_fails() {
        let s = sample();
        let request = RequestModel::new("ghost");
        let request_id = request.id;
        let update = update_request(&s.tree, request);
        assert_eq!(update.error, Some(TreeError::RequestNotFound { request_id }));
    }
}
