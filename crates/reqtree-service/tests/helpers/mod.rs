//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use reqtree_core::config::tree::TreeConfig;
use reqtree_core::error::AppError;
use reqtree_core::result::AppResult;
use reqtree_core::types::NodeId;
use reqtree_entity::collection::{Collection, LoadRequestsResult, ParseWarning};
use reqtree_entity::request::RequestModel;
use reqtree_entity::tree::{DragAndDropResult, RequestTree, TreeNode};
use reqtree_service::backend::{
    AddGroupNodeParams, AddRequestNodeParams, CollectionBackend, DeleteNodeParams,
    DragAndDropParams, RenameGroupParams, ReorderNodesParams,
};
use reqtree_service::tree;
use reqtree_service::RequestTreeService;

type Hook = Box<dyn FnOnce() + Send>;

/// In-memory backend keeping its own authoritative tree.
#[derive(Default)]
pub struct MockBackend {
    tree: Mutex<RequestTree>,
    warnings: Mutex<Vec<ParseWarning>>,
    calls: Mutex<Vec<&'static str>>,
    fail_next: Mutex<Option<AppError>>,
    before_answer: Mutex<Option<Hook>>,
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend").finish_non_exhaustive()
    }
}

impl MockBackend {
    pub fn with_tree(tree: RequestTree) -> Self {
        Self {
            tree: Mutex::new(tree),
            ..Self::default()
        }
    }

    /// The backend's own copy of the tree.
    pub fn authoritative(&self) -> RequestTree {
        self.tree.lock().expect("lock").clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn set_warnings(&self, warnings: Vec<ParseWarning>) {
        *self.warnings.lock().expect("lock") = warnings;
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        *self.fail_next.lock().expect("lock") = Some(error);
    }

    /// Run `hook` after the next operation completed on the backend side,
    /// before its answer is returned.
    pub fn before_next_answer(&self, hook: impl FnOnce() + Send + 'static) {
        *self.before_answer.lock().expect("lock") = Some(Box::new(hook));
    }

    fn enter(&self, call: &'static str) -> AppResult<()> {
        self.calls.lock().expect("lock").push(call);
        match self.fail_next.lock().expect("lock").take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn answer<T>(&self, value: T) -> AppResult<T> {
        if let Some(hook) = self.before_answer.lock().expect("lock").take() {
            hook();
        }
        Ok(value)
    }

    fn edit(&self, edit: impl FnOnce(&RequestTree) -> tree::TreeUpdate) -> AppResult<()> {
        let mut guard = self.tree.lock().expect("lock");
        let next = edit(&*guard)
            .into_result()
            .map_err(|e| AppError::backend(e.to_string()))?;
        *guard = next;
        Ok(())
    }
}

#[async_trait]
impl CollectionBackend for MockBackend {
    async fn add_request_node(&self, params: AddRequestNodeParams) -> AppResult<TreeNode> {
        self.enter("add_request_node")?;
        let parent = &params.parent_node;
        let filepath = if parent.is_file_group() {
            parent.filepath.clone()
        } else {
            format!("{}/{}.http", parent.filepath, params.request_name)
        };
        let mut request = RequestModel::new(params.request_name.as_str());
        request.rest_file_path = filepath.clone();
        let node = TreeNode::new_request(request, filepath);

        self.edit(|current| tree::insert_child(current, parent.id, node.clone()))?;
        self.answer(node)
    }

    async fn add_group_node(&self, params: AddGroupNodeParams) -> AppResult<TreeNode> {
        self.enter("add_group_node")?;
        let parent = &params.parent_node;
        let node = TreeNode::new_group(format!("{}/{}", parent.filepath, params.group_name));

        self.edit(|current| tree::insert_child(current, parent.id, node.clone()))?;
        self.answer(node)
    }

    async fn delete_node(&self, params: DeleteNodeParams) -> AppResult<()> {
        self.enter("delete_node")?;
        self.edit(|current| tree::remove_node(current, &params.node))?;
        self.answer(())
    }

    async fn drag_and_drop(&self, params: DragAndDropParams) -> AppResult<DragAndDropResult> {
        self.enter("drag_and_drop")?;
        let remove_drag_node_parent =
            params.drag_node_parent.is_file_group() && params.drag_node_parent.children.len() == 1;

        // Move the node the way the file system would, then report the drop
        // node as it stands afterwards.
        let mut moved = self.authoritative();
        let node = take_child(&mut moved.root, params.drag_node_parent.id, params.drag_node.id)
            .ok_or_else(|| AppError::backend("drag node missing"))?;
        if remove_drag_node_parent {
            drop_empty_group(&mut moved.root, params.drag_node_parent.id);
        }
        let target = node_mut(&mut moved.root, params.drop_node.id)
            .ok_or_else(|| AppError::backend("drop node missing"))?;
        let index = params.drop_index.min(target.children.len());
        target.children.insert(index, node);
        let new_drop_node = target.clone();

        *self.tree.lock().expect("lock") = moved;
        self.answer(DragAndDropResult {
            new_drop_node,
            remove_drag_node_parent,
        })
    }

    async fn reorder_nodes_within_parent(&self, params: ReorderNodesParams) -> AppResult<TreeNode> {
        self.enter("reorder_nodes_within_parent")?;
        let current = self.authoritative();
        let mut parent = tree::find_node(&current, params.drop_node.id)
            .cloned()
            .ok_or_else(|| AppError::backend("parent missing"))?;
        let position = parent
            .child_position(params.drag_node.id)
            .ok_or_else(|| AppError::backend("node not in parent"))?;
        let node = parent.children.remove(position);
        let index = if params.drop_index > position {
            params.drop_index - 1
        } else {
            params.drop_index
        };
        let index = index.min(parent.children.len());
        parent.children.insert(index, node);

        self.edit(|current| tree::replace_node(current, parent.clone()))?;
        self.answer(parent)
    }

    async fn rename_group(&self, params: RenameGroupParams) -> AppResult<String> {
        self.enter("rename_group")?;
        let current = self.authoritative();
        let group_id = find_group_by_path(&current.root, &params.old_path)
            .ok_or_else(|| AppError::backend("group missing"))?;
        let parent_dir = params
            .old_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or_default();
        let new_path = format!("{parent_dir}/{}", params.new_name);

        self.edit(|current| tree::rename_group(current, group_id, &params.new_name, &new_path))?;
        self.answer(new_path)
    }

    async fn load_requests_for_collection(
        &self,
        _collection: &Collection,
    ) -> AppResult<LoadRequestsResult> {
        self.enter("load_requests_for_collection")?;
        let result = LoadRequestsResult {
            request_tree: self.authoritative(),
            warnings: self.warnings.lock().expect("lock").clone(),
        };
        self.answer(result)
    }
}

fn node_mut(node: &mut TreeNode, id: NodeId) -> Option<&mut TreeNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find_map(|child| node_mut(child, id))
}

fn take_child(root: &mut TreeNode, parent_id: NodeId, child_id: NodeId) -> Option<TreeNode> {
    let parent = node_mut(root, parent_id)?;
    let position = parent.children.iter().position(|child| child.id == child_id)?;
    Some(parent.children.remove(position))
}

fn drop_empty_group(node: &mut TreeNode, group_id: NodeId) {
    node.children
        .retain(|child| child.id != group_id || !child.children.is_empty());
    for child in &mut node.children {
        drop_empty_group(child, group_id);
    }
}

fn find_group_by_path(node: &TreeNode, path: &str) -> Option<NodeId> {
    if node.is_group() && node.filepath == path {
        return Some(node.id);
    }
    node.children
        .iter()
        .find_map(|child| find_group_by_path(child, path))
}

/// Ids of the nodes in [`sample_tree`].
pub struct Ids {
    pub group_a: NodeId,
    pub leaf_x: NodeId,
    pub leaf_y: NodeId,
    pub group_b: NodeId,
    pub file_group: NodeId,
    pub leaf_z: NodeId,
    pub leaf_w: NodeId,
}

pub fn leaf(name: &str, path: &str) -> TreeNode {
    let mut request = RequestModel::new(name);
    request.rest_file_path = path.to_string();
    TreeNode::new_request(request, path)
}

/// `a/[x, y]`, `b/[f.http/[z]]`, `w` under a collection rooted at `/c`.
pub fn sample_tree() -> (RequestTree, Ids) {
    let leaf_x = leaf("x", "/c/a/x.http");
    let leaf_y = leaf("y", "/c/a/y.http");
    let leaf_z = leaf("z", "/c/b/f.http");
    let leaf_w = leaf("w", "/c/w.http");
    let file_group = TreeNode::new_file_group("/c/b/f.http").with_children(vec![leaf_z.clone()]);
    let group_a = TreeNode::new_group("/c/a").with_children(vec![leaf_x.clone(), leaf_y.clone()]);
    let group_b = TreeNode::new_group("/c/b").with_children(vec![file_group.clone()]);

    let ids = Ids {
        group_a: group_a.id,
        leaf_x: leaf_x.id,
        leaf_y: leaf_y.id,
        group_b: group_b.id,
        file_group: file_group.id,
        leaf_z: leaf_z.id,
        leaf_w: leaf_w.id,
    };
    let mut tree = RequestTree::with_children(vec![group_a, group_b, leaf_w]);
    tree.root.filepath = "/c".to_string();
    (tree, ids)
}

/// Test application context: a loaded service over a mock backend.
pub struct TestApp {
    pub backend: Arc<MockBackend>,
    pub service: RequestTreeService,
    pub ids: Ids,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(TreeConfig::default()).await
    }

    pub async fn with_config(config: TreeConfig) -> Self {
        let (tree, ids) = sample_tree();
        let backend = Arc::new(MockBackend::with_tree(tree));
        let service = RequestTreeService::new(
            backend.clone(),
            Collection::new("sample", "/c"),
            config,
        );
        service.load().await.expect("Failed to load sample tree");
        Self {
            backend,
            service,
            ids,
        }
    }

    pub fn node(&self, id: NodeId) -> TreeNode {
        tree::find_node(&self.service.tree(), id)
            .cloned()
            .expect("node in local tree")
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children.iter().map(|child| child.id).collect()
    }

    pub fn root_child_ids(&self) -> Vec<NodeId> {
        self.service
            .tree()
            .root
            .children
            .iter()
            .map(|child| child.id)
            .collect()
    }

    /// The local tree matches the backend's.
    pub fn assert_in_sync(&self) {
        assert_eq!(*self.service.tree(), self.backend.authoritative());
    }
}
