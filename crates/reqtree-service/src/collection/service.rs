//! The request tree service of one open collection.

use std::sync::Arc;

use tracing::{info, warn};

use reqtree_core::config::tree::TreeConfig;
use reqtree_core::error::AppError;
use reqtree_core::result::AppResult;
use reqtree_core::types::{NodeId, RequestId};
use reqtree_entity::collection::{Collection, ParseWarning};
use reqtree_entity::request::RequestModel;
use reqtree_entity::tree::{RequestTree, TreeNode, ViewNode};

use crate::backend::{
    AddGroupNodeParams, AddRequestNodeParams, CollectionBackend, DeleteNodeParams,
    DragAndDropParams, RenameGroupParams, ReorderNodesParams,
};
use crate::store::TreeStore;
use crate::tree::{self, DropAction, TreeUpdate};

/// Applies structural edits of a collection: the backend performs each edit
/// on disk, then the answer is spliced into the local tree.
///
/// Every splice runs against the snapshot current at the time the backend
/// answers, not the one the edit started from.
#[derive(Debug, Clone)]
pub struct RequestTreeService {
    /// Owner of the files on disk.
    backend: Arc<dyn CollectionBackend>,
    /// The open collection.
    collection: Collection,
    /// The current tree.
    store: TreeStore,
    /// Projection and reconciliation settings.
    config: TreeConfig,
}

impl RequestTreeService {
    /// Creates a service with an empty tree. Call [`Self::load`] to fill it.
    pub fn new(
        backend: Arc<dyn CollectionBackend>,
        collection: Collection,
        config: TreeConfig,
    ) -> Self {
        Self {
            backend,
            collection,
            store: TreeStore::default(),
            config,
        }
    }

    /// The open collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The store publishing tree snapshots.
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// The current tree snapshot.
    pub fn tree(&self) -> Arc<RequestTree> {
        self.store.get()
    }

    /// Loads the collection's tree from the backend, replacing the local one.
    pub async fn load(&self) -> AppResult<Vec<ParseWarning>> {
        let loaded = self
            .backend
            .load_requests_for_collection(&self.collection)
            .await?;

        info!(
            collection = %self.collection.name,
            nodes = loaded.request_tree.len(),
            warnings = loaded.warnings.len(),
            "Loaded request tree"
        );
        for warning in &loaded.warnings {
            warn!(filepath = %warning.filepath, "{}", warning.message);
        }

        self.store.set(loaded.request_tree);
        Ok(loaded.warnings)
    }

    /// Discards the local tree and fetches the authoritative one.
    pub async fn reload(&self) -> AppResult<()> {
        info!(collection = %self.collection.name, "Reloading request tree");
        self.load().await.map(|_| ())
    }

    /// Creates a request under the group `parent_id` and inserts its leaf
    /// as the group's first child.
    pub async fn add_request(&self, parent_id: NodeId, name: &str) -> AppResult<TreeNode> {
        let parent_node = self.group(parent_id)?;
        let requests_in_same_file = if parent_node.is_file_group() {
            parent_node
                .children
                .iter()
                .filter_map(TreeNode::request)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let node = self
            .backend
            .add_request_node(AddRequestNodeParams {
                parent_node,
                request_name: name.to_string(),
                requests_in_same_file,
            })
            .await?;

        let update = tree::insert_child(&self.store.get(), parent_id, node.clone());
        self.commit("add_request", update).await?;

        info!(node_id = %node.id, parent_id = %parent_id, name, "Added request");
        Ok(node)
    }

    /// Creates a group under the group `parent_id`.
    pub async fn add_group(&self, parent_id: NodeId, name: &str) -> AppResult<TreeNode> {
        let parent_node = self.group(parent_id)?;

        let node = self
            .backend
            .add_group_node(AddGroupNodeParams {
                parent_node,
                group_name: name.to_string(),
            })
            .await?;

        let update = tree::insert_child(&self.store.get(), parent_id, node.clone());
        self.commit("add_group", update).await?;

        info!(node_id = %node.id, parent_id = %parent_id, name, "Added group");
        Ok(node)
    }

    /// Deletes a node and its subtree.
    ///
    /// Returns whether `open_request` was deleted with it, so the caller can
    /// close its editor.
    pub async fn delete_node(
        &self,
        node_id: NodeId,
        open_request: Option<RequestId>,
    ) -> AppResult<bool> {
        let snapshot = self.store.get();
        let node = self.node(&snapshot, node_id)?;
        let parent = tree::find_parent(&snapshot, &node)
            .ok_or_else(|| AppError::validation("The root node cannot be deleted"))?;
        let file_node = parent.is_file_group().then(|| parent.clone());

        let removes_open_request = open_request.is_some_and(|request_id| match node.request() {
            Some(request) => request.id == request_id,
            None => tree::is_descendant_of_group(request_id, &node),
        });

        self.backend
            .delete_node(DeleteNodeParams {
                node: node.clone(),
                file_node,
            })
            .await?;

        let update = tree::remove_node(&self.store.get(), &node);
        self.commit("delete_node", update).await?;

        info!(node_id = %node_id, removes_open_request, "Deleted node");
        Ok(removes_open_request)
    }

    /// Renames the group `group_id`, returning its new path.
    pub async fn rename_group(&self, group_id: NodeId, new_name: &str) -> AppResult<String> {
        let group = self.group(group_id)?;

        let new_path = self
            .backend
            .rename_group(RenameGroupParams {
                old_path: group.filepath.clone(),
                new_name: new_name.to_string(),
            })
            .await?;

        let update = tree::rename_group(&self.store.get(), group_id, new_name, &new_path);
        self.commit("rename_group", update).await?;

        info!(group_id = %group_id, old_path = %group.filepath, new_path = %new_path, "Renamed group");
        Ok(new_path)
    }

    /// Handles a drop of `drag_id` onto `dropped_on` (`None` for the top
    /// level) at `drop_index`.
    pub async fn drop_node(
        &self,
        drag_id: NodeId,
        dropped_on: Option<NodeId>,
        drop_index: usize,
    ) -> AppResult<DropAction> {
        let snapshot = self.store.get();
        let target = tree::resolve_drop_target(&snapshot, dropped_on, drop_index)?;
        let action = tree::classify_drop(&snapshot, drag_id, &target);

        match action {
            DropAction::Ignore => {}
            DropAction::Reorder => {
                let drag_node = self.node(&snapshot, drag_id)?;
                let drop_node = self.node(&snapshot, target.node_id)?;

                let updated_parent = self
                    .backend
                    .reorder_nodes_within_parent(ReorderNodesParams {
                        drag_node,
                        drop_node,
                        drop_index: target.index,
                    })
                    .await?;

                let update = tree::reorder_replace(&self.store.get(), updated_parent);
                self.commit("reorder", update).await?;
                info!(node_id = %drag_id, index = target.index, "Reordered node");
            }
            DropAction::Move => {
                let drag_node = self.node(&snapshot, drag_id)?;
                let drop_node = self.node(&snapshot, target.node_id)?;
                let drag_node_parent = tree::find_parent(&snapshot, &drag_node)
                    .cloned()
                    .ok_or_else(|| AppError::validation("The root node cannot be moved"))?;

                let result = self
                    .backend
                    .drag_and_drop(DragAndDropParams {
                        drag_node_parent,
                        drag_node: drag_node.clone(),
                        drop_node,
                        drop_index: target.index,
                    })
                    .await?;

                let update =
                    tree::apply_drag_and_drop(&self.store.get(), &drag_node, &result, target.index);
                self.commit("drag_and_drop", update).await?;
                info!(
                    node_id = %drag_id,
                    target = %target.node_id,
                    index = target.index,
                    "Moved node"
                );
            }
        }

        Ok(action)
    }

    /// Refreshes the leaf of a request that was edited and saved elsewhere.
    pub async fn update_request(&self, request: RequestModel) -> AppResult<()> {
        let update = tree::update_request(&self.store.get(), request);
        self.commit("update_request", update).await
    }

    /// Projects the current tree for display and hands it to `render`.
    pub fn view<R>(&self, render: impl FnOnce(&[ViewNode<'_>]) -> R) -> R {
        let snapshot = self.store.get();
        let view = tree::tree_to_view_with(&snapshot, &self.config);
        render(&view)
    }

    /// Publishes a successful update. On failure the store keeps its tree
    /// and, if configured, the authoritative tree is re-fetched; the tree
    /// error is returned either way.
    async fn commit(&self, operation: &'static str, update: TreeUpdate) -> AppResult<()> {
        let error = match update.into_result() {
            Ok(tree) => {
                self.store.set(tree);
                return Ok(());
            }
            Err(error) => error,
        };

        warn!(
            operation,
            code = error.code(),
            error = %error,
            "Local tree out of sync with backend"
        );
        if self.config.reload_on_conflict {
            if let Err(reload_error) = self.reload().await {
                warn!(operation, error = %reload_error, "Reload after conflict failed");
            }
        }
        Err(AppError::from(error))
    }

    fn node(&self, snapshot: &RequestTree, id: NodeId) -> AppResult<TreeNode> {
        tree::find_node(snapshot, id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Node {id} not found")))
    }

    fn group(&self, id: NodeId) -> AppResult<TreeNode> {
        let node = self.node(&self.store.get(), id)?;
        if !node.is_group() {
            return Err(AppError::validation(format!("Node {id} is not a group")));
        }
        Ok(node)
    }
}

