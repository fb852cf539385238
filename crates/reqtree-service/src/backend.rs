//! The backend collaborator that owns the files on disk.
//!
//! Every structural change is first performed by the backend, which answers
//! with the authoritative fragment of the tree. The service then splices that
//! fragment into its local copy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reqtree_core::result::AppResult;
use reqtree_entity::collection::{Collection, LoadRequestsResult};
use reqtree_entity::request::RequestModel;
use reqtree_entity::tree::{DragAndDropResult, TreeNode};

/// Create a request under a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequestNodeParams {
    /// The group receiving the request.
    pub parent_node: TreeNode,
    /// Name of the new request.
    pub request_name: String,
    /// Requests already stored in the same file as the new one, when the
    /// parent is a file group.
    pub requests_in_same_file: Vec<RequestModel>,
}

/// Create a group under a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGroupNodeParams {
    /// The group receiving the new group.
    pub parent_node: TreeNode,
    /// Name of the new group.
    pub group_name: String,
}

/// Delete a node and everything below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNodeParams {
    /// The node to delete.
    pub node: TreeNode,
    /// The enclosing file group, when the node is a request stored in a
    /// multi-request file.
    pub file_node: Option<TreeNode>,
}

/// Move a node to a new parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragAndDropParams {
    pub drag_node_parent: TreeNode,
    pub drag_node: TreeNode,
    pub drop_node: TreeNode,
    pub drop_index: usize,
}

/// Reorder a node among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderNodesParams {
    pub drag_node: TreeNode,
    pub drop_node: TreeNode,
    pub drop_index: usize,
}

/// Rename a group directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameGroupParams {
    pub old_path: String,
    pub new_name: String,
}

/// Authoritative owner of a collection's files.
#[async_trait]
pub trait CollectionBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Create a request and return its new leaf.
    async fn add_request_node(&self, params: AddRequestNodeParams) -> AppResult<TreeNode>;

    /// Create a group and return its new node.
    async fn add_group_node(&self, params: AddGroupNodeParams) -> AppResult<TreeNode>;

    /// Delete a node from disk.
    async fn delete_node(&self, params: DeleteNodeParams) -> AppResult<()>;

    /// Move a node to another parent.
    async fn drag_and_drop(&self, params: DragAndDropParams) -> AppResult<DragAndDropResult>;

    /// Reorder a node within its parent and return the updated parent.
    async fn reorder_nodes_within_parent(&self, params: ReorderNodesParams)
    -> AppResult<TreeNode>;

    /// Rename a group and return its new path.
    async fn rename_group(&self, params: RenameGroupParams) -> AppResult<String>;

    /// Load the full tree of a collection.
    async fn load_requests_for_collection(
        &self,
        collection: &Collection,
    ) -> AppResult<LoadRequestsResult>;
}
