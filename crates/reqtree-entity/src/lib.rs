//! # reqtree-entity
//!
//! Domain models for the request tree. Every struct here is plain data:
//! the tree a collection is loaded into, the request models its leaves wrap
//! and the values exchanged with the backend collaborator. All entities
//! derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod collection;
pub mod request;
pub mod tree;

pub use collection::{Collection, LoadRequestsResult, ParseWarning};
pub use request::{HttpMethod, RequestModel};
pub use tree::{DragAndDropResult, NodeKind, RequestTree, TreeNode, ViewNode};
