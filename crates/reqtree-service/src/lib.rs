//! # reqtree-service
//!
//! The request tree reconciliation engine. The [`tree`] module holds the
//! pure operations: traversal primitives, copy-on-write mutations, the view
//! projection and the drag-and-drop reconciler. Each takes the current tree
//! by reference and yields a new tree value.
//!
//! [`collection::RequestTreeService`] wires those operations to the
//! [`backend::CollectionBackend`] collaborator and the [`store::TreeStore`]
//! holding the current snapshot.

pub mod backend;
pub mod collection;
pub mod store;
pub mod tree;

pub use backend::CollectionBackend;
pub use collection::RequestTreeService;
pub use store::TreeStore;
pub use tree::TreeUpdate;
