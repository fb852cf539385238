//! Request tree structures.

pub mod drag;
pub mod node;
pub mod view;

pub use drag::DragAndDropResult;
pub use node::{NodeKind, RequestTree, TreeNode};
pub use view::ViewNode;
