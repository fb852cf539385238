//! Holder of the current tree snapshot.

use std::sync::Arc;

use tokio::sync::watch;

use reqtree_entity::tree::RequestTree;

/// The single current [`RequestTree`] value.
///
/// Readers get cheap `Arc` snapshots that never change under them; the
/// service is the only writer and publishes each new tree as a whole.
/// Subscribers are notified on every publish.
#[derive(Debug, Clone)]
pub struct TreeStore {
    sender: Arc<watch::Sender<Arc<RequestTree>>>,
}

impl TreeStore {
    /// Create a store holding `tree`.
    pub fn new(tree: RequestTree) -> Self {
        let (sender, _) = watch::channel(Arc::new(tree));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The current snapshot.
    pub fn get(&self) -> Arc<RequestTree> {
        self.sender.borrow().clone()
    }

    /// Publish a new tree, returning the previous snapshot.
    pub fn set(&self, tree: RequestTree) -> Arc<RequestTree> {
        self.sender.send_replace(Arc::new(tree))
    }

    /// Watch for new snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<RequestTree>> {
        self.sender.subscribe()
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new(RequestTree::new())
    }
}
