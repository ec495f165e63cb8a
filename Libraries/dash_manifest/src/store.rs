use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::tree::Node;

/// Holds the one live manifest tree of a player.
///
/// Loading swaps the `Arc` behind the lock, so a reader that took a snapshot
/// with [`ManifestStore::get`] keeps working on the tree it started with while
/// a reload happens.
#[derive(Debug, Default)]
pub struct ManifestStore {
    current: RwLock<Option<Arc<Node>>>,
}

impl ManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active tree (Empty→Loaded or Loaded→Loaded).
    pub fn set(&self, tree: Node) {
        let tree = Arc::new(tree);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(tree);
        debug!("Manifest tree replaced");
    }

    /// Snapshot of the active tree, if any.
    pub fn get(&self) -> Option<Arc<Node>> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drops the active tree (any→Empty).
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
        debug!("Manifest tree cleared");
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
