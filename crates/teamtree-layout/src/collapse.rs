use crate::model::TreeModel;
use std::collections::HashSet;
use teamtree_core::NodeId;

/// Ids whose subtrees are hidden from layout.
///
/// This is a masked view, never a data edit: the arena keeps every
/// node, the layouter just treats a collapsed node's children as
/// absent. Reseeded from scratch whenever a new tree arrives, which
/// drops ids that no longer exist without any bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct CollapseSet {
    ids: HashSet<NodeId>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initial view: rows at `depth >= initial_depth_open`
    /// start hidden, so every node whose children would land on such a
    /// row enters the set. Leaves never do. Seeding also collapses
    /// nodes that are themselves hidden, which keeps later manual
    /// expansion incremental, one level at a time.
    pub fn seed(model: &TreeModel, initial_depth_open: usize) -> Self {
        let mut ids = HashSet::new();
        for idx in model.node_indices() {
            let node = &model[idx];
            if node.depth + 1 >= initial_depth_open && !node.children.is_empty() {
                ids.insert(node.id.clone());
            }
        }
        Self { ids }
    }

    /// Flip collapse state for `id`.
    ///
    /// Toggling a leaf or an id that is not in the model is a no-op,
    /// not an error; toggling twice restores the exact prior view.
    pub fn toggle(&mut self, model: &TreeModel, id: &NodeId) {
        if !model.has_children(id) {
            return;
        }
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    pub fn is_collapsed(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
