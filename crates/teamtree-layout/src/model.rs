use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use teamtree_core::{Member, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One arena entry. The canonical [`Node`] tree is flattened into these
/// so that layout and rendering can walk indices instead of owning
/// references into a recursive structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub member: Member,
    pub depth: usize,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
}

/// Flat arena of the current referral tree plus an id lookup table.
///
/// Rebuilt wholesale from each fetched root; there is no incremental
/// patching. Collapse state lives outside the model (see
/// [`crate::CollapseSet`]) so toggling a subtree never touches the data
/// itself.
#[derive(Debug, Default)]
pub struct TreeModel {
    nodes: Vec<TreeNode>,
    pub node_map: HashMap<NodeId, NodeIndex>,
    pub root: Option<NodeIndex>,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a canonical tree into an arena, pre-order.
    ///
    /// Duplicate ids violate the tree contract; the first occurrence
    /// wins and later ones are dropped with a warning.
    pub fn from_root(root: &Node) -> Self {
        let mut model = Self::new();
        model.insert_subtree(root, None, 0);
        model.root = Some(NodeIndex(0));
        model
    }

    fn insert_subtree(
        &mut self,
        node: &Node,
        parent: Option<NodeIndex>,
        depth: usize,
    ) -> Option<NodeIndex> {
        if self.node_map.contains_key(&node.id) {
            tracing::warn!("dropping subtree with duplicate id {}", node.id);
            return None;
        }

        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            id: node.id.clone(),
            member: node.member.clone(),
            depth,
            parent,
            children: Vec::new(),
        });
        self.node_map.insert(node.id.clone(), idx);

        for child in &node.children {
            if let Some(child_idx) = self.insert_subtree(child, Some(idx), depth + 1) {
                self[idx].children.push(child_idx);
            }
        }
        Some(idx)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(idx.0)
    }

    pub fn get_by_id(&self, id: &NodeId) -> Option<&TreeNode> {
        self.node_map.get(id).map(|&idx| &self[idx])
    }

    pub fn has_children(&self, id: &NodeId) -> bool {
        self.get_by_id(id).is_some_and(|n| !n.children.is_empty())
    }
}

impl Index<NodeIndex> for TreeModel {
    type Output = TreeNode;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl IndexMut<NodeIndex> for TreeModel {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamtree_core::Member;

    fn leaf(id: &str) -> Node {
        Node::new(id, Member::default())
    }

    fn branch(id: &str, children: Vec<Node>) -> Node {
        let mut node = Node::new(id, Member::default());
        node.children = children;
        node
    }

    #[test]
    fn test_from_root_flattens_preorder() {
        let root = branch("1", vec![leaf("2"), branch("3", vec![leaf("4")])]);
        let model = TreeModel::from_root(&root);

        assert_eq!(model.node_count(), 4);
        assert_eq!(model.root, Some(NodeIndex(0)));

        let order: Vec<_> = model
            .node_indices()
            .map(|idx| model[idx].id.as_str().to_string())
            .collect();
        assert_eq!(order, vec!["1", "2", "3", "4"]);

        let grandchild = model.get_by_id(&NodeId::from("4")).unwrap();
        assert_eq!(grandchild.depth, 2);
        assert_eq!(grandchild.parent, Some(NodeIndex(2)));
    }

    #[test]
    fn test_duplicate_ids_first_occurrence_wins() {
        let root = branch("1", vec![branch("2", vec![leaf("3")]), leaf("2")]);
        let model = TreeModel::from_root(&root);

        assert_eq!(model.node_count(), 3);
        let root_node = model.get_by_id(&NodeId::from("1")).unwrap();
        assert_eq!(root_node.children.len(), 1);
        assert!(model.has_children(&NodeId::from("2")));
    }

    #[test]
    fn test_has_children_on_leaf_and_unknown() {
        let root = branch("1", vec![leaf("2")]);
        let model = TreeModel::from_root(&root);

        assert!(model.has_children(&NodeId::from("1")));
        assert!(!model.has_children(&NodeId::from("2")));
        assert!(!model.has_children(&NodeId::from("404")));
    }
}
