use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod normalize;

pub use error::TreeError;
pub use normalize::normalize;

/// Stable identifier for a member in the referral tree.
///
/// The upstream API sends ids either as JSON numbers or strings
/// (`user_id` preferred, `id` as fallback); both forms normalize to the
/// same string-backed id, with numbers rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value.to_string())
    }
}

/// Income and investment figures attached to a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_investment: f64,
    pub total_income: f64,
    pub this_month_income: f64,
}

/// Display payload for one member card and its tooltip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub referral_code: String,
    pub metrics: Metrics,
}

/// One node of the canonical referral tree.
///
/// Children are owned exclusively by their parent and their order is the
/// display order. The tree is acyclic with exactly one root; ids are
/// unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub member: Member,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, member: Member) -> Self {
        Self {
            id: id.into(),
            member,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_from_number_and_string_agree() {
        assert_eq!(NodeId::from(42), NodeId::from("42"));
    }

    #[test]
    fn test_node_count_includes_self() {
        let mut root = Node::new("1", Member::default());
        root.children.push(Node::new("2", Member::default()));
        let mut branch = Node::new("3", Member::default());
        branch.children.push(Node::new("4", Member::default()));
        root.children.push(branch);

        assert_eq!(root.count(), 4);
    }
}
