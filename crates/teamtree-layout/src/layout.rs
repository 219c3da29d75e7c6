use crate::collapse::CollapseSet;
use crate::model::{NodeIndex, TreeModel};
use serde::{Deserialize, Serialize};
use teamtree_core::NodeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of the laid-out tree, already expanded by the
/// configured padding. Used to size the zoomable canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Card geometry and spacing. Defaults match the card size the member
/// tooltip grid was designed around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 200.0,
            card_height: 72.0,
            gap_x: 60.0,
            gap_y: 120.0,
            padding: 80.0,
        }
    }
}

impl LayoutConfig {
    /// Minimum horizontal center-to-center spacing between leaves.
    pub fn pitch_x(&self) -> f32 {
        self.card_width + self.gap_x
    }

    /// Vertical center-to-center spacing between depth rows.
    pub fn pitch_y(&self) -> f32 {
        self.card_height + self.gap_y
    }
}

/// A visible node with its card center in untransformed layout space.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub index: NodeIndex,
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub depth: usize,
}

/// A visible parent→child edge, anchored at the parent card's
/// bottom-center and the child card's top-center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub parent: NodeIndex,
    pub child: NodeIndex,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Default)]
pub struct TreeLayout {
    /// Visible nodes in display (pre-)order.
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<Link>,
    pub bounds: Bounds,
}

impl TreeLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Tidy top-down tree layout.
///
/// Pure function of (model, collapse set, config): siblings keep input
/// order left-to-right, leaves pack at `pitch_x`, every parent is
/// horizontally centered over the span of its visible children, and no
/// two sibling subtrees overlap because each subtree occupies its own
/// contiguous horizontal slot. All walks are iterative; nothing here
/// assumes a bounded tree depth.
#[derive(Debug, Clone, Default)]
pub struct TreeLayouter {
    pub config: LayoutConfig,
}

impl TreeLayouter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn layout(&self, model: &TreeModel, collapsed: &CollapseSet) -> TreeLayout {
        let Some(root) = model.root else {
            return TreeLayout::default();
        };

        let pitch_x = self.config.pitch_x();
        let pitch_y = self.config.pitch_y();

        // Visible pre-order. Children of a collapsed node are masked,
        // not removed.
        let mut order = Vec::with_capacity(model.node_count());
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            for &child in self.visible_children(model, collapsed, idx).iter().rev() {
                stack.push(child);
            }
        }

        // Subtree slot widths, children before parents (reverse
        // pre-order visits every child ahead of its parent).
        let mut width = vec![0.0f32; model.node_count()];
        for &idx in order.iter().rev() {
            let kids = self.visible_children(model, collapsed, idx);
            width[idx.0] = if kids.is_empty() {
                pitch_x
            } else {
                kids.iter().map(|c| width[c.0]).sum::<f32>().max(pitch_x)
            };
        }

        // Slot offsets, parents before children. A child block narrower
        // than its parent's slot is centered inside it.
        let mut offset = vec![0.0f32; model.node_count()];
        for &idx in &order {
            let kids = self.visible_children(model, collapsed, idx);
            if kids.is_empty() {
                continue;
            }
            let block: f32 = kids.iter().map(|c| width[c.0]).sum();
            let mut child_offset = offset[idx.0] + (width[idx.0] - block) / 2.0;
            for &child in kids {
                offset[child.0] = child_offset;
                child_offset += width[child.0];
            }
        }

        // Card centers, children before parents again: a leaf sits in
        // the middle of its slot, a parent midway between its first and
        // last child. With a single child this degenerates to the
        // child's own x, no special case needed.
        let mut x = vec![0.0f32; model.node_count()];
        for &idx in order.iter().rev() {
            let kids = self.visible_children(model, collapsed, idx);
            x[idx.0] = match (kids.first(), kids.last()) {
                (Some(first), Some(last)) => (x[first.0] + x[last.0]) / 2.0,
                _ => offset[idx.0] + width[idx.0] / 2.0,
            };
        }

        let mut nodes = Vec::with_capacity(order.len());
        let mut links = Vec::new();
        for &idx in &order {
            let node = &model[idx];
            let pos = Point::new(x[idx.0], node.depth as f32 * pitch_y);
            nodes.push(PositionedNode {
                index: idx,
                id: node.id.clone(),
                x: pos.x,
                y: pos.y,
                depth: node.depth,
            });
            for &child in self.visible_children(model, collapsed, idx) {
                links.push(Link {
                    parent: idx,
                    child,
                    from: Point::new(pos.x, pos.y + self.config.card_height / 2.0),
                    to: Point::new(
                        x[child.0],
                        model[child].depth as f32 * pitch_y - self.config.card_height / 2.0,
                    ),
                });
            }
        }

        let bounds = self.bounds_of(&nodes);
        TreeLayout {
            nodes,
            links,
            bounds,
        }
    }

    fn visible_children<'a>(
        &self,
        model: &'a TreeModel,
        collapsed: &CollapseSet,
        idx: NodeIndex,
    ) -> &'a [NodeIndex] {
        let node = &model[idx];
        if collapsed.is_collapsed(&node.id) {
            &[]
        } else {
            &node.children
        }
    }

    fn bounds_of(&self, nodes: &[PositionedNode]) -> Bounds {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for node in nodes {
            min_x = min_x.min(node.x);
            min_y = min_y.min(node.y);
            max_x = max_x.max(node.x);
            max_y = max_y.max(node.y);
        }
        if nodes.is_empty() {
            return Bounds::default();
        }

        let half_w = self.config.card_width / 2.0;
        let half_h = self.config.card_height / 2.0;
        Bounds {
            min_x: min_x - half_w - self.config.padding,
            min_y: min_y - half_h - self.config.padding,
            max_x: max_x + half_w + self.config.padding,
            max_y: max_y + half_h + self.config.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use teamtree_core::{Member, Node, NodeId};

    fn leaf(id: &str) -> Node {
        Node::new(id, Member::default())
    }

    fn branch(id: &str, children: Vec<Node>) -> Node {
        let mut node = Node::new(id, Member::default());
        node.children = children;
        node
    }

    fn positions(layout: &TreeLayout) -> Vec<(&str, f32, f32)> {
        layout
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.x, n.y))
            .collect()
    }

    fn find(layout: &TreeLayout, id: &str) -> PositionedNode {
        layout
            .nodes
            .iter()
            .find(|n| n.id.as_str() == id)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_empty_model_yields_empty_layout() {
        let layout = TreeLayouter::default().layout(&TreeModel::new(), &CollapseSet::new());
        assert!(layout.is_empty());
        assert!(layout.links.is_empty());
        assert_eq!(layout.bounds, Bounds::default());
    }

    #[test]
    fn test_single_node_layout() {
        let model = TreeModel::from_root(&leaf("1"));
        let layouter = TreeLayouter::default();
        let layout = layouter.layout(&model, &CollapseSet::new());

        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.links.is_empty());
        assert_eq!(layout.nodes[0].y, 0.0);
        assert!(layout.bounds.width() > layouter.config.card_width);
    }

    #[test]
    fn test_single_child_parent_sits_directly_above() {
        let model = TreeModel::from_root(&branch("1", vec![leaf("2")]));
        let layout = TreeLayouter::default().layout(&model, &CollapseSet::new());

        let parent = find(&layout, "1");
        let child = find(&layout, "2");
        assert_eq!(parent.x, child.x);
        assert_eq!(child.y - parent.y, TreeLayouter::default().config.pitch_y());
    }

    #[test]
    fn test_parent_centered_over_children_span() {
        let model = TreeModel::from_root(&branch("1", vec![leaf("2"), leaf("3"), leaf("4")]));
        let layout = TreeLayouter::default().layout(&model, &CollapseSet::new());

        let parent = find(&layout, "1");
        let first = find(&layout, "2");
        let last = find(&layout, "4");
        assert!((parent.x - (first.x + last.x) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_leaves_packed_at_pitch() {
        let model = TreeModel::from_root(&branch("1", vec![leaf("2"), leaf("3"), leaf("4")]));
        let layouter = TreeLayouter::default();
        let layout = layouter.layout(&model, &CollapseSet::new());

        let a = find(&layout, "2");
        let b = find(&layout, "3");
        let c = find(&layout, "4");
        assert!((b.x - a.x - layouter.config.pitch_x()).abs() < 1e-3);
        assert!((c.x - b.x - layouter.config.pitch_x()).abs() < 1e-3);
    }

    #[test]
    fn test_sibling_subtrees_do_not_overlap() {
        // Left subtree is wide (4 leaves), right subtree is a chain.
        let wide = branch("w", vec![leaf("w1"), leaf("w2"), leaf("w3"), leaf("w4")]);
        let chain = branch("c", vec![branch("c1", vec![leaf("c2")])]);
        let model = TreeModel::from_root(&branch("r", vec![wide, chain]));
        let layouter = TreeLayouter::default();
        let layout = layouter.layout(&model, &CollapseSet::new());

        // No two visible nodes on the same row may be closer than one
        // card pitch.
        for (i, a) in layout.nodes.iter().enumerate() {
            for b in layout.nodes.iter().skip(i + 1) {
                if a.depth == b.depth {
                    assert!(
                        (a.x - b.x).abs() >= layouter.config.pitch_x() - 1e-3,
                        "{} and {} overlap: {} vs {}",
                        a.id,
                        b.id,
                        a.x,
                        b.x
                    );
                }
            }
        }
    }

    #[test]
    fn test_collapse_masks_subtree_without_mutating_model() {
        let root = branch("1", vec![leaf("2"), branch("3", vec![leaf("4")])]);
        let model = TreeModel::from_root(&root);
        let mut collapsed = CollapseSet::new();
        collapsed.toggle(&model, &NodeId::from("3"));

        let layout = TreeLayouter::default().layout(&model, &collapsed);
        let ids: Vec<_> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        // Data untouched: node 3 still has its child in the arena.
        assert!(model.has_children(&NodeId::from("3")));
    }

    #[test]
    fn test_links_cover_visible_edges_only() {
        let root = branch("1", vec![leaf("2"), branch("3", vec![leaf("4")])]);
        let model = TreeModel::from_root(&root);
        let layouter = TreeLayouter::default();

        let full = layouter.layout(&model, &CollapseSet::new());
        assert_eq!(full.links.len(), 3);

        let mut collapsed = CollapseSet::new();
        collapsed.toggle(&model, &NodeId::from("3"));
        let masked = layouter.layout(&model, &collapsed);
        assert_eq!(masked.links.len(), 2);
    }

    #[test]
    fn test_link_anchors_at_card_edges() {
        let model = TreeModel::from_root(&branch("1", vec![leaf("2")]));
        let layouter = TreeLayouter::default();
        let layout = layouter.layout(&model, &CollapseSet::new());

        let parent = find(&layout, "1");
        let child = find(&layout, "2");
        let link = layout.links[0];
        assert_eq!(link.from.y, parent.y + layouter.config.card_height / 2.0);
        assert_eq!(link.to.y, child.y - layouter.config.card_height / 2.0);
        assert_eq!(link.from.x, parent.x);
        assert_eq!(link.to.x, child.x);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let root = branch(
            "1",
            vec![branch("2", vec![leaf("5"), leaf("6")]), leaf("3"), leaf("4")],
        );
        let model = TreeModel::from_root(&root);
        let layouter = TreeLayouter::default();

        let a = layouter.layout(&model, &CollapseSet::new());
        let b = layouter.layout(&model, &CollapseSet::new());
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_bounds_include_card_extent_and_padding() {
        let layouter = TreeLayouter::default();
        let model = TreeModel::from_root(&leaf("1"));
        let layout = layouter.layout(&model, &CollapseSet::new());

        let node = &layout.nodes[0];
        let cfg = &layouter.config;
        assert_eq!(
            layout.bounds.min_x,
            node.x - cfg.card_width / 2.0 - cfg.padding
        );
        assert_eq!(
            layout.bounds.max_y,
            node.y + cfg.card_height / 2.0 + cfg.padding
        );
    }

    // Property tests over arbitrary trees: visible-node count matches a
    // direct reachability walk, and sibling layout order matches input
    // order at every node.

    fn tree_strategy() -> impl Strategy<Value = Node> {
        let shape = prop::collection::vec(0usize..4, 0..3).prop_map(|counts| {
            counts
                .into_iter()
                .map(|c| {
                    let mut node = Node::new("x", Member::default());
                    node.children = (0..c).map(|_| Node::new("x", Member::default())).collect();
                    node
                })
                .collect::<Vec<_>>()
        });
        shape.prop_map(|children| {
            let mut root = Node::new("x", Member::default());
            root.children = children;
            assign_unique_ids(&mut root, &mut 0);
            root
        })
    }

    fn assign_unique_ids(node: &mut Node, counter: &mut usize) {
        node.id = NodeId(counter.to_string());
        *counter += 1;
        for child in &mut node.children {
            assign_unique_ids(child, counter);
        }
    }

    fn reachable(node: &Node, collapsed: &CollapseSet, out: &mut Vec<NodeId>) {
        out.push(node.id.clone());
        if collapsed.is_collapsed(&node.id) {
            return;
        }
        for child in &node.children {
            reachable(child, collapsed, out);
        }
    }

    proptest! {
        #[test]
        fn prop_positioned_count_matches_reachable_set(
            root in tree_strategy(),
            mask in prop::collection::vec(any::<bool>(), 16)
        ) {
            let model = TreeModel::from_root(&root);
            let mut collapsed = CollapseSet::new();
            for (i, flag) in mask.iter().enumerate() {
                if *flag {
                    collapsed.toggle(&model, &NodeId(i.to_string()));
                }
            }

            let mut expected = Vec::new();
            reachable(&root, &collapsed, &mut expected);

            let layout = TreeLayouter::default().layout(&model, &collapsed);
            prop_assert_eq!(layout.nodes.len(), expected.len());
            prop_assert_eq!(layout.links.len(), expected.len() - 1);
        }

        #[test]
        fn prop_sibling_order_matches_input_order(root in tree_strategy()) {
            let model = TreeModel::from_root(&root);
            let layout = TreeLayouter::default().layout(&model, &CollapseSet::new());

            for node in &layout.nodes {
                let children = &model[node.index].children;
                for pair in children.windows(2) {
                    let left = layout.nodes.iter().find(|n| n.index == pair[0]).unwrap();
                    let right = layout.nodes.iter().find(|n| n.index == pair[1]).unwrap();
                    prop_assert!(left.x < right.x);
                }
            }
        }
    }
}
