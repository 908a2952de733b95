use glam::DVec2;
use tracing::debug;
use tracing::trace;
use tracing::warn;

pub use crate::quadtree::aabb::Aabb;
pub use crate::quadtree::node::NodeID;
pub use crate::quadtree::node::QuadNode;
pub use crate::quadtree::node::Quadrant;
pub use crate::quadtree::point::Point;
pub use crate::quadtree::policy::should_split;

use crate::color::Color;
use crate::color::ColorRule;
use crate::config;
use crate::config::ConfigError;
use crate::config::LodConfig;
use crate::visit::TreeVisitor;

mod aabb;
mod node;
mod point;
mod policy;

/// The root always lives at the front of the arena.
pub const ROOT: NodeID = 0;

/// Adaptive quadtree over one square face region.
///
/// A fresh tree is a single leaf covering `[origin - size/2, origin + size/2]` on both axes.
/// [`QuadTree::split`] subdivides it around a focus point, after which the tree is only read
/// through [`QuadTree::visit`] and the query methods.
#[derive(Debug, Clone)]
pub struct QuadTree {
    max_depth: u32,

    /// Full side length of the root
    size: f64,

    origin: Point,
    color: Color,
    color_rule: ColorRule,

    /// Every node of the tree. Children of a node are stored next to each other.
    nodes: Vec<QuadNode>,
}

impl QuadTree {
    /// Create a single-leaf tree. Fails if `max_depth` is outside `0..=MAX_DEPTH` or `size` is
    /// not positive.
    pub fn new(max_depth: i64, size: f64, origin: Point, color: Color) -> Result<Self, ConfigError> {
        let max_depth = config::check_depth(max_depth)?;
        let size = config::check_size(size)?;

        if !origin.is_finite() {
            return Err(ConfigError::NonFinite { what: "origin" });
        }

        if max_depth > config::RECOMMENDED_MAX_DEPTH {
            warn!(max_depth, "deep quadtree, a large split factor may allocate heavily");
        }

        let mut tree = QuadTree {
            max_depth,
            size,
            origin,
            color,
            color_rule: ColorRule::Inherit,
            nodes: Vec::new(),
        };
        tree.reset();

        Ok(tree)
    }

    /// Create a single-leaf tree from the geometry and colour settings of `config`.
    pub fn from_config(config: &LodConfig) -> Result<Self, ConfigError> {
        let tree = Self::new(config.max_depth as i64, config.size, config.origin, config.color)?;

        Ok(tree.with_color_rule(config.color_rule))
    }

    pub fn with_color_rule(mut self, rule: ColorRule) -> Self {
        self.color_rule = rule;
        self
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.nodes
            .push(QuadNode::leaf(self.origin, self.size / 2f64, 0, self.color));
    }

    /// Subdivide the tree around `focus`.
    ///
    /// The tree is rebuilt from a single root leaf on every call, so calling this twice with the
    /// same arguments yields the same tree. A node splits when its depth is below the tree's
    /// `max_depth` and [`should_split`] says so. `max_depth` is never exceeded.
    pub fn split(&mut self, focus: Point, split_factor: f64) -> Result<(), ConfigError> {
        let split_factor = config::check_split_factor(split_factor)?;

        if !self.bounds().contains(&focus) {
            trace!(?focus, "focus lies outside the root region");
        }

        self.reset();
        Self::build(self, ROOT, focus, split_factor);

        debug!(
            nodes = self.nodes.len(),
            leaves = self.leaf_count(),
            depth = self.depth_reached(),
            "quadtree split"
        );

        Ok(())
    }

    fn build(tree: &mut QuadTree, id: NodeID, focus: Point, split_factor: f64) {
        let node = &tree.nodes[id];

        // hard bound, regardless of what the policy says
        if node.depth >= tree.max_depth || !should_split(node, focus, split_factor) {
            return;
        }

        let half = node.half / 2f64;
        let depth = node.depth + 1;
        let color = tree.color_rule.child_color(node.color);
        let quadrants = node.bounds().split();

        let first = tree.nodes.len();
        for q in quadrants {
            tree.nodes.push(QuadNode::leaf(q.center(), half, depth, color));
        }

        let children = [first, first + 1, first + 2, first + 3];
        tree.nodes[id].children = Some(children);

        for child in children {
            Self::build(tree, child, focus, split_factor);
        }
    }

    /// Depth-first traversal starting at the root.
    ///
    /// For every node `before_visit` runs first, then either `on_leaf` (leaves) or the traversal
    /// of the four children in `[nw, ne, sw, se]` order, then `after_visit`.
    pub fn visit<V: TreeVisitor + ?Sized>(&self, visitor: &mut V) {
        self.visit_node(ROOT, visitor, true, 0);
    }

    /// Traverse the subtree rooted at `id`. `is_last` and `level` are what `on_leaf` receives if
    /// `id` is itself a leaf.
    pub fn visit_node<V: TreeVisitor + ?Sized>(
        &self,
        id: NodeID,
        visitor: &mut V,
        is_last: bool,
        level: u32,
    ) {
        let node = &self.nodes[id];

        visitor.before_visit(node);

        match node.children {
            None => visitor.on_leaf(node, is_last, level),
            Some(children) => {
                for (i, child) in children.into_iter().enumerate() {
                    self.visit_node(child, visitor, i == children.len() - 1, level + 1);
                }
            }
        }

        visitor.after_visit(node);
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeID) -> Option<&QuadNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    /// Leaves in arena order. Use [`QuadTree::visit`] for traversal order.
    pub fn leaves(&self) -> impl Iterator<Item = &QuadNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The deepest level any leaf sits at.
    pub fn depth_reached(&self) -> u32 {
        self.leaves().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Region covered by the root.
    pub fn bounds(&self) -> Aabb {
        self.root().bounds()
    }

    /// Find the leaf containing `p`, or `None` if `p` is outside the root region. Points on a
    /// split line go to the lower-coordinate side, see [`Aabb::quadrant_of`].
    pub fn find_leaf(&self, p: Point) -> Option<NodeID> {
        if !self.bounds().contains(&p) {
            return None;
        }

        let mut id = ROOT;

        while let Some(children) = self.nodes[id].children {
            let q = self.nodes[id].bounds().quadrant_of(&p);
            id = children[q.index()];
        }

        Some(id)
    }

    /// Map a normalized face coordinate (`[0, 1]` on both axes) into this tree's local region.
    pub fn focus_from_face(&self, uv: DVec2) -> Point {
        Point {
            x: self.origin.x + (uv.x - 0.5) * self.size,
            y: self.origin.y + (uv.y - 0.5) * self.size,
        }
    }
}
