use std::fmt::Debug;

use crate::color::Color;
use crate::quadtree::aabb::Aabb;
use crate::quadtree::point::Point;

/// Index of a node in the tree's arena.
pub type NodeID = usize;

/// The four children of a split node, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One square region of a face.
///
/// A node is either a leaf (`children` is `None`) or has exactly four children, one per
/// [`Quadrant`], which together partition its region.
#[derive(Clone, PartialEq)]
pub struct QuadNode {
    pub center: Point,

    /// Half of the side length.
    pub half: f64,

    /// Distance from the root, which sits at depth `0`.
    pub depth: u32,

    pub color: Color,

    /// Indices of the `[nw, ne, sw, se]` children in the arena.
    pub children: Option<[NodeID; 4]>,
}

impl QuadNode {
    pub fn leaf(center: Point, half: f64, depth: u32, color: Color) -> Self {
        QuadNode {
            center,
            half,
            depth,
            color,
            children: None,
        }
    }

    /// Full side length of the region.
    pub fn size(&self) -> f64 {
        2f64 * self.half
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center, self.half)
    }

    pub fn child(&self, q: Quadrant) -> Option<NodeID> {
        self.children.map(|c| c[q.index()])
    }
}

impl Debug for QuadNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?} size {} depth {}", self.center, self.size(), self.depth)?;

        match self.children {
            Some([nw, ne, sw, se]) => write!(f, ", nw: {nw}, ne: {ne}, sw: {sw}, se: {se}]"),
            None => write!(f, ", leaf]"),
        }
    }
}
