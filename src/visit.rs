//! Consuming a built [`QuadTree`](crate::quadtree::QuadTree) without the tree knowing how its
//! leaves are used.

use crate::color::Color;
use crate::quadtree::Point;
use crate::quadtree::QuadNode;

/// Hooks invoked by [`QuadTree::visit`](crate::quadtree::QuadTree::visit).
///
/// `before_visit` and `after_visit` bracket every node, internal or leaf. `on_leaf` runs exactly
/// once per leaf, between the two. `is_last` is set for the last of four siblings (and for a root
/// leaf), which renderers may use to flip transient draw state.
pub trait TreeVisitor {
    fn before_visit(&mut self, _node: &QuadNode) {}

    fn on_leaf(&mut self, node: &QuadNode, is_last: bool, level: u32);

    fn after_visit(&mut self, _node: &QuadNode) {}
}

/// Something that can draw one square of a face.
pub trait PlaneRenderer {
    /// Draw the square of side `size` centered on `(x, y)` in face-local coordinates.
    fn draw_plane(&mut self, x: f64, y: f64, size: f64, color: Color);

    /// Outline-only drawing while `true`.
    fn set_wireframe(&mut self, _on: bool) {}
}

impl<R: PlaneRenderer + ?Sized> PlaneRenderer for &mut R {
    fn draw_plane(&mut self, x: f64, y: f64, size: f64, color: Color) {
        (**self).draw_plane(x, y, size, color);
    }

    fn set_wireframe(&mut self, on: bool) {
        (**self).set_wireframe(on);
    }
}

/// Forwards every leaf to a [`PlaneRenderer`].
#[derive(Debug)]
pub struct LeafRenderer<R> {
    pub renderer: R,

    /// Applied before each node, cleared after it.
    pub wireframe: bool,
}

impl<R: PlaneRenderer> LeafRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            wireframe: false,
        }
    }

    pub fn wireframe(mut self, on: bool) -> Self {
        self.wireframe = on;
        self
    }

    pub fn into_inner(self) -> R {
        self.renderer
    }
}

impl<R: PlaneRenderer> TreeVisitor for LeafRenderer<R> {
    fn before_visit(&mut self, _node: &QuadNode) {
        self.renderer.set_wireframe(self.wireframe);
    }

    fn on_leaf(&mut self, node: &QuadNode, _is_last: bool, _level: u32) {
        self.renderer
            .draw_plane(node.center.x, node.center.y, node.size(), node.color);
    }

    fn after_visit(&mut self, _node: &QuadNode) {
        self.renderer.set_wireframe(false);
    }
}

/// What a renderer gets to know about a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafDescriptor {
    pub center: Point,

    /// Full side length
    pub size: f64,

    pub depth: u32,
    pub color: Color,
}

impl From<&QuadNode> for LeafDescriptor {
    fn from(node: &QuadNode) -> Self {
        LeafDescriptor {
            center: node.center,
            size: node.size(),
            depth: node.depth,
            color: node.color,
        }
    }
}

/// Records leaves in traversal order.
#[derive(Debug, Default)]
pub struct LeafCollector {
    leaves: Vec<LeafDescriptor>,
}

impl LeafCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaves(&self) -> &[LeafDescriptor] {
        &self.leaves
    }

    pub fn into_leaves(self) -> Vec<LeafDescriptor> {
        self.leaves
    }
}

impl TreeVisitor for LeafCollector {
    fn on_leaf(&mut self, node: &QuadNode, _is_last: bool, _level: u32) {
        self.leaves.push(node.into());
    }
}

/// Collects every `draw_plane` call. Handy for checking what a renderer would have received.
#[derive(Debug, Default)]
pub struct PlaneLog {
    pub planes: Vec<(f64, f64, f64, Color)>,
    pub wireframe_toggles: usize,
}

impl PlaneRenderer for PlaneLog {
    fn draw_plane(&mut self, x: f64, y: f64, size: f64, color: Color) {
        self.planes.push((x, y, size, color));
    }

    fn set_wireframe(&mut self, _on: bool) {
        self.wireframe_toggles += 1;
    }
}

#[cfg(test)]
mod test {
    use super::LeafCollector;
    use super::LeafRenderer;
    use super::PlaneLog;
    use crate::color::Color;
    use crate::quadtree::Point;
    use crate::quadtree::QuadTree;

    fn split_tree() -> QuadTree {
        let mut qt = QuadTree::new(3, 2.0, Point::new(0.0, 0.0), Color::YELLOW).unwrap();
        qt.split(Point::new(0.9, 0.9), 1.0).unwrap();
        qt
    }

    #[test]
    fn renderer_sees_every_leaf_in_order() {
        let qt = split_tree();

        let mut collector = LeafCollector::new();
        qt.visit(&mut collector);

        let mut log = PlaneLog::default();
        qt.visit(&mut LeafRenderer::new(&mut log));

        assert_eq!(log.planes.len(), qt.leaf_count());

        for (leaf, &(x, y, size, color)) in collector.leaves().iter().zip(&log.planes) {
            assert_eq!(Point::new(x, y), leaf.center);
            assert_eq!(size, leaf.size);
            assert_eq!(color, leaf.color);
        }
    }

    #[test]
    fn wireframe_is_toggled_around_each_node() {
        let qt = split_tree();

        let mut log = PlaneLog::default();
        qt.visit(&mut LeafRenderer::new(&mut log).wireframe(true));

        assert_eq!(log.wireframe_toggles, 2 * qt.node_count());
    }
}
