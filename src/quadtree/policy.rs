use crate::quadtree::node::QuadNode;
use crate::quadtree::point::Point;

/// Decide whether `node` should be subdivided for a viewer at `focus`.
///
/// A node splits when the focus is closer to its center than `split_factor` times its side
/// length:
///
///    |center - focus| < k * size
///
/// Moving the focus closer never turns a split into a non-split, and a larger `k` only ever
/// splits more. A non-finite focus never splits anything. The depth ceiling is not checked
/// here, see [`QuadTree::split`](crate::quadtree::QuadTree::split).
pub fn should_split(node: &QuadNode, focus: Point, split_factor: f64) -> bool {
    let d = node.center.distance(&focus);

    // NaN compares false
    d < split_factor * node.size()
}

#[cfg(test)]
mod test {
    use super::should_split;
    use crate::color::Color;
    use crate::quadtree::node::QuadNode;
    use crate::quadtree::point::Point;

    fn node(size: f64) -> QuadNode {
        QuadNode::leaf(Point::new(0.0, 0.0), size / 2.0, 0, Color::YELLOW)
    }

    #[test]
    fn focus_at_center_splits() {
        assert!(should_split(&node(2.0), Point::new(0.0, 0.0), 1.5));
    }

    #[test]
    fn far_focus_does_not_split() {
        assert!(!should_split(&node(2.0), Point::new(100.0, 0.0), 3.0));
    }

    #[test]
    fn threshold_is_strict() {
        // distance 3 == 1.5 * 2
        assert!(!should_split(&node(2.0), Point::new(3.0, 0.0), 1.5));
        assert!(should_split(&node(2.0), Point::new(2.999, 0.0), 1.5));
    }

    #[test]
    fn larger_factor_reaches_further() {
        let n = node(1.0);
        let focus = Point::new(2.0, 0.0);

        assert!(!should_split(&n, focus, 1.5));
        assert!(should_split(&n, focus, 2.5));
    }

    #[test]
    fn non_finite_focus_never_splits() {
        let n = node(2.0);

        assert!(!should_split(&n, Point::new(f64::INFINITY, 0.0), 3.0));
        assert!(!should_split(&n, Point::new(f64::NAN, 0.0), 3.0));
    }
}
