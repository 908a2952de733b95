use crate::quadtree::node::Quadrant;
use crate::quadtree::point::Point;

/// Axis-aligned box in face-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Create the square centered on `center` reaching `half` in every direction.
    pub fn from_center(center: Point, half: f64) -> Self {
        Aabb {
            min: Point {
                x: center.x - half,
                y: center.y - half,
            },
            max: Point {
                x: center.x + half,
                y: center.y + half,
            },
        }
    }

    pub fn center(&self) -> Point {
        self.min.mid(&self.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Closed containment: points on the boundary are inside.
    pub fn contains(&self, p: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// Area shared by `self` and `other`. Zero when they only touch along an edge.
    pub fn overlap(&self, other: &Aabb) -> f64 {
        let w = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let h = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);

        if w <= 0f64 || h <= 0f64 { 0f64 } else { w * h }
    }

    /// Which quadrant of this box `p` falls in. A point lying exactly on a split line belongs to
    /// the lower-coordinate side (west of the vertical line, south of the horizontal one).
    pub fn quadrant_of(&self, p: &Point) -> Quadrant {
        let center = self.center();

        match (p.x <= center.x, p.y <= center.y) {
            (true, false) => Quadrant::NorthWest,
            (false, false) => Quadrant::NorthEast,
            (true, true) => Quadrant::SouthWest,
            (false, true) => Quadrant::SouthEast,
        }
    }

    /// Splits the bounding box into four equal quadrants, in `[nw, ne, sw, se]` order.
    pub fn split(&self) -> [Aabb; 4] {
        let center = self.center();

        let nw = Aabb {
            min: Point {
                x: self.min.x,
                y: center.y,
            },
            max: Point {
                x: center.x,
                y: self.max.y,
            },
        };

        let ne = Aabb {
            min: center,
            max: self.max,
        };

        let sw = Aabb {
            min: self.min,
            max: center,
        };

        let se = Aabb {
            min: Point {
                x: center.x,
                y: self.min.y,
            },
            max: Point {
                x: self.max.x,
                y: center.y,
            },
        };

        [nw, ne, sw, se]
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::quadtree::node::Quadrant;
    use crate::quadtree::point::Point;

    #[test]
    fn split_partitions_parent() {
        let b = Aabb::from_center(Point::new(1.0, -2.0), 2.0);
        let parts = b.split();

        let total: f64 = parts.iter().map(Aabb::area).sum();
        assert_eq!(total, b.area());

        for (i, p) in parts.iter().enumerate() {
            for q in &parts[i + 1..] {
                assert_eq!(p.overlap(q), 0.0);
            }
        }
    }

    #[test]
    fn split_order_is_nw_ne_sw_se() {
        let [nw, ne, sw, se] = Aabb::from_center(Point::new(0.0, 0.0), 1.0).split();

        assert_eq!(nw.center(), Point::new(-0.5, 0.5));
        assert_eq!(ne.center(), Point::new(0.5, 0.5));
        assert_eq!(sw.center(), Point::new(-0.5, -0.5));
        assert_eq!(se.center(), Point::new(0.5, -0.5));
    }

    #[test]
    fn boundary_goes_to_lower_quadrant() {
        let b = Aabb::from_center(Point::new(0.0, 0.0), 1.0);

        assert_eq!(b.quadrant_of(&Point::new(0.0, 0.0)), Quadrant::SouthWest);
        assert_eq!(b.quadrant_of(&Point::new(0.0, 0.5)), Quadrant::NorthWest);
        assert_eq!(b.quadrant_of(&Point::new(0.5, 0.0)), Quadrant::SouthEast);
        assert_eq!(b.quadrant_of(&Point::new(0.1, 0.1)), Quadrant::NorthEast);
    }
}
