//! The six faces of a cube sphere and the mapping between 3D points and face space.
//!
//! Face space is `[0, 1]` on both axes, `(0.5, 0.5)` being the middle of the face.

use glam::DVec2;
use glam::DVec3;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// +x
    Right,
    /// +y
    Top,
    /// +z
    Back,
    /// -x
    Left,
    /// -y
    Bottom,
    /// -z
    Front,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

/// Which input axes become `u` and `v` (with their sign), and which axis is the depth axis
/// perpendicular to the face.
#[derive(Debug, Clone, Copy)]
struct Swizzle {
    u: (Axis, f64),
    v: (Axis, f64),
    depth: (Axis, f64),
}

const fn swizzle(u: (Axis, f64), v: (Axis, f64), depth: (Axis, f64)) -> Swizzle {
    Swizzle { u, v, depth }
}

/// Indexed by `Face as usize`.
const SWIZZLES: [Swizzle; 6] = [
    swizzle((Axis::Y, 1.0), (Axis::Z, 1.0), (Axis::X, 1.0)),
    swizzle((Axis::X, -1.0), (Axis::Z, 1.0), (Axis::Y, 1.0)),
    swizzle((Axis::Y, 1.0), (Axis::X, -1.0), (Axis::Z, 1.0)),
    swizzle((Axis::Y, -1.0), (Axis::Z, 1.0), (Axis::X, -1.0)),
    swizzle((Axis::X, 1.0), (Axis::Z, 1.0), (Axis::Y, -1.0)),
    swizzle((Axis::Y, 1.0), (Axis::X, 1.0), (Axis::Z, -1.0)),
];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Top,
        Face::Back,
        Face::Left,
        Face::Bottom,
        Face::Front,
    ];

    fn swizzle(self) -> &'static Swizzle {
        &SWIZZLES[self as usize]
    }

    /// Outward unit normal.
    pub fn normal(self) -> DVec3 {
        let (axis, sign) = self.swizzle().depth;
        let mut n = DVec3::ZERO;
        n[axis as usize] = sign;
        n
    }

    /// Debug colour of the face.
    pub fn color(self) -> Color {
        match self {
            Face::Back => Color::WHITE,
            Face::Right => Color::rgb(1.0, 0.0, 1.0),
            Face::Left => Color::rgb(0.0, 1.0, 0.0),
            Face::Top => Color::rgb(0.0, 0.0, 1.0),
            Face::Bottom => Color::rgb(1.0, 0.0, 0.0),
            Face::Front => Color::rgb(0.0, 1.0, 1.0),
        }
    }

    /// Project `p` onto this face's plane through the cube's center.
    ///
    /// Divides the two in-plane components by the magnitude of the depth component. Points
    /// inside the face's frustum land in `[0, 1]`, others land outside it. The result is not
    /// clamped. Returns `None` if the depth component is zero or anything is non-finite.
    pub fn project(self, p: DVec3) -> Option<DVec2> {
        let s = self.swizzle();
        let d = p[s.depth.0 as usize].abs();

        if d == 0f64 || !d.is_finite() {
            return None;
        }

        let a = s.u.1 * p[s.u.0 as usize];
        let b = s.v.1 * p[s.v.0 as usize];

        let uv = (DVec2::new(a, b) / d + 1f64) * 0.5;

        uv.is_finite().then_some(uv)
    }

    /// Inverse of [`Face::project`] onto the surface of the cube `[-1, 1]^3`.
    pub fn cube_point(self, uv: DVec2) -> DVec3 {
        let s = self.swizzle();
        let st = uv * 2f64 - 1f64;

        let mut p = DVec3::ZERO;
        p[s.depth.0 as usize] = s.depth.1;
        p[s.u.0 as usize] = s.u.1 * st.x;
        p[s.v.0 as usize] = s.v.1 * st.y;
        p
    }

    /// [`Face::cube_point`] pushed out onto the sphere of the given radius.
    pub fn sphere_point(self, uv: DVec2, radius: f64) -> DVec3 {
        self.cube_point(uv).normalize() * radius
    }

    /// Whether `dir` points into this face's half of space.
    pub fn facing(self, dir: DVec3) -> bool {
        let (axis, sign) = self.swizzle().depth;

        dir[axis as usize] * sign > 0f64
    }

    /// The face a direction from the cube's center exits through. Ties are broken x before y
    /// before z. `None` for a zero or non-finite direction.
    pub fn dominant(dir: DVec3) -> Option<Face> {
        if !dir.is_finite() || dir == DVec3::ZERO {
            return None;
        }

        let a = dir.abs();

        let face = if a.x >= a.y && a.x >= a.z {
            if dir.x > 0f64 { Face::Right } else { Face::Left }
        } else if a.y >= a.z {
            if dir.y > 0f64 { Face::Top } else { Face::Bottom }
        } else if dir.z > 0f64 {
            Face::Back
        } else {
            Face::Front
        };

        Some(face)
    }
}

#[cfg(test)]
mod test {
    use glam::DVec2;
    use glam::DVec3;

    use super::Face;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-12
    }

    #[test]
    fn face_center_projects_to_middle() {
        for face in Face::ALL {
            let uv = face.project(face.normal()).unwrap();

            assert_eq!(uv, DVec2::new(0.5, 0.5), "face {face:?}");
        }
    }

    #[test]
    fn scaled_points_project_the_same() {
        for face in Face::ALL {
            let p = face.cube_point(DVec2::new(0.2, 0.7));

            assert!(close(face.project(p * 5.0).unwrap(), DVec2::new(0.2, 0.7)));
        }
    }

    #[test]
    fn cube_point_round_trip() {
        let uvs = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.25, 0.75),
            DVec2::new(0.9, 0.1),
            DVec2::new(1.0, 1.0),
        ];

        for face in Face::ALL {
            for uv in uvs {
                let p = face.cube_point(uv);

                assert!(close(face.project(p).unwrap(), uv), "face {face:?} uv {uv}");
                assert_eq!(Face::dominant(face.normal()), Some(face));
            }
        }
    }

    #[test]
    fn right_face_matches_swizzle() {
        // u = y / |x|, v = z / |x|
        let uv = Face::Right.project(DVec3::new(2.0, 1.0, -1.0)).unwrap();

        assert_eq!(uv, DVec2::new(0.75, 0.25));
    }

    #[test]
    fn back_face_flips_x() {
        // u = y / |z|, v = -x / |z|
        let uv = Face::Back.project(DVec3::new(1.0, 0.0, 2.0)).unwrap();

        assert_eq!(uv, DVec2::new(0.5, 0.25));
    }

    #[test]
    fn parallel_direction_has_no_projection() {
        assert_eq!(Face::Right.project(DVec3::new(0.0, 1.0, 1.0)), None);
        assert_eq!(Face::Top.project(DVec3::new(1.0, f64::NAN, 0.0)), None);
    }

    #[test]
    fn faces_are_distinct() {
        let p = DVec3::new(0.3, -0.4, 0.5);
        let mut seen = Vec::new();

        for face in Face::ALL {
            let n = face.normal();
            assert!(!seen.contains(&n));
            seen.push(n);

            assert_eq!(face.facing(p), n.dot(p) > 0.0);
        }
    }

    #[test]
    fn dominant_breaks_ties_towards_x() {
        assert_eq!(Face::dominant(DVec3::new(1.0, 1.0, 1.0)), Some(Face::Right));
        assert_eq!(Face::dominant(DVec3::new(0.0, -1.0, 1.0)), Some(Face::Bottom));
        assert_eq!(Face::dominant(DVec3::new(0.0, 0.0, -0.1)), Some(Face::Front));
        assert_eq!(Face::dominant(DVec3::ZERO), None);
    }

    #[test]
    fn sphere_point_has_radius() {
        for face in Face::ALL {
            let p = face.sphere_point(DVec2::new(0.1, 0.8), 3.0);

            assert!((p.length() - 3.0).abs() < 1e-12);
        }
    }
}
