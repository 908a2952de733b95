use glam::DVec3;
use tracing::trace;

use crate::config::ConfigError;
use crate::config::LodConfig;
use crate::face::Face;
use crate::quadtree::Point;
use crate::quadtree::QuadTree;
use crate::visit::LeafCollector;
use crate::visit::LeafDescriptor;
use crate::visit::TreeVisitor;

/// One face of the sphere and its tree.
#[derive(Debug, Clone)]
pub struct FaceTree {
    pub face: Face,
    pub tree: QuadTree,
}

/// Six independent face trees built around a single focus direction.
#[derive(Debug, Clone)]
pub struct CubeSphere {
    /// In [`Face::ALL`] order
    faces: Vec<FaceTree>,
}

impl CubeSphere {
    /// Build and split a fresh tree for every face. `focus` is a direction (or point) relative to
    /// the sphere's center, it need not be normalized.
    pub fn build(config: &LodConfig, focus: DVec3) -> Result<Self, ConfigError> {
        config.validate()?;

        let faces = Face::ALL
            .into_iter()
            .map(|face| {
                let mut tree = QuadTree::from_config(config)?;
                let p = Self::face_focus(face, &tree, focus);

                tree.split(p, config.split_factor)?;

                trace!(?face, ?p, leaves = tree.leaf_count(), "face built");

                Ok(FaceTree { face, tree })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { faces })
    }

    /// Where `focus` lands in `tree`'s local space on `face`. Faces turned away from the focus
    /// get a point at infinity, which never triggers a split.
    pub fn face_focus(face: Face, tree: &QuadTree, focus: DVec3) -> Point {
        let far = Point::new(f64::INFINITY, f64::INFINITY);

        if !face.facing(focus) {
            return far;
        }

        face.project(focus)
            .map(|uv| tree.focus_from_face(uv))
            .unwrap_or(far)
    }

    pub fn faces(&self) -> &[FaceTree] {
        &self.faces
    }

    pub fn tree(&self, face: Face) -> &QuadTree {
        &self.faces[face as usize].tree
    }

    pub fn leaf_count(&self) -> usize {
        self.faces.iter().map(|f| f.tree.leaf_count()).sum()
    }

    /// Traverse every face tree with `visitor`, faces in [`Face::ALL`] order. `enter_face` runs
    /// before each face's traversal so the visitor can retarget itself, e.g. onto that face's
    /// viewport.
    pub fn visit<V, F>(&self, visitor: &mut V, mut enter_face: F)
    where
        V: TreeVisitor + ?Sized,
        F: FnMut(&mut V, Face, &QuadTree),
    {
        for f in &self.faces {
            enter_face(visitor, f.face, &f.tree);
            f.tree.visit(visitor);
        }
    }

    /// Leaves of every face, faces in [`Face::ALL`] order and leaves in traversal order.
    pub fn collect_leaves(&self) -> Vec<(Face, Vec<LeafDescriptor>)> {
        self.faces
            .iter()
            .map(|f| {
                let mut collector = LeafCollector::new();
                f.tree.visit(&mut collector);

                (f.face, collector.into_leaves())
            })
            .collect()
    }
}
