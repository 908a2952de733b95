use std::fmt::Write;

use facetree::color::Color;
use facetree::config::LodConfig;
use facetree::cube::CubeSphere;
use facetree::face::Face;
use facetree::quadtree::Point;
use facetree::quadtree::QuadTree;
use facetree::visit::LeafCollector;
use glam::DVec3;

fn listing(tree: &QuadTree) -> anyhow::Result<String> {
    let mut collector = LeafCollector::new();
    tree.visit(&mut collector);

    let mut out = String::new();
    for leaf in collector.leaves() {
        writeln!(
            out,
            "{:.3} {:.3} {:.3} d{}",
            leaf.center.x, leaf.center.y, leaf.size, leaf.depth
        )?;
    }

    Ok(out.trim_end().to_string())
}

#[test]
fn off_center_focus_leaf_order() -> anyhow::Result<()> {
    let mut qt = QuadTree::new(3, 2.0, Point::new(0.0, 0.0), Color::YELLOW)?;
    qt.split(Point::new(0.9, 0.9), 1.0)?;

    insta::assert_snapshot!(listing(&qt)?, @r"
    -0.500 0.500 1.000 d1
    0.250 0.750 0.500 d2
    0.625 0.875 0.250 d3
    0.875 0.875 0.250 d3
    0.625 0.625 0.250 d3
    0.875 0.625 0.250 d3
    0.250 0.250 0.500 d2
    0.750 0.250 0.500 d2
    -0.500 -0.500 1.000 d1
    0.500 -0.500 1.000 d1
    ");

    Ok(())
}

#[test]
fn centered_focus_depth_two_is_a_full_grid() -> anyhow::Result<()> {
    let mut qt = QuadTree::new(2, 2.0, Point::new(0.0, 0.0), Color::YELLOW)?;
    qt.split(Point::new(0.0, 0.0), 1.5)?;

    let mut collector = LeafCollector::new();
    qt.visit(&mut collector);

    assert_eq!(collector.leaves().len(), 16);
    assert!(collector.leaves().iter().all(|l| l.size == 0.5));

    Ok(())
}

#[test]
fn zero_depth_is_the_root_region() -> anyhow::Result<()> {
    let mut qt = QuadTree::new(0, 3.0, Point::new(1.0, 2.0), Color::YELLOW)?;
    qt.split(Point::new(1.0, 2.0), 3.0)?;

    insta::assert_snapshot!(listing(&qt)?, @"1.000 2.000 3.000 d0");

    Ok(())
}

#[test]
fn config_string_drives_a_build() -> anyhow::Result<()> {
    let config: LodConfig = "depth=3,size=2,k=1,origin=0:0".parse()?;
    let mut qt = QuadTree::from_config(&config)?;
    qt.split(Point::new(0.9, 0.9), config.split_factor)?;

    assert_eq!(qt.leaf_count(), 10);

    Ok(())
}

#[test]
fn cube_sphere_refines_around_the_focus() -> anyhow::Result<()> {
    let config: LodConfig = "depth=6,k=1.5".parse()?;

    // close to the middle of the right face, leaning towards the top
    let focus = DVec3::new(1.0, 0.6, 0.1);
    let sphere = CubeSphere::build(&config, focus)?;

    let right = sphere.tree(Face::Right);
    assert_eq!(right.depth_reached(), 6);

    // facing away
    assert_eq!(sphere.tree(Face::Left).leaf_count(), 1);
    assert_eq!(sphere.tree(Face::Bottom).leaf_count(), 1);

    // the top face sees the focus past its edge and refines less than the right face
    assert!(sphere.tree(Face::Top).leaf_count() < right.leaf_count());

    Ok(())
}
