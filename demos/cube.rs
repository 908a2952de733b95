use facetree::camera::Camera;
use facetree::camera::Viewport;
use facetree::config::LodConfig;
use facetree::cube::CubeSphere;
use facetree::visit::LeafRenderer;
use glam::DVec3;

/// Print one frame of the unfolded cube for a focus direction given as `x y z`.
fn main() -> anyhow::Result<()> {
    let args: Vec<f64> = std::env::args()
        .skip(1)
        .map(|a| a.parse::<f64>())
        .collect::<Result<_, _>>()?;

    let focus = match args[..] {
        [x, y, z] => DVec3::new(x, y, z),
        _ => DVec3::new(1.0, 0.6, 0.1),
    };

    let config: LodConfig = "depth=6,k=1.5".parse()?;
    let sphere = CubeSphere::build(&config, focus)?;

    let tile = 40;
    let mut cam = Camera::new(4 * tile, 3 * tile);

    let mut leaves = LeafRenderer::new(&mut cam).wireframe(true);

    sphere.visit(&mut leaves, |r, face, tree| {
        r.renderer
            .set_viewport(Viewport::cube_cross(face, tree.bounds(), tile as i64));
    });

    println!("{}", cam.render());
    println!("{} leaves", sphere.leaf_count());

    Ok(())
}
