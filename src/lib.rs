pub mod camera;
pub mod color;
pub mod config;
pub mod cube;
pub mod face;
pub mod quadtree;
pub mod visit;

pub type ScreenSize = u16;
