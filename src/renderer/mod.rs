//! Rendering
//!
//! `shapes` turns a session snapshot into triangles (pure, testable
//! without a GPU); `pipeline` pushes them through WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
