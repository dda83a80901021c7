//! WebGPU rendering module
//!
//! Draws flat-coloured triangles built from a [`crate::sim::Snapshot`].

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
