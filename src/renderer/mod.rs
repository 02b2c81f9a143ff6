//! WebGPU rendering module
//!
//! Builds a flat triangle list from the round each frame and draws it with a
//! single pass-through pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use vertex::Vertex;
