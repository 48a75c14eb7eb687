//! WebGPU rendering module
//!
//! Flat-colored triangle lists: wheel slices, rim, hub and pin.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};
