//! Backend abstraction traits for the rendering system
//!
//! This module defines the traits that graphics backends must implement to
//! provide a consistent interface for the sprite batcher. Each trait is
//! intentionally narrow: the batcher only ever binds, unbinds, uploads and
//! draws, so backends stay easy to implement and easy to fake in tests.

mod device;
mod layout;
mod resources;

pub use device::{BufferUsage, GraphicsDevice, TextureId};
pub use layout::{VertexAttribute, VertexLayout};
pub use resources::{GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer, ShaderProgram};
