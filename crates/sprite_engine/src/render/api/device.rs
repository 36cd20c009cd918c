//! Graphics device abstraction
//!
//! The [`GraphicsDevice`] trait is the factory and draw-submission seam
//! between the sprite batcher and a concrete graphics API. The batcher owns
//! its device exclusively for its whole lifetime and mutates GPU state only
//! through it.

use super::{GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer};
use crate::render::RenderResult;

/// Handle to a texture resource stored in the backend
///
/// Textures are created and destroyed by the backend; the batcher treats the
/// handle as an opaque identity and never inspects pixel data beyond the
/// placeholder it creates at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Expected update frequency for a GPU buffer
///
/// Maps onto the usage hints of the underlying graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Contents set once and drawn many times
    Static,
    /// Contents respecified repeatedly and drawn many times
    Dynamic,
}

/// Main graphics device trait
///
/// Creates the GPU collaborators the batcher renders through and carries the
/// two operations that act on global device state: texture unit binding and
/// indexed draw submission.
pub trait GraphicsDevice {
    /// Create a vertex array object
    fn create_vertex_array(&mut self) -> RenderResult<Box<dyn GpuVertexArray>>;

    /// Create a vertex buffer of `byte_size` bytes with uninitialized contents
    fn create_vertex_buffer(
        &mut self,
        byte_size: usize,
        usage: BufferUsage,
    ) -> RenderResult<Box<dyn GpuVertexBuffer>>;

    /// Create an index buffer pre-filled with `indices`
    fn create_index_buffer(&mut self, indices: &[u32]) -> RenderResult<Box<dyn GpuIndexBuffer>>;

    /// Create a 2D RGBA8 texture from raw pixel data
    ///
    /// `pixels` must hold `width * height * 4` bytes in row-major order.
    fn create_texture_rgba8(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> RenderResult<TextureId>;

    /// Destroy a texture previously created by this device
    fn destroy_texture(&mut self, texture: TextureId);

    /// Bind a texture to a texture unit for subsequent draws
    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId);

    /// Issue one indexed draw covering `index_count` indices
    ///
    /// Reads from the currently bound vertex array and index buffer.
    fn draw_indexed(&mut self, index_count: u32) -> RenderResult<()>;
}
