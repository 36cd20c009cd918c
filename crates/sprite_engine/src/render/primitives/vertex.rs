//! Vertex data for sprite rendering

use crate::render::api::VertexLayout;

/// Vertex data structure for 2D sprite rendering
///
/// Represents a single vertex with position, color, texture coordinates, and
/// the texture slot it samples from. The slot index is stored as a float so
/// the whole vertex stays a homogeneous float stream, but it is semantically
/// an integer in `0..32`.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute ensures a consistent, tightly packed layout
/// (32 bytes, no padding), which is essential for GPU buffer uploads. The
/// `bytemuck` derives let the staging buffer be reinterpreted as raw bytes
/// without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 2],

    /// Vertex color (RGB, 0-1 range)
    pub color: [f32; 3],

    /// Texture coordinates (0-1 range)
    pub tex_coords: [f32; 2],

    /// Texture slot index this vertex samples from
    pub tex_index: f32,
}

impl Vertex {
    /// The attribute layout of this vertex type: `(2, 3, 2, 1)` float groups
    #[must_use]
    pub fn layout() -> VertexLayout {
        let mut layout = VertexLayout::new();
        layout.push_f32(2);
        layout.push_f32(3);
        layout.push_f32(2);
        layout.push_f32(1);
        layout
    }
}
