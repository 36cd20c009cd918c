//! Vertex attribute layout description
//!
//! Describes how interleaved vertex data is split into per-vertex attribute
//! groups. Backends translate this into their native vertex input state when
//! a buffer is attached to a vertex array.

/// One attribute group within an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Number of `f32` components in this attribute
    pub components: u32,

    /// Byte offset of this attribute from the start of the vertex
    pub offset: u32,
}

/// Ordered sequence of float attribute groups with a computed stride
///
/// Attributes are appended in shader-location order; the stride grows with
/// each push so the layout always describes a tightly packed vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Size of one `f32` component in bytes
    const COMPONENT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

    /// Create an empty layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute group of `components` floats
    pub fn push_f32(&mut self, components: u32) {
        self.attributes.push(VertexAttribute {
            components,
            offset: self.stride,
        });
        self.stride += components * Self::COMPONENT_SIZE;
    }

    /// Byte distance between consecutive vertices
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// The attribute groups in shader-location order
    #[must_use]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_accumulates_in_push_order() {
        let mut layout = VertexLayout::new();
        layout.push_f32(2);
        layout.push_f32(3);
        layout.push_f32(2);
        layout.push_f32(1);

        assert_eq!(layout.stride(), 32);

        let offsets: Vec<u32> = layout.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 20, 28]);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = VertexLayout::new();
        assert_eq!(layout.stride(), 0);
        assert!(layout.attributes().is_empty());
    }
}
