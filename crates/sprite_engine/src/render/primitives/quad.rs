//! Quad expansion constants and index precomputation
//!
//! Every sprite is an axis-aligned rectangle expanded to 4 vertices and 6
//! triangle indices. Because all quads share the same triangulation, the
//! index stream can be computed once for the maximum quad count and uploaded
//! to the GPU a single time.

/// Vertices one quad expands to
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices one quad contributes (two triangles, fan order 0-1-2, 2-3-0)
pub const INDICES_PER_QUAD: usize = 6;

/// Texture coordinates of the four quad corners, in emission order:
/// bottom-left, bottom-right, top-right, top-left
pub const QUAD_TEX_COORDS: [[f32; 2]; VERTICES_PER_QUAD] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Build the repeating index pattern for `quad_count` quads
///
/// Each quad contributes `0,1,2, 2,3,0` shifted by a running offset of 4.
/// The result never changes after initialization since every quad uses the
/// same triangulation.
#[must_use]
pub fn quad_index_pattern(quad_count: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(quad_count * INDICES_PER_QUAD);
    let mut offset = 0u32;
    for _ in 0..quad_count {
        indices.push(offset);
        indices.push(offset + 1);
        indices.push(offset + 2);

        indices.push(offset + 2);
        indices.push(offset + 3);
        indices.push(offset);

        offset += VERTICES_PER_QUAD as u32;
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_length_is_six_per_quad() {
        assert_eq!(quad_index_pattern(0).len(), 0);
        assert_eq!(quad_index_pattern(1).len(), 6);
        assert_eq!(quad_index_pattern(1000).len(), 6000);
    }

    #[test]
    fn first_two_quads_triangulate_in_fan_order() {
        let indices = quad_index_pattern(2);
        assert_eq!(&indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&indices[6..], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn pattern_references_exactly_four_vertices_per_quad() {
        let indices = quad_index_pattern(50);
        let max = indices.iter().max().copied().unwrap();
        assert_eq!(max, 50 * 4 - 1);
    }
}
