//! # Sprite Batcher
//!
//! This module provides the sprite batching core: it accumulates colored and
//! textured quads into a single growable vertex stream and flushes them to
//! the graphics backend as indexed draws, only when a capacity limit is
//! reached or the frame ends.
//!
//! ## Architecture
//!
//! - **SpriteBatch**: Owns the CPU staging buffer, the texture slot table,
//!   and the GPU collaborators it renders through
//! - **TextureSlots**: Fixed-capacity per-pass mapping from texture handles
//!   to small slot indices
//! - **BatchStats**: Draw and quad counters for frame instrumentation
//!
//! ## Pass Lifecycle
//!
//! One pass per frame: `begin` clears the staging buffer, quad submissions
//! fill it, `end` uploads the populated portion to the GPU, `flush` binds the
//! occupied texture slots and issues one indexed draw. Submissions that would
//! overflow the vertex, index, or texture-slot capacity flush the pass
//! mid-stream and keep going; no submission is ever dropped.

mod slots;

use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::render::api::{
    BufferUsage, GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer, GraphicsDevice, ShaderProgram,
    TextureId,
};
use crate::render::primitives::{
    quad_index_pattern, Vertex, INDICES_PER_QUAD, QUAD_TEX_COORDS, VERTICES_PER_QUAD,
};
use crate::render::RenderResult;
use slots::{TextureSlots, PLACEHOLDER_SLOT};

/// Maximum quads a single batch holds before it must flush
pub const MAX_QUAD_COUNT: usize = 1000;

/// Maximum vertices the staging buffer holds
pub const MAX_VERTEX_COUNT: usize = MAX_QUAD_COUNT * VERTICES_PER_QUAD;

/// Maximum pending indices a single draw covers
pub const MAX_INDEX_COUNT: usize = MAX_QUAD_COUNT * INDICES_PER_QUAD;

/// Number of texture slots available per draw, including the placeholder
pub const MAX_TEXTURE_SLOTS: usize = 32;

/// Pixel data of the 1x1 opaque white placeholder texture
const WHITE_PIXEL: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Vertex color written for textured quads; the texture supplies the color
const TEXTURED_QUAD_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Statistics for batch rendering performance monitoring
///
/// Accumulated across a frame until explicitly reset. Observational only;
/// the counters never feed back into batching decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Number of indexed draw calls issued
    pub draw_count: u32,

    /// Number of quads submitted
    pub quad_count: u32,
}

/// Batches 2D quads into a minimal number of indexed draw calls
///
/// The batch exclusively owns its GPU collaborators: the device it draws
/// through, the vertex buffer and array, the pre-filled index buffer, the
/// shader program, and the placeholder texture. All of them are released
/// when the batch drops.
///
/// # Capacity and Overflow
///
/// A batch holds up to [`MAX_QUAD_COUNT`] quads and [`MAX_TEXTURE_SLOTS`]
/// distinct textures (slot 0 is reserved for the placeholder). A submission
/// that would exceed either limit first flushes the pending batch, then
/// appends to the freshly emptied buffer, so overflow is never an error.
///
/// # Thread Safety
///
/// Single-threaded by design. One batch instance is mutated only by the
/// thread driving the render pass; external synchronization is the caller's
/// responsibility if submissions could originate elsewhere.
pub struct SpriteBatch {
    device: Box<dyn GraphicsDevice>,
    shader: Box<dyn ShaderProgram>,

    vertex_array: Box<dyn GpuVertexArray>,
    vertex_buffer: Box<dyn GpuVertexBuffer>,
    index_buffer: Box<dyn GpuIndexBuffer>,
    white_texture: TextureId,

    /// CPU staging buffer; capacity reserved once, never re-reserved
    staging: Vec<Vertex>,
    slots: TextureSlots,
    index_count: u32,
    stats: BatchStats,
}

impl SpriteBatch {
    /// Create a sprite batch and its GPU resources
    ///
    /// Reserves the staging buffer, creates the GPU vertex buffer sized for
    /// [`MAX_VERTEX_COUNT`] vertices, attaches it to a vertex array under the
    /// `(2, 3, 2, 1)` float layout, uploads the fixed quad triangulation into
    /// the index buffer, and installs the 1x1 opaque white placeholder
    /// texture in slot 0.
    ///
    /// # Errors
    /// Propagates any collaborator failure; no partially initialized batch is
    /// ever returned.
    pub fn new(
        mut device: Box<dyn GraphicsDevice>,
        shader: Box<dyn ShaderProgram>,
    ) -> RenderResult<Self> {
        log::info!(
            "Creating sprite batch: {} quads, {} texture slots",
            MAX_QUAD_COUNT,
            MAX_TEXTURE_SLOTS
        );

        let staging = Vec::with_capacity(MAX_VERTEX_COUNT);

        let mut vertex_array = device.create_vertex_array()?;
        let mut vertex_buffer = device.create_vertex_buffer(
            MAX_VERTEX_COUNT * std::mem::size_of::<Vertex>(),
            BufferUsage::Dynamic,
        )?;
        vertex_array.attach_buffer(vertex_buffer.as_mut(), &Vertex::layout())?;

        let indices = quad_index_pattern(MAX_QUAD_COUNT);
        let mut index_buffer = device.create_index_buffer(&indices)?;

        let white_texture = device.create_texture_rgba8(1, 1, &WHITE_PIXEL)?;

        vertex_buffer.unbind();
        index_buffer.unbind();

        Ok(Self {
            device,
            shader,
            vertex_array,
            vertex_buffer,
            index_buffer,
            white_texture,
            staging,
            slots: TextureSlots::new(white_texture),
            index_count: 0,
            stats: BatchStats::default(),
        })
    }

    /// Upload a projection matrix to the shader's `projection` uniform
    ///
    /// Binds the shader first; it stays bound for the draws that follow.
    ///
    /// # Errors
    /// Fails if the shader rejects the uniform upload.
    pub fn set_projection(&mut self, projection: &Mat4) -> RenderResult<()> {
        self.shader.bind();
        self.shader.set_uniform_mat4("projection", projection)
    }

    /// Start a batching pass
    ///
    /// Resets statistics and clears the staging buffer. The buffer's capacity
    /// is retained.
    pub fn begin(&mut self) {
        self.reset_stats();
        self.staging.clear();
    }

    /// Upload the populated portion of the staging buffer to the GPU
    ///
    /// Only `vertex_count() * size_of::<Vertex>()` bytes are written, at
    /// offset 0. Must be called before [`flush`](Self::flush) so the GPU
    /// reads current data; the ordering is not enforced here.
    ///
    /// # Errors
    /// Fails if the vertex buffer rejects the upload.
    pub fn end(&mut self) -> RenderResult<()> {
        let bytes: &[u8] = bytemuck::cast_slice(&self.staging);
        self.vertex_buffer.bind();
        self.vertex_buffer.write_sub_region(0, bytes)?;
        self.vertex_buffer.unbind();
        Ok(())
    }

    /// Issue one indexed draw for the pending geometry
    ///
    /// Binds each occupied texture slot to its texture unit, draws the
    /// pending index count, then resets the pending count and the dynamic
    /// texture slots. The placeholder in slot 0 persists across flushes.
    ///
    /// # Errors
    /// Fails if the device rejects the draw submission.
    pub fn flush(&mut self) -> RenderResult<()> {
        for unit in 0..self.slots.occupied_count() {
            if let Some(texture) = self.slots.get(unit) {
                self.device.bind_texture_unit(unit as u32, texture);
            }
        }

        debug_assert!(self.index_count <= self.index_buffer.element_count());
        self.vertex_array.bind();
        self.index_buffer.bind();
        self.device.draw_indexed(self.index_count)?;
        self.stats.draw_count += 1;
        self.index_buffer.unbind();
        self.vertex_array.unbind();
        self.shader.unbind();

        self.index_count = 0;
        self.slots.reset();
        Ok(())
    }

    /// Submit a solid-colored quad
    ///
    /// `position` is the bottom-left anchor; `size` extends right/up.
    /// Negative sizes are accepted and produce a mirrored rectangle. The quad
    /// samples the placeholder texture in slot 0.
    ///
    /// # Errors
    /// Fails only if an overflow-triggered flush fails.
    pub fn draw_quad(&mut self, position: Vec2, size: Vec2, color: Vec3) -> RenderResult<()> {
        if self.index_count as usize >= MAX_INDEX_COUNT || self.staging.len() >= MAX_VERTEX_COUNT {
            self.next_batch()?;
        }

        self.push_quad(position, size, [color.x, color.y, color.z], PLACEHOLDER_SLOT);
        Ok(())
    }

    /// Submit a textured quad
    ///
    /// The handle is resolved to a texture slot, deduplicating repeated use
    /// of the same texture within a pass. Vertex color is forced to opaque
    /// white; the texture supplies color at sampling time.
    ///
    /// # Errors
    /// Fails only if an overflow-triggered flush fails.
    pub fn draw_textured_quad(
        &mut self,
        position: Vec2,
        size: Vec2,
        texture: TextureId,
    ) -> RenderResult<()> {
        if self.index_count as usize >= MAX_INDEX_COUNT || self.slots.is_full() {
            self.next_batch()?;
        }

        let slot = self.slots.resolve(texture);
        self.push_quad(position, size, TEXTURED_QUAD_COLOR, slot);
        Ok(())
    }

    /// Accumulated statistics since the last reset
    #[must_use]
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Zero both counters, independent of pass state
    pub fn reset_stats(&mut self) {
        self.stats = BatchStats::default();
    }

    /// Number of vertices currently staged
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.staging.len()
    }

    /// Number of indices the next flush would draw
    #[must_use]
    pub fn pending_index_count(&self) -> u32 {
        self.index_count
    }

    /// Number of occupied texture slots, including the placeholder
    #[must_use]
    pub fn texture_slot_count(&self) -> usize {
        self.slots.occupied_count()
    }

    /// Flush the pending batch mid-pass and restart with an empty buffer
    ///
    /// Runs end, flush, and the buffer clear of begin as one transaction.
    /// Statistics are NOT reset: they keep accumulating across overflow
    /// flushes until the caller resets them.
    fn next_batch(&mut self) -> RenderResult<()> {
        log::trace!(
            "Batch capacity reached ({} indices, {} slots), flushing mid-pass",
            self.index_count,
            self.slots.occupied_count()
        );
        self.end()?;
        self.flush()?;
        self.staging.clear();
        Ok(())
    }

    /// Expand one quad to four vertices and account for its indices
    fn push_quad(&mut self, position: Vec2, size: Vec2, color: [f32; 3], slot: u32) {
        let tex_index = slot as f32;
        let corners = [
            [position.x, position.y],
            [position.x + size.x, position.y],
            [position.x + size.x, position.y + size.y],
            [position.x, position.y + size.y],
        ];

        for (corner, tex_coords) in corners.into_iter().zip(QUAD_TEX_COORDS) {
            self.staging.push(Vertex {
                position: corner,
                color,
                tex_coords,
                tex_index,
            });
        }

        self.index_count += INDICES_PER_QUAD as u32;
        self.stats.quad_count += 1;
    }
}

impl Drop for SpriteBatch {
    fn drop(&mut self) {
        log::debug!("Releasing sprite batch GPU resources");
        self.device.destroy_texture(self.white_texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::headless::{CallJournal, DeviceCall, HeadlessDevice};

    fn new_batch() -> (SpriteBatch, CallJournal) {
        let device = HeadlessDevice::new();
        let journal = device.journal();
        let shader = device.create_shader_program().unwrap();
        let batch = SpriteBatch::new(Box::new(device), shader).unwrap();
        (batch, journal)
    }

    fn red() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    #[test]
    fn quads_accumulate_without_flushing_below_capacity() {
        let (mut batch, journal) = new_batch();
        batch.begin();

        for i in 0..MAX_QUAD_COUNT {
            batch
                .draw_quad(Vec2::new(i as f32, 0.0), Vec2::new(1.0, 1.0), red())
                .unwrap();
        }

        assert_eq!(batch.vertex_count(), MAX_VERTEX_COUNT);
        assert_eq!(batch.pending_index_count(), MAX_INDEX_COUNT as u32);
        assert!(journal.draw_calls().is_empty());
    }

    #[test]
    fn overflowing_quad_flushes_once_then_appends() {
        let (mut batch, journal) = new_batch();
        batch.begin();

        for _ in 0..=MAX_QUAD_COUNT {
            batch
                .draw_quad(Vec2::zeros(), Vec2::new(4.0, 4.0), red())
                .unwrap();
        }

        let draws = journal.draw_calls();
        assert_eq!(draws, vec![MAX_INDEX_COUNT as u32]);
        assert_eq!(batch.vertex_count(), VERTICES_PER_QUAD);
        assert_eq!(batch.pending_index_count(), INDICES_PER_QUAD as u32);
    }

    #[test]
    fn overflow_uploads_the_full_staging_buffer_before_drawing() {
        let (mut batch, journal) = new_batch();
        batch.begin();

        for _ in 0..=MAX_QUAD_COUNT {
            batch
                .draw_quad(Vec2::zeros(), Vec2::new(4.0, 4.0), red())
                .unwrap();
        }

        let uploads = journal.vertex_uploads();
        assert_eq!(
            uploads,
            vec![(0, MAX_VERTEX_COUNT * std::mem::size_of::<Vertex>())]
        );
    }

    #[test]
    fn repeated_texture_handles_share_one_slot() {
        let (mut batch, _journal) = new_batch();
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), texture)
            .unwrap();
        batch
            .draw_textured_quad(Vec2::new(8.0, 0.0), Vec2::new(8.0, 8.0), texture)
            .unwrap();

        assert_eq!(batch.texture_slot_count(), 2);
        let slot_indices: Vec<f32> = batch.staging.iter().map(|v| v.tex_index).collect();
        assert!(slot_indices.iter().all(|&s| (s - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn first_unseen_handle_advances_the_slot_counter_by_one() {
        let (mut batch, _journal) = new_batch();
        let first = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        let second = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), first)
            .unwrap();
        assert_eq!(batch.texture_slot_count(), 2);

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), second)
            .unwrap();
        assert_eq!(batch.texture_slot_count(), 3);
    }

    #[test]
    fn vertices_carry_the_slot_index_not_the_raw_handle() {
        let (mut batch, _journal) = new_batch();
        // Burn a few handles so the texture id diverges from its slot index.
        for _ in 0..5 {
            batch.device.create_texture_rgba8(1, 1, &[0u8; 4]).unwrap();
        }
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        assert!(texture.0 > 1);
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), texture)
            .unwrap();

        for vertex in &batch.staging {
            assert!((vertex.tex_index - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn slot_exhaustion_flushes_then_reassigns_from_slot_one() {
        let (mut batch, journal) = new_batch();
        let textures: Vec<TextureId> = (0..32)
            .map(|_| batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap())
            .collect();
        batch.begin();

        for texture in &textures[..31] {
            batch
                .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), *texture)
                .unwrap();
        }
        assert_eq!(batch.texture_slot_count(), MAX_TEXTURE_SLOTS);
        assert!(journal.draw_calls().is_empty());

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), textures[31])
            .unwrap();

        assert_eq!(journal.draw_calls().len(), 1);
        assert_eq!(batch.texture_slot_count(), 2);
        assert!((batch.staging[0].tex_index - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn stats_accumulate_across_internal_flushes() {
        let (mut batch, _journal) = new_batch();
        batch.begin();

        for _ in 0..=MAX_QUAD_COUNT {
            batch
                .draw_quad(Vec2::zeros(), Vec2::new(1.0, 1.0), red())
                .unwrap();
        }
        batch.end().unwrap();
        batch.flush().unwrap();

        let stats = batch.stats();
        assert_eq!(stats.draw_count, 2);
        assert_eq!(stats.quad_count, MAX_QUAD_COUNT as u32 + 1);
    }

    #[test]
    fn texture_corners_are_the_unit_square_in_submission_order() {
        let (mut batch, _journal) = new_batch();
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_quad(Vec2::new(-3.0, 7.0), Vec2::new(10.0, -2.0), red())
            .unwrap();
        batch
            .draw_textured_quad(Vec2::new(100.0, 100.0), Vec2::new(5.0, 5.0), texture)
            .unwrap();

        for quad in batch.staging.chunks_exact(VERTICES_PER_QUAD) {
            let corners: Vec<[f32; 2]> = quad.iter().map(|v| v.tex_coords).collect();
            assert_eq!(corners, QUAD_TEX_COORDS.to_vec());
        }
    }

    #[test]
    fn zero_size_quads_are_accepted() {
        let (mut batch, _journal) = new_batch();
        batch.begin();

        batch
            .draw_quad(Vec2::new(5.0, 5.0), Vec2::zeros(), red())
            .unwrap();

        assert_eq!(batch.vertex_count(), VERTICES_PER_QUAD);
        for vertex in &batch.staging {
            assert_eq!(vertex.position, [5.0, 5.0]);
        }
    }

    #[test]
    fn negative_sizes_produce_a_mirrored_quad() {
        let (mut batch, _journal) = new_batch();
        batch.begin();

        batch
            .draw_quad(Vec2::new(10.0, 10.0), Vec2::new(-4.0, -2.0), red())
            .unwrap();

        let positions: Vec<[f32; 2]> = batch.staging.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[10.0, 10.0], [6.0, 10.0], [6.0, 8.0], [10.0, 8.0]]
        );
    }

    #[test]
    fn textured_quads_are_forced_to_white() {
        let (mut batch, _journal) = new_batch();
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), texture)
            .unwrap();

        for vertex in &batch.staging {
            assert_eq!(vertex.color, [1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn colored_quads_always_use_the_placeholder_slot() {
        let (mut batch, _journal) = new_batch();
        batch.begin();

        batch
            .draw_quad(Vec2::zeros(), Vec2::new(1.0, 1.0), red())
            .unwrap();

        assert_eq!(batch.texture_slot_count(), 1);
        for vertex in &batch.staging {
            assert!(vertex.tex_index.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn flush_binds_only_the_occupied_slots() {
        let (mut batch, journal) = new_batch();
        let white = journal.created_textures()[0];
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), texture)
            .unwrap();
        batch.end().unwrap();
        batch.flush().unwrap();

        assert_eq!(
            journal.texture_unit_binds(),
            vec![(0, white), (1, texture)]
        );
    }

    #[test]
    fn end_uploads_exactly_the_populated_portion() {
        let (mut batch, journal) = new_batch();
        batch.begin();

        for _ in 0..3 {
            batch
                .draw_quad(Vec2::zeros(), Vec2::new(1.0, 1.0), red())
                .unwrap();
        }
        batch.end().unwrap();

        let uploads = journal.vertex_uploads();
        assert_eq!(uploads, vec![(0, 12 * std::mem::size_of::<Vertex>())]);
    }

    #[test]
    fn flush_resets_pending_state_but_keeps_the_placeholder() {
        let (mut batch, journal) = new_batch();
        let white = journal.created_textures()[0];
        let texture = batch.device.create_texture_rgba8(2, 2, &[0u8; 16]).unwrap();
        batch.begin();

        batch
            .draw_textured_quad(Vec2::zeros(), Vec2::new(8.0, 8.0), texture)
            .unwrap();
        batch.end().unwrap();
        batch.flush().unwrap();

        assert_eq!(batch.pending_index_count(), 0);
        assert_eq!(batch.texture_slot_count(), 1);

        // A second flush still binds the placeholder at unit 0.
        journal.clear();
        batch.flush().unwrap();
        assert_eq!(journal.texture_unit_binds(), vec![(0, white)]);
    }

    #[test]
    fn begin_resets_stats_and_clears_the_staging_buffer() {
        let (mut batch, _journal) = new_batch();
        batch.begin();
        batch
            .draw_quad(Vec2::zeros(), Vec2::new(1.0, 1.0), red())
            .unwrap();
        batch.end().unwrap();
        batch.flush().unwrap();

        batch.begin();
        assert_eq!(batch.vertex_count(), 0);
        assert_eq!(batch.stats(), BatchStats::default());
    }

    #[test]
    fn set_projection_uploads_the_named_uniform() {
        let (mut batch, journal) = new_batch();
        batch.set_projection(&Mat4::identity()).unwrap();

        assert!(journal
            .calls()
            .iter()
            .any(|call| matches!(call, DeviceCall::SetUniformMat4 { name } if name == "projection")));
    }

    #[test]
    fn dropping_the_batch_destroys_the_placeholder_texture() {
        let (batch, journal) = new_batch();
        let white = journal.created_textures()[0];
        drop(batch);

        assert!(journal
            .calls()
            .iter()
            .any(|call| matches!(call, DeviceCall::DestroyTexture { texture } if *texture == white)));
    }
}
