//! Headless recording backend
//!
//! A [`GraphicsDevice`] implementation that records every device interaction
//! into a shared call journal instead of touching a GPU. Used by the test
//! suite and by tooling that needs to drive full render passes without a
//! window or graphics context.
//!
//! The journal is shared between the device and every resource it creates
//! through `Rc<RefCell<_>>`; the whole backend is single-threaded, matching
//! the batcher's concurrency model.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Mat4;
use crate::render::api::{
    BufferUsage, GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer, GraphicsDevice, ShaderProgram,
    TextureId, VertexLayout,
};
use crate::render::{RenderError, RenderResult};

/// One recorded device interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    /// A vertex array was created
    CreateVertexArray,
    /// A vertex buffer was created
    CreateVertexBuffer {
        /// Requested size in bytes
        byte_size: usize,
        /// Requested usage hint
        usage: BufferUsage,
    },
    /// An index buffer was created and pre-filled
    CreateIndexBuffer {
        /// Number of index elements uploaded
        element_count: u32,
    },
    /// A texture was created
    CreateTexture {
        /// Texture width in pixels
        width: u32,
        /// Texture height in pixels
        height: u32,
        /// Handle assigned to the texture
        texture: TextureId,
    },
    /// A texture was destroyed
    DestroyTexture {
        /// Handle of the destroyed texture
        texture: TextureId,
    },
    /// A texture was bound to a texture unit
    BindTextureUnit {
        /// Target texture unit
        unit: u32,
        /// Bound texture handle
        texture: TextureId,
    },
    /// An indexed draw was issued
    DrawIndexed {
        /// Number of indices covered by the draw
        index_count: u32,
    },
    /// The vertex buffer was bound
    BindVertexBuffer,
    /// The vertex buffer was unbound
    UnbindVertexBuffer,
    /// Vertex data was written into the bound buffer
    WriteVertexData {
        /// Destination byte offset
        byte_offset: usize,
        /// Number of bytes written
        byte_len: usize,
    },
    /// The vertex array was bound
    BindVertexArray,
    /// The vertex array was unbound
    UnbindVertexArray,
    /// A buffer was attached to the vertex array
    AttachBuffer {
        /// Stride of the attached layout in bytes
        stride: u32,
    },
    /// The index buffer was bound
    BindIndexBuffer,
    /// The index buffer was unbound
    UnbindIndexBuffer,
    /// The shader program was bound
    BindShader,
    /// The shader program was unbound
    UnbindShader,
    /// A 4x4 matrix uniform was uploaded
    SetUniformMat4 {
        /// Uniform name
        name: String,
    },
}

/// Shared journal of recorded device calls
///
/// Cloning the journal yields another handle to the same underlying log, so
/// a test can keep one handle while the device moves into the batch.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    inner: Rc<RefCell<Vec<DeviceCall>>>,
}

impl CallJournal {
    fn record(&self, call: DeviceCall) {
        self.inner.borrow_mut().push(call);
    }

    /// Snapshot of every recorded call, in order
    #[must_use]
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.inner.borrow().clone()
    }

    /// Index counts of the indexed draws issued, in order
    #[must_use]
    pub fn draw_calls(&self) -> Vec<u32> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::DrawIndexed { index_count } => Some(*index_count),
                _ => None,
            })
            .collect()
    }

    /// The `(byte_offset, byte_len)` of every vertex data upload, in order
    #[must_use]
    pub fn vertex_uploads(&self) -> Vec<(usize, usize)> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::WriteVertexData {
                    byte_offset,
                    byte_len,
                } => Some((*byte_offset, *byte_len)),
                _ => None,
            })
            .collect()
    }

    /// The `(unit, texture)` pairs bound since the journal was last cleared
    #[must_use]
    pub fn texture_unit_binds(&self) -> Vec<(u32, TextureId)> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::BindTextureUnit { unit, texture } => Some((*unit, *texture)),
                _ => None,
            })
            .collect()
    }

    /// Handles of every texture created, in creation order
    #[must_use]
    pub fn created_textures(&self) -> Vec<TextureId> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::CreateTexture { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Discard all recorded calls
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

/// Headless graphics device
///
/// Vends monotonically increasing texture handles and records every call to
/// itself and to the resources it creates.
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    journal: CallJournal,
    next_texture_id: u32,
}

impl HeadlessDevice {
    /// Create a device with an empty journal
    #[must_use]
    pub fn new() -> Self {
        Self {
            journal: CallJournal::default(),
            next_texture_id: 0,
        }
    }

    /// A handle to this device's call journal
    #[must_use]
    pub fn journal(&self) -> CallJournal {
        self.journal.clone()
    }

    /// Create a shader program wired to this device's journal
    ///
    /// Shader compilation is outside the device abstraction, so this lives on
    /// the concrete headless type rather than on [`GraphicsDevice`].
    ///
    /// # Errors
    /// Never fails for the headless backend.
    pub fn create_shader_program(&self) -> RenderResult<Box<dyn ShaderProgram>> {
        Ok(Box::new(HeadlessShader {
            journal: self.journal.clone(),
        }))
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_vertex_array(&mut self) -> RenderResult<Box<dyn GpuVertexArray>> {
        self.journal.record(DeviceCall::CreateVertexArray);
        Ok(Box::new(HeadlessVertexArray {
            journal: self.journal.clone(),
        }))
    }

    fn create_vertex_buffer(
        &mut self,
        byte_size: usize,
        usage: BufferUsage,
    ) -> RenderResult<Box<dyn GpuVertexBuffer>> {
        self.journal
            .record(DeviceCall::CreateVertexBuffer { byte_size, usage });
        Ok(Box::new(HeadlessVertexBuffer {
            journal: self.journal.clone(),
            byte_size,
        }))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> RenderResult<Box<dyn GpuIndexBuffer>> {
        let element_count = u32::try_from(indices.len())
            .map_err(|_| RenderError::ResourceCreationFailed("index buffer too large".into()))?;
        self.journal
            .record(DeviceCall::CreateIndexBuffer { element_count });
        Ok(Box::new(HeadlessIndexBuffer {
            journal: self.journal.clone(),
            element_count,
        }))
    }

    fn create_texture_rgba8(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> RenderResult<TextureId> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture data size mismatch: expected {expected} bytes, got {}",
                pixels.len()
            )));
        }

        self.next_texture_id += 1;
        let texture = TextureId(self.next_texture_id);
        self.journal.record(DeviceCall::CreateTexture {
            width,
            height,
            texture,
        });
        Ok(texture)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.journal.record(DeviceCall::DestroyTexture { texture });
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId) {
        self.journal
            .record(DeviceCall::BindTextureUnit { unit, texture });
    }

    fn draw_indexed(&mut self, index_count: u32) -> RenderResult<()> {
        self.journal.record(DeviceCall::DrawIndexed { index_count });
        Ok(())
    }
}

struct HeadlessVertexBuffer {
    journal: CallJournal,
    byte_size: usize,
}

impl GpuVertexBuffer for HeadlessVertexBuffer {
    fn bind(&mut self) {
        self.journal.record(DeviceCall::BindVertexBuffer);
    }

    fn unbind(&mut self) {
        self.journal.record(DeviceCall::UnbindVertexBuffer);
    }

    fn write_sub_region(&mut self, byte_offset: usize, data: &[u8]) -> RenderResult<()> {
        if byte_offset + data.len() > self.byte_size {
            return Err(RenderError::RenderingFailed(format!(
                "vertex buffer overflow: write of {} bytes at offset {byte_offset} exceeds size {}",
                data.len(),
                self.byte_size
            )));
        }

        self.journal.record(DeviceCall::WriteVertexData {
            byte_offset,
            byte_len: data.len(),
        });
        Ok(())
    }
}

struct HeadlessVertexArray {
    journal: CallJournal,
}

impl GpuVertexArray for HeadlessVertexArray {
    fn bind(&mut self) {
        self.journal.record(DeviceCall::BindVertexArray);
    }

    fn unbind(&mut self) {
        self.journal.record(DeviceCall::UnbindVertexArray);
    }

    fn attach_buffer(
        &mut self,
        buffer: &mut dyn GpuVertexBuffer,
        layout: &VertexLayout,
    ) -> RenderResult<()> {
        buffer.bind();
        self.journal.record(DeviceCall::AttachBuffer {
            stride: layout.stride(),
        });
        Ok(())
    }
}

struct HeadlessIndexBuffer {
    journal: CallJournal,
    element_count: u32,
}

impl GpuIndexBuffer for HeadlessIndexBuffer {
    fn bind(&mut self) {
        self.journal.record(DeviceCall::BindIndexBuffer);
    }

    fn unbind(&mut self) {
        self.journal.record(DeviceCall::UnbindIndexBuffer);
    }

    fn element_count(&self) -> u32 {
        self.element_count
    }
}

struct HeadlessShader {
    journal: CallJournal,
}

impl ShaderProgram for HeadlessShader {
    fn bind(&mut self) {
        self.journal.record(DeviceCall::BindShader);
    }

    fn unbind(&mut self) {
        self.journal.record(DeviceCall::UnbindShader);
    }

    fn set_uniform_mat4(&mut self, name: &str, _value: &Mat4) -> RenderResult<()> {
        self.journal.record(DeviceCall::SetUniformMat4 {
            name: name.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_handles_increase_monotonically() {
        let mut device = HeadlessDevice::new();
        let first = device.create_texture_rgba8(1, 1, &[0u8; 4]).unwrap();
        let second = device.create_texture_rgba8(1, 1, &[0u8; 4]).unwrap();
        assert!(second.0 > first.0);
    }

    #[test]
    fn texture_creation_validates_pixel_data_size() {
        let mut device = HeadlessDevice::new();
        let result = device.create_texture_rgba8(2, 2, &[0u8; 4]);
        assert!(matches!(
            result,
            Err(RenderError::ResourceCreationFailed(_))
        ));
    }

    #[test]
    fn vertex_buffer_rejects_out_of_bounds_writes() {
        let mut device = HeadlessDevice::new();
        let mut buffer = device
            .create_vertex_buffer(16, BufferUsage::Dynamic)
            .unwrap();

        assert!(buffer.write_sub_region(0, &[0u8; 16]).is_ok());
        assert!(matches!(
            buffer.write_sub_region(8, &[0u8; 16]),
            Err(RenderError::RenderingFailed(_))
        ));
    }

    #[test]
    fn journal_survives_the_device_moving_away() {
        let device = HeadlessDevice::new();
        let journal = device.journal();

        let mut boxed: Box<dyn GraphicsDevice> = Box::new(device);
        boxed.bind_texture_unit(3, TextureId(1));

        assert_eq!(journal.texture_unit_binds(), vec![(3, TextureId(1))]);
    }

    #[test]
    fn index_buffer_reports_its_element_count() {
        let mut device = HeadlessDevice::new();
        let buffer = device.create_index_buffer(&[0, 1, 2, 2, 3, 0]).unwrap();
        assert_eq!(buffer.element_count(), 6);
    }
}
