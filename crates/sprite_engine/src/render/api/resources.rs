//! GPU resource capability traits
//!
//! Narrow interfaces over the GPU objects the batcher renders through.
//! Construction and destruction of the underlying objects belong to the
//! backend; dropping a boxed resource releases it.

use super::VertexLayout;
use crate::foundation::math::Mat4;
use crate::render::RenderResult;

/// A GPU-side vertex buffer
pub trait GpuVertexBuffer {
    /// Bind the buffer for subsequent operations
    fn bind(&mut self);

    /// Unbind the buffer
    fn unbind(&mut self);

    /// Overwrite a sub-region of the buffer with `data`
    ///
    /// The region `byte_offset..byte_offset + data.len()` must lie within the
    /// size the buffer was created with.
    fn write_sub_region(&mut self, byte_offset: usize, data: &[u8]) -> RenderResult<()>;
}

/// A GPU-side vertex array object
pub trait GpuVertexArray {
    /// Bind the vertex array for subsequent draws
    fn bind(&mut self);

    /// Unbind the vertex array
    fn unbind(&mut self);

    /// Attach a vertex buffer under the given attribute layout
    ///
    /// Binds `buffer` and records its attribute groups into the array's
    /// vertex input state.
    fn attach_buffer(
        &mut self,
        buffer: &mut dyn GpuVertexBuffer,
        layout: &VertexLayout,
    ) -> RenderResult<()>;
}

/// A GPU-side index buffer
pub trait GpuIndexBuffer {
    /// Bind the index buffer for subsequent draws
    fn bind(&mut self);

    /// Unbind the index buffer
    fn unbind(&mut self);

    /// Number of index elements the buffer holds
    fn element_count(&self) -> u32;
}

/// A compiled and linked shader program
pub trait ShaderProgram {
    /// Bind the program for subsequent draws and uniform uploads
    fn bind(&mut self);

    /// Unbind the program
    fn unbind(&mut self);

    /// Upload a 4x4 matrix uniform by name
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) -> RenderResult<()>;
}
