//! # Rendering System
//!
//! This module provides the sprite batching core and the abstraction layer it
//! renders through. It acts as a high-level, application-agnostic interface
//! over whatever graphics backend the application supplies.
//!
//! ## Architecture
//!
//! The rendering system is designed with clear separation of concerns:
//! - **SpriteBatch**: Accumulates quads into a vertex stream and flushes them
//!   as indexed draws
//! - **Capability Traits**: Narrow interfaces for GPU buffers, vertex arrays,
//!   index buffers, shaders, and the device that creates them
//! - **Backends**: Concrete trait implementations; the built-in headless
//!   backend records calls instead of touching a GPU
//!
//! ## Design Goals
//!
//! - **API Agnostic**: The batcher never depends on ambient graphics state
//!   beyond what it explicitly binds and unbinds
//! - **No Dropped Work**: Capacity exhaustion triggers a transparent mid-pass
//!   flush, never an error or a lost quad
//! - **Deterministic Resources**: GPU collaborators are exclusively owned and
//!   released when the batch drops

pub mod api;
pub mod backends;
pub mod primitives;
pub mod sprite;

pub use api::{
    GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer, GraphicsDevice, ShaderProgram, TextureId,
    VertexLayout,
};
pub use primitives::Vertex;
pub use sprite::{
    BatchStats, SpriteBatch, MAX_INDEX_COUNT, MAX_QUAD_COUNT, MAX_TEXTURE_SLOTS, MAX_VERTEX_COUNT,
};

/// Errors that can occur in the rendering system
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (buffers, textures, shaders) cannot be
    /// created or managed properly, typically due to memory constraints or
    /// invalid data.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A rendering operation failed during execution
    ///
    /// Indicates failure during active rendering operations such as uploading
    /// vertex data or issuing draw calls.
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Backend-specific error occurred
    ///
    /// Wraps backend-specific errors in a generic form for consistent error
    /// handling across different graphics backends.
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
