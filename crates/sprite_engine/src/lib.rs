//! # Sprite Engine
//!
//! A 2D sprite batching engine written in Rust with pluggable graphics backends.
//!
//! ## Features
//!
//! - **Sprite Batching**: Colored and textured quads accumulated into a minimal
//!   number of indexed draw calls
//! - **Multi-Texture Draws**: Up to 32 distinct textures bound per draw call
//! - **Transparent Overflow Handling**: Capacity exhaustion flushes mid-pass
//!   without dropping a single quad
//! - **Backend Agnostic**: The batcher talks to the GPU exclusively through
//!   narrow capability traits
//! - **Headless Mode**: A recording backend for tests and tooling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//! use sprite_engine::render::backends::headless::HeadlessDevice;
//!
//! fn main() -> RenderResult<()> {
//!     let device = HeadlessDevice::new();
//!     let shader = device.create_shader_program()?;
//!     let mut batch = SpriteBatch::new(Box::new(device), shader)?;
//!
//!     batch.set_projection(&Mat4::orthographic_2d(800.0, 600.0))?;
//!
//!     batch.begin();
//!     batch.draw_quad(Vec2::new(10.0, 10.0), Vec2::new(32.0, 32.0), Vec3::new(1.0, 0.2, 0.2))?;
//!     batch.end()?;
//!     batch.flush()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, RenderSettings},
        foundation::math::{Mat4, Mat4Ext, Vec2, Vec3},
        render::{
            api::{GraphicsDevice, TextureId},
            BatchStats, RenderError, RenderResult, SpriteBatch,
        },
    };
}
