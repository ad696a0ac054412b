//! render_wgpu: wgpu implementation of `viewport_core::FrameBackend`.
//!
//! The platform layer owns a `Renderer`, forwards resizes to it and calls
//! `Renderer::render` with the viewport controller once per tick.

pub mod gfx;
pub use gfx::{GpuMesh, GpuTexture, Renderer, RendererOptions};
