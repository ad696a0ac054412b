//! gfx: wgpu renderer for the viewport.
//!
//! Files
//! - types.rs: POD uniform struct and the `DrawVertex` buffer layout
//! - util.rs: surface size clamp, depth view, alignment helper
//! - pipeline.rs: shader modules, bind-group layouts, mesh/background pipelines
//! - mesh.rs: GPU mesh and texture upload inside error scopes
//! - renderer/: `Renderer` init, resize, per-frame encode, and the
//!   `FrameBackend` adapter the controller draws through
//!
//! A frame is two-phase: the controller calls the backend methods, which only
//! record `FrameCmd`s and write uniforms; `Renderer::render` then encodes the
//! recorded commands into a single pass and presents.

mod mesh;
mod pipeline;
pub mod renderer;
mod types;
mod util;

use std::sync::Arc;

pub use mesh::{GpuMesh, GpuTexture};
pub use renderer::RendererOptions;

/// One recorded draw for the current frame.
enum FrameCmd {
    Background(Arc<GpuTexture>),
    Mesh { mesh: Arc<GpuMesh>, offset: u32 },
}

/// Renderer owns the GPU state and the per-frame command list.
///
/// The platform layer owns a `Renderer` and calls `resize` and `render` based
/// on window events.
pub struct Renderer {
    // --- GPU & Surface ---
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    max_dim: u32,
    depth: wgpu::TextureView,

    // --- Pipelines & BGLs ---
    mesh_pipeline: wgpu::RenderPipeline,
    wire_pipeline: Option<wgpu::RenderPipeline>,
    bg_pipeline: wgpu::RenderPipeline,
    bg_bgl: wgpu::BindGroupLayout,
    bg_sampler: wgpu::Sampler,
    draw_buf: wgpu::Buffer,
    draw_bg: wgpu::BindGroup,
    slots: renderer::slots::DrawSlots,

    // --- Per-frame state ---
    placeholder: Arc<GpuMesh>,
    cmds: Vec<FrameCmd>,
    clear_rgb: [f32; 3],
    proj: glam::Mat4,
    wireframe: bool,
    frame_index: u64,
}
