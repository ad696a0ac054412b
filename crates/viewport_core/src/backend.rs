//! Render backend interface.
//!
//! The controller drives a frame through this trait so the same logic runs
//! against wgpu or the headless recorder. Handles are owned by whoever holds
//! them: dropping a `Mesh` or `Texture` releases the backend resource.

use glam::Mat4;
use lf_assets::{CpuMesh, TextureCpu};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Creating the compiled (GPU-resident) form of a mesh failed.
    #[error("compile failed: {0}")]
    CompileFailure(String),
    /// A per-frame draw could not be recorded or executed.
    #[error("draw failed: {0}")]
    RenderFailure(String),
    #[error("texture upload failed: {0}")]
    Texture(String),
}

/// Per-draw state derived from the camera and the reaction pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    pub model_view: Mat4,
    pub tint: [f32; 3],
}

pub trait FrameBackend {
    type Mesh;
    type Texture;

    /// Build the cached, render-ready form of `mesh`. Partial resources must
    /// not outlive a failed call.
    fn compile_mesh(&mut self, label: &str, mesh: &CpuMesh) -> Result<Self::Mesh, BackendError>;

    fn draw_mesh(&mut self, mesh: &Self::Mesh, params: &DrawParams) -> Result<(), BackendError>;

    /// Draw the stand-in figure. Infallible by contract.
    fn draw_placeholder(&mut self, params: &DrawParams);

    fn upload_texture(
        &mut self,
        label: &str,
        texture: &TextureCpu,
    ) -> Result<Self::Texture, BackendError>;

    /// Fill the viewport with a background frame.
    fn draw_background(&mut self, texture: &Self::Texture);

    /// Fill the viewport with a solid colour.
    fn clear(&mut self, rgb: [f32; 3]);
}
