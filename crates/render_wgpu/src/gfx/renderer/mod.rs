//! Renderer implementation split by concern.

mod backend;
mod init;
mod render;
mod resize;
pub(crate) mod slots;

/// Startup switches for the renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RendererOptions {
    /// Draw meshes as lines when the adapter supports it.
    pub wireframe: bool,
    /// Present without waiting for vblank.
    pub no_vsync: bool,
}

/// Regular draws per frame; one more slot is reserved for the placeholder.
pub const MAX_DRAWS_PER_FRAME: u32 = 8;
