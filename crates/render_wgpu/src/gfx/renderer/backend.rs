//! Adapter implementing `viewport_core::FrameBackend` for the Renderer.
//!
//! Uploads happen immediately; draws only write their uniform slot and record
//! a `FrameCmd`, which `render` encodes once the controller is done.

use std::sync::Arc;

use lf_assets::{CpuMesh, TextureCpu};
use viewport_core::{BackendError, DrawParams, FrameBackend};

use crate::gfx::types::DrawUniform;
use crate::gfx::{FrameCmd, GpuMesh, GpuTexture, Renderer, mesh};

impl Renderer {
    fn write_draw(&self, offset: u32, params: &DrawParams) {
        let u = DrawUniform::new(self.proj, params.model_view, params.tint);
        self.queue
            .write_buffer(&self.draw_buf, u64::from(offset), bytemuck::bytes_of(&u));
    }
}

impl FrameBackend for Renderer {
    type Mesh = Arc<GpuMesh>;
    type Texture = Arc<GpuTexture>;

    fn compile_mesh(&mut self, label: &str, mesh: &CpuMesh) -> Result<Self::Mesh, BackendError> {
        let gpu = mesh::upload_mesh(&self.device, label, mesh)?;
        log::debug!("uploaded {label}: {} indices", gpu.index_count);
        Ok(Arc::new(gpu))
    }

    fn draw_mesh(&mut self, mesh: &Self::Mesh, params: &DrawParams) -> Result<(), BackendError> {
        if mesh.index_count == 0 {
            return Err(BackendError::RenderFailure("mesh has no indices".into()));
        }
        let offset = self.slots.next().ok_or_else(|| {
            BackendError::RenderFailure(format!(
                "more than {} draws in one frame",
                self.slots.capacity()
            ))
        })?;
        self.write_draw(offset, params);
        self.cmds.push(FrameCmd::Mesh { mesh: Arc::clone(mesh), offset });
        Ok(())
    }

    fn draw_placeholder(&mut self, params: &DrawParams) {
        let offset = self.slots.placeholder();
        self.write_draw(offset, params);
        self.cmds.push(FrameCmd::Mesh { mesh: Arc::clone(&self.placeholder), offset });
    }

    fn upload_texture(
        &mut self,
        label: &str,
        texture: &TextureCpu,
    ) -> Result<Self::Texture, BackendError> {
        mesh::upload_texture(
            &self.device,
            &self.queue,
            &self.bg_bgl,
            &self.bg_sampler,
            label,
            texture,
        )
        .map(Arc::new)
    }

    fn draw_background(&mut self, texture: &Self::Texture) {
        self.cmds.push(FrameCmd::Background(Arc::clone(texture)));
    }

    fn clear(&mut self, rgb: [f32; 3]) {
        self.clear_rgb = rgb;
    }
}
