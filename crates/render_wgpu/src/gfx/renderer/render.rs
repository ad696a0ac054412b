//! Renderer::render: run the controller's frame, then encode and present.

use std::time::Instant;

use viewport_core::{FrameReport, ViewportController};
use wgpu::SurfaceError;

use crate::gfx::{FrameCmd, Renderer};

impl Renderer {
    /// Render one frame of `controller`.
    ///
    /// Surface errors are returned so the platform layer can reconfigure;
    /// mesh and texture problems were already handled inside the controller.
    pub fn render(
        &mut self,
        controller: &mut ViewportController<Renderer>,
        now: Instant,
    ) -> Result<FrameReport, SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.cmds.clear();
        self.slots.reset();
        let report = controller.render_frame(self, now);

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("frame") });
        {
            let [r, g, b] = self.clear_rgb.map(f64::from);
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("viewport-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            let mesh_pipeline = match (&self.wire_pipeline, self.wireframe) {
                (Some(wire), true) => wire,
                _ => &self.mesh_pipeline,
            };
            for cmd in &self.cmds {
                match cmd {
                    FrameCmd::Background(tex) => {
                        rp.set_pipeline(&self.bg_pipeline);
                        rp.set_bind_group(0, &tex.bind_group, &[]);
                        rp.draw(0..3, 0..1);
                    }
                    FrameCmd::Mesh { mesh, offset } => {
                        rp.set_pipeline(mesh_pipeline);
                        rp.set_bind_group(0, &self.draw_bg, &[*offset]);
                        rp.set_vertex_buffer(0, mesh.vb.slice(..));
                        rp.set_index_buffer(mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
                        rp.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        if let Some(e) = pollster::block_on(self.device.pop_error_scope()) {
            log::error!("frame {}: {e}", self.frame_index);
        }
        frame.present();

        // Release handles the controller has already let go of.
        self.cmds.clear();
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(report)
    }
}
