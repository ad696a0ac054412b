//! Surface resize and recreation.

use viewport_core::camera::OrbitCamera;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::gfx::{Renderer, util};

impl Renderer {
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            // Minimized; keep the old configuration until a real size arrives.
            return;
        }
        let (w, h) = util::scale_to_max((new_size.width, new_size.height), self.max_dim);
        if (w, h) != (new_size.width, new_size.height) {
            log::debug!(
                "Resized {}x{} exceeds max {}, clamped to {}x{} (aspect kept)",
                new_size.width,
                new_size.height,
                self.max_dim,
                w,
                h
            );
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
        self.depth = util::create_depth_view(&self.device, w, h);
        self.proj = OrbitCamera::projection(w as f32 / h as f32);
    }

    /// Reconfigure after `SurfaceError::Lost`/`Outdated`.
    pub fn recreate_surface_current_size(&mut self, window: &Window) {
        self.resize(window.inner_size());
    }
}
