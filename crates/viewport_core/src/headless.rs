//! Recording backend with no GPU behind it.
//!
//! Used by tests and by tooling that wants to dry-run the frame logic. Every
//! call is appended to the current frame; handles count themselves so leaks
//! show up as a non-zero `live_meshes` after the owner is gone.

use std::cell::Cell;
use std::rc::Rc;

use glam::Mat4;
use lf_assets::{CpuMesh, TextureCpu};

use crate::backend::{BackendError, DrawParams, FrameBackend};

#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    Clear([f32; 3]),
    Background(u32),
    Mesh { id: u32, tint: [f32; 3], model_view: Mat4 },
    Placeholder { tint: [f32; 3] },
}

#[derive(Debug)]
pub struct HeadlessMesh {
    pub id: u32,
    pub triangles: usize,
    live: Rc<Cell<usize>>,
}

impl Drop for HeadlessMesh {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frame: Vec<Recorded>,
    next_id: u32,
    compile_calls: usize,
    texture_uploads: usize,
    live: Rc<Cell<usize>>,
    fail_compiles: u32,
    fail_draws: u32,
    fail_textures: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` `compile_mesh` calls fail.
    pub fn fail_compiles(&mut self, n: u32) {
        self.fail_compiles = n;
    }

    /// Make the next `n` `draw_mesh` calls fail.
    pub fn fail_draws(&mut self, n: u32) {
        self.fail_draws = n;
    }

    pub fn fail_textures(&mut self, n: u32) {
        self.fail_textures = n;
    }

    pub fn compile_calls(&self) -> usize {
        self.compile_calls
    }

    pub fn texture_uploads(&self) -> usize {
        self.texture_uploads
    }

    /// Mesh handles that have been created and not yet dropped.
    pub fn live_meshes(&self) -> usize {
        self.live.get()
    }

    pub fn frame(&self) -> &[Recorded] {
        &self.frame
    }

    /// Return the commands recorded since the last call.
    pub fn take_frame(&mut self) -> Vec<Recorded> {
        std::mem::take(&mut self.frame)
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

fn take_failure(counter: &mut u32) -> bool {
    if *counter > 0 {
        *counter -= 1;
        true
    } else {
        false
    }
}

impl FrameBackend for HeadlessBackend {
    type Mesh = HeadlessMesh;
    type Texture = HeadlessTexture;

    fn compile_mesh(&mut self, label: &str, mesh: &CpuMesh) -> Result<HeadlessMesh, BackendError> {
        self.compile_calls += 1;
        if take_failure(&mut self.fail_compiles) {
            return Err(BackendError::CompileFailure(format!("{label}: injected")));
        }
        self.live.set(self.live.get() + 1);
        Ok(HeadlessMesh {
            id: self.next_id(),
            triangles: mesh.triangle_count(),
            live: Rc::clone(&self.live),
        })
    }

    fn draw_mesh(&mut self, mesh: &HeadlessMesh, params: &DrawParams) -> Result<(), BackendError> {
        if take_failure(&mut self.fail_draws) {
            return Err(BackendError::RenderFailure(format!("mesh {}: injected", mesh.id)));
        }
        self.frame.push(Recorded::Mesh {
            id: mesh.id,
            tint: params.tint,
            model_view: params.model_view,
        });
        Ok(())
    }

    fn draw_placeholder(&mut self, params: &DrawParams) {
        self.frame.push(Recorded::Placeholder { tint: params.tint });
    }

    fn upload_texture(
        &mut self,
        label: &str,
        texture: &TextureCpu,
    ) -> Result<HeadlessTexture, BackendError> {
        if take_failure(&mut self.fail_textures) {
            return Err(BackendError::Texture(format!("{label}: injected")));
        }
        self.texture_uploads += 1;
        Ok(HeadlessTexture {
            id: self.next_id(),
            width: texture.width,
            height: texture.height,
        })
    }

    fn draw_background(&mut self, texture: &HeadlessTexture) {
        self.frame.push(Recorded::Background(texture.id));
    }

    fn clear(&mut self, rgb: [f32; 3]) {
        self.frame.push(Recorded::Clear(rgb));
    }
}
