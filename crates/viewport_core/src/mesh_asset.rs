//! OBJ-backed mesh with a lazily compiled, cached render handle.
//!
//! Geometry is parsed once at construction and never changes afterwards.
//! The compiled handle is built on the first draw, reused on every later draw
//! and dropped together with the asset.

use std::path::{Path, PathBuf};

use lf_assets::util::is_obj_path;
use lf_assets::{AssetError, Face, ObjMesh, build_draw_mesh, load_obj};

use crate::backend::{BackendError, DrawParams, FrameBackend};

/// Outcome of one `MeshAsset::render` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    Drawn,
    /// The asset has no drawable triangles.
    Empty,
    /// Compile or draw failed this frame; a later frame retries.
    Failed,
}

enum Compiled<H> {
    Pending,
    Empty,
    Ready(H),
}

pub struct MeshAsset<H> {
    path: PathBuf,
    geometry: ObjMesh,
    compiled: Compiled<H>,
    failed_compiles: u32,
}

impl<H> MeshAsset<H> {
    /// Load and parse `path`, surfacing file-level errors.
    pub fn try_load(path: &Path) -> Result<Self, AssetError> {
        if !is_obj_path(path) {
            log::debug!("{} has no .obj extension; parsing as OBJ anyway", path.display());
        }
        let (geometry, report) = load_obj(path)?;
        if report.is_clean() {
            log::info!(
                "OBJ loaded: {} (v:{} f:{})",
                path.display(),
                geometry.vertices.len(),
                geometry.faces.len()
            );
        } else {
            log::warn!(
                "OBJ loaded with problems: {} (v:{} f:{}, {} lines skipped from line {}, {} bad refs)",
                path.display(),
                geometry.vertices.len(),
                geometry.faces.len(),
                report.skipped_lines,
                report.first_skipped_line.unwrap_or(0),
                report.malformed_refs
            );
        }
        Ok(Self::from_parts(path.to_path_buf(), geometry))
    }

    /// Load `path`, never failing: on error the asset is empty and the error
    /// is logged.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(asset) => asset,
            Err(e) => {
                if e.is_not_found() {
                    log::warn!("{e}");
                } else {
                    log::error!("OBJ load failed: {e}");
                }
                Self::from_parts(path.to_path_buf(), ObjMesh::default())
            }
        }
    }

    /// Wrap geometry that was produced elsewhere (another thread, a generator).
    pub fn from_geometry(label: impl Into<PathBuf>, geometry: ObjMesh) -> Self {
        Self::from_parts(label.into(), geometry)
    }

    fn from_parts(path: PathBuf, geometry: ObjMesh) -> Self {
        Self { path, geometry, compiled: Compiled::Pending, failed_compiles: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.geometry.vertices
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.geometry.normals
    }

    pub fn texcoords(&self) -> &[[f32; 2]] {
        &self.geometry.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.geometry.faces
    }

    pub fn compiled(&self) -> Option<&H> {
        match &self.compiled {
            Compiled::Ready(h) => Some(h),
            _ => None,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled().is_some()
    }

    /// Build the backend handle if it does not exist yet. Calling this again
    /// afterwards is a no-op. On failure the asset stays uncompiled.
    pub fn compile<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: FrameBackend<Mesh = H>,
    {
        if !matches!(self.compiled, Compiled::Pending) {
            return Ok(());
        }
        let cpu = build_draw_mesh(&self.geometry);
        if cpu.is_empty() {
            log::debug!("nothing to compile for {}", self.path.display());
            self.compiled = Compiled::Empty;
            return Ok(());
        }
        let label = self.path.display().to_string();
        match backend.compile_mesh(&label, &cpu) {
            Ok(handle) => {
                log::debug!("compiled {label}: {} triangles", cpu.triangle_count());
                self.compiled = Compiled::Ready(handle);
                self.failed_compiles = 0;
                Ok(())
            }
            Err(e) => {
                self.failed_compiles = self.failed_compiles.saturating_add(1);
                Err(e)
            }
        }
    }

    /// Compile if needed, then draw the cached handle. Never propagates a
    /// failure; the status tells the caller whether anything was drawn.
    pub fn render<B>(&mut self, backend: &mut B, params: &DrawParams) -> DrawStatus
    where
        B: FrameBackend<Mesh = H>,
    {
        if let Err(e) = self.compile(backend) {
            // Retried every frame; only the first failure in a row is loud.
            if self.failed_compiles == 1 {
                log::error!("{}: {e}", self.path.display());
            } else {
                log::debug!("{}: {e} (attempt {})", self.path.display(), self.failed_compiles);
            }
            return DrawStatus::Failed;
        }
        match &self.compiled {
            Compiled::Ready(handle) => match backend.draw_mesh(handle, params) {
                Ok(()) => DrawStatus::Drawn,
                Err(e) => {
                    log::error!("{}: {e}", self.path.display());
                    DrawStatus::Failed
                }
            },
            Compiled::Empty => DrawStatus::Empty,
            Compiled::Pending => DrawStatus::Failed,
        }
    }
}

impl<H> std::fmt::Debug for MeshAsset<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshAsset")
            .field("path", &self.path)
            .field("vertices", &self.geometry.vertices.len())
            .field("faces", &self.geometry.faces.len())
            .field("compiled", &self.is_compiled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use lf_assets::parse_obj;

    fn params() -> DrawParams {
        DrawParams { model_view: glam::Mat4::IDENTITY, tint: [1.0; 3] }
    }

    fn tri() -> ObjMesh {
        parse_obj(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").0
    }

    #[test]
    fn compile_is_idempotent() {
        let mut be = HeadlessBackend::new();
        let mut a = MeshAsset::from_geometry("tri", tri());
        a.compile(&mut be).expect("first");
        a.compile(&mut be).expect("second");
        assert_eq!(be.compile_calls(), 1);
        assert!(a.is_compiled());
    }

    #[test]
    fn failed_compile_leaves_asset_uncompiled_and_retries() {
        let mut be = HeadlessBackend::new();
        be.fail_compiles(1);
        let mut a = MeshAsset::from_geometry("tri", tri());
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Failed);
        assert!(!a.is_compiled());
        assert_eq!(be.live_meshes(), 0);
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Drawn);
        assert!(a.is_compiled());
        assert_eq!(be.compile_calls(), 2);
    }

    #[test]
    fn empty_geometry_renders_empty_without_backend_calls() {
        let mut be = HeadlessBackend::new();
        let mut a: MeshAsset<_> = MeshAsset::from_geometry("empty", ObjMesh::default());
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Empty);
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Empty);
        assert_eq!(be.compile_calls(), 0);
        assert!(!a.is_compiled());
    }

    #[test]
    fn draw_failure_keeps_handle() {
        let mut be = HeadlessBackend::new();
        be.fail_draws(1);
        let mut a = MeshAsset::from_geometry("tri", tri());
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Failed);
        assert!(a.is_compiled());
        assert_eq!(a.render(&mut be, &params()), DrawStatus::Drawn);
        assert_eq!(be.compile_calls(), 1);
    }

    #[test]
    fn dropping_asset_releases_handle() {
        let mut be = HeadlessBackend::new();
        let mut a = MeshAsset::from_geometry("tri", tri());
        a.compile(&mut be).expect("compile");
        assert_eq!(be.live_meshes(), 1);
        drop(a);
        assert_eq!(be.live_meshes(), 0);
    }

    #[test]
    fn tolerant_load_of_missing_path_is_empty() {
        let a: MeshAsset<()> = MeshAsset::load(Path::new("nowhere/male.obj"));
        assert!(a.vertices().is_empty());
        assert!(a.faces().is_empty());
        assert_eq!(a.path(), Path::new("nowhere/male.obj"));
    }
}
