//! Asset type definitions used across loaders.
//!
//! These are CPU-side representations independent of any renderer.

/// One corner of an OBJ face. Each slot is a 0-based index into the matching
/// `ObjMesh` array, or `None` when the source omitted it or it was malformed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: Option<u32>,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

impl FaceVertex {
    #[must_use]
    pub const fn new(position: Option<u32>, texcoord: Option<u32>, normal: Option<u32>) -> Self {
        Self { position, texcoord, normal }
    }
}

/// Ordered polygon corners as they appeared on the `f` line.
pub type Face = Vec<FaceVertex>;

/// Parsed OBJ geometry, indexed exactly as the file was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub faces: Vec<Face>,
}

impl ObjMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }
}

/// Line-level problems found while parsing. None of these abort the load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// `v`/`vn`/`vt`/`f` lines dropped for missing or non-numeric fields.
    pub skipped_lines: usize,
    /// 1-based line number of the first skipped line.
    pub first_skipped_line: Option<usize>,
    /// Face references with at least one unparsable slot.
    pub malformed_refs: usize,
}

impl ParseReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_lines == 0 && self.malformed_refs == 0
    }
}

pub const ATTR_NORMAL: u32 = 1 << 0;
pub const ATTR_TEXCOORD: u32 = 1 << 1;

/// Expanded per-corner vertex ready for a vertex buffer.
///
/// `attrs` carries `ATTR_*` bits; a cleared bit means the value is zero-filled
/// and the shader should fall back to default shading / no texture.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawVertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    pub uv: [f32; 2],
    pub attrs: u32,
}

/// CPU-side triangle list ready to be uploaded to GPU.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuMesh {
    pub vertices: Vec<DrawVertex>,
    pub indices: Vec<u32>,
}

impl CpuMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Decoded RGBA8 image.
pub struct TextureCpu {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub srgb: bool,
}
