//! lf-assets: CPU-side asset loading for the viewer.
//!
//! Everything here is renderer-agnostic. Loaders return plain arrays
//! (`ObjMesh`, `CpuMesh`, `TextureCpu`) that a backend uploads however it likes.

pub mod error;
pub mod gif;
pub mod obj;
pub mod triangulate;
pub mod types;
pub mod util;

pub use error::AssetError;
pub use gif::load_gif_frames;
pub use obj::{load_obj, parse_obj};
pub use triangulate::build_draw_mesh;
pub use types::{
    ATTR_NORMAL, ATTR_TEXCOORD, CpuMesh, DrawVertex, Face, FaceVertex, ObjMesh, ParseReport,
    TextureCpu,
};
