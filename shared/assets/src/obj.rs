//! OBJ text parser (positions, normals, texcoords, faces), no materials.
//!
//! The parser never fails on content: bad lines are skipped and counted in
//! `ParseReport`. Only file-level problems surface as `AssetError`.

use std::path::Path;
use std::str::SplitWhitespace;

use crate::error::AssetError;
use crate::types::{Face, FaceVertex, ObjMesh, ParseReport};

/// Read and parse an OBJ file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn load_obj(path: &Path) -> Result<(ObjMesh, ParseReport), AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_obj(&bytes))
}

/// Parse OBJ source held in memory.
#[must_use]
pub fn parse_obj(bytes: &[u8]) -> (ObjMesh, ParseReport) {
    let text = String::from_utf8_lossy(bytes);
    let mut mesh = ObjMesh::default();
    let mut report = ParseReport::default();

    for (lineno, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(tag) = fields.next() else { continue };
        let accepted = match tag {
            "v" => read_floats::<3>(fields).map(|p| mesh.vertices.push(p)).is_some(),
            "vn" => read_floats::<3>(fields).map(|n| mesh.normals.push(n)).is_some(),
            "vt" => read_floats::<2>(fields).map(|t| mesh.texcoords.push(t)).is_some(),
            "f" => match read_face(fields, &mesh, &mut report) {
                Some(face) => {
                    mesh.faces.push(face);
                    true
                }
                None => false,
            },
            _ => true,
        };
        if !accepted {
            report.skipped_lines += 1;
            report.first_skipped_line.get_or_insert(lineno + 1);
        }
    }
    (mesh, report)
}

fn read_floats<const N: usize>(mut fields: SplitWhitespace<'_>) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(out)
}

fn read_face(
    fields: SplitWhitespace<'_>,
    mesh: &ObjMesh,
    report: &mut ParseReport,
) -> Option<Face> {
    let lens = (mesh.vertices.len(), mesh.texcoords.len(), mesh.normals.len());
    let face: Face = fields
        .map(|token| {
            let (fv, clean) = read_ref(token, lens);
            if !clean {
                report.malformed_refs += 1;
            }
            fv
        })
        .collect();
    if face.is_empty() { None } else { Some(face) }
}

/// Split `v`, `v/t`, `v//n` or `v/t/n`. Returns the corner and whether every
/// present segment parsed.
fn read_ref(token: &str, (nv, nt, nn): (usize, usize, usize)) -> (FaceVertex, bool) {
    let mut segs = token.split('/');
    let mut clean = true;
    let mut slot = |seg: Option<&str>, len: usize, required: bool| match seg {
        None | Some("") => {
            if required {
                clean = false;
            }
            None
        }
        Some(s) => {
            let idx = resolve_index(s, len);
            if idx.is_none() {
                clean = false;
            }
            idx
        }
    };
    let position = slot(segs.next(), nv, true);
    let texcoord = slot(segs.next(), nt, false);
    let normal = slot(segs.next(), nn, false);
    (FaceVertex::new(position, texcoord, normal), clean)
}

/// Convert a 1-based (or negative, relative) OBJ index to 0-based.
/// Relative indices count back from `len`, the element count seen so far.
fn resolve_index(seg: &str, len: usize) -> Option<u32> {
    let raw: i64 = seg.parse().ok()?;
    let idx = match raw {
        0 => return None,
        n if n > 0 => usize::try_from(n - 1).ok()?,
        n => len.checked_sub(usize::try_from(n.unsigned_abs()).ok()?)?,
    };
    u32::try_from(idx).ok()
}
