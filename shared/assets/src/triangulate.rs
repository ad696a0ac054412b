//! Expand an `ObjMesh` into a flat triangle list.
//!
//! Each face corner becomes its own `DrawVertex`. Triangles pass through;
//! larger polygons are fan-triangulated around their first corner, which is
//! only correct for convex, planar faces.

use crate::types::{ATTR_NORMAL, ATTR_TEXCOORD, CpuMesh, DrawVertex, ObjMesh};

#[must_use]
pub fn build_draw_mesh(mesh: &ObjMesh) -> CpuMesh {
    let mut out = CpuMesh::default();
    let mut corners: Vec<u32> = Vec::with_capacity(8);

    for face in &mesh.faces {
        let base = out.vertices.len();
        corners.clear();
        for fv in face {
            // A corner without a usable position cannot be placed; drop it.
            let Some(pos) = lookup(&mesh.vertices, fv.position) else {
                continue;
            };
            let Ok(idx) = u32::try_from(out.vertices.len()) else {
                log::warn!("mesh exceeds u32 index range; truncating");
                return out;
            };
            let mut v = DrawVertex { pos, ..DrawVertex::default() };
            if let Some(n) = lookup(&mesh.normals, fv.normal) {
                v.nrm = n;
                v.attrs |= ATTR_NORMAL;
            }
            if let Some(t) = lookup(&mesh.texcoords, fv.texcoord) {
                v.uv = t;
                v.attrs |= ATTR_TEXCOORD;
            }
            out.vertices.push(v);
            corners.push(idx);
        }
        if corners.len() < 3 {
            out.vertices.truncate(base);
            continue;
        }
        let first = corners[0];
        for pair in corners[1..].windows(2) {
            out.indices.extend_from_slice(&[first, pair[0], pair[1]]);
        }
    }
    out
}

fn lookup<T: Copy>(items: &[T], idx: Option<u32>) -> Option<T> {
    items.get(usize::try_from(idx?).ok()?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj;

    #[test]
    fn triangle_passes_through() {
        let (m, _) = parse_obj(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let cpu = build_draw_mesh(&m);
        assert_eq!(cpu.vertices.len(), 3);
        assert_eq!(cpu.indices, vec![0, 1, 2]);
    }

    #[test]
    fn ngon_fans_around_first_corner() {
        let src = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0.5 1.5 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let (m, _) = parse_obj(src);
        let cpu = build_draw_mesh(&m);
        assert_eq!(cpu.triangle_count(), 3);
        assert_eq!(cpu.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn attributes_only_when_in_range() {
        let src = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvt 0.25 0.75\nf 1/1/1 2/9/1 3/1/9\n";
        let (m, _) = parse_obj(src);
        let cpu = build_draw_mesh(&m);
        let attrs: Vec<u32> = cpu.vertices.iter().map(|v| v.attrs).collect();
        assert_eq!(
            attrs,
            vec![ATTR_NORMAL | ATTR_TEXCOORD, ATTR_NORMAL, ATTR_TEXCOORD]
        );
        assert_eq!(cpu.vertices[0].uv, [0.25, 0.75]);
        assert_eq!(cpu.vertices[2].nrm, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_range_positions_are_dropped_from_the_polygon() {
        // Quad with one dangling corner still leaves a triangle.
        let src = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 42 3\n";
        let (m, _) = parse_obj(src);
        let cpu = build_draw_mesh(&m);
        assert_eq!(cpu.triangle_count(), 1);
        assert_eq!(cpu.vertices.len(), 3);
    }

    #[test]
    fn degenerate_faces_leave_no_orphan_vertices() {
        let src = b"v 0 0 0\nv 1 0 0\nf 1 2\nf 1 7 8\n";
        let (m, _) = parse_obj(src);
        let cpu = build_draw_mesh(&m);
        assert!(cpu.is_empty());
        assert!(cpu.vertices.is_empty());
    }
}
