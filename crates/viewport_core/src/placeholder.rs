//! CPU-side stand-in figure: a sphere head over a box torso.
//!
//! Shown whenever the active mesh is missing, empty or failed to draw. Built
//! once by the backend at init so drawing it needs no fallible work.

use lf_assets::{ATTR_NORMAL, CpuMesh, DrawVertex};

const HEAD_RADIUS: f32 = 0.25;
const HEAD_Y: f32 = 0.6;
const SLICES: u32 = 16;
const STACKS: u32 = 12;
const TORSO_HALF: f32 = 0.4;
const TORSO_SCALE: [f32; 3] = [1.0, 1.6, 0.5];
const TORSO_Y: f32 = -0.25;

pub fn placeholder_mesh() -> CpuMesh {
    let mut mesh = CpuMesh::default();
    push_sphere(&mut mesh);
    push_box(&mut mesh);
    mesh
}

fn vertex(pos: [f32; 3], nrm: [f32; 3]) -> DrawVertex {
    DrawVertex { pos, nrm, uv: [0.0; 2], attrs: ATTR_NORMAL }
}

fn push_sphere(mesh: &mut CpuMesh) {
    let base = mesh.vertices.len() as u32;
    for stack in 0..=STACKS {
        let phi = std::f32::consts::PI * stack as f32 / STACKS as f32;
        let (sp, cp) = phi.sin_cos();
        for slice in 0..=SLICES {
            let theta = std::f32::consts::TAU * slice as f32 / SLICES as f32;
            let (st, ct) = theta.sin_cos();
            let n = [sp * ct, cp, sp * st];
            let p = [n[0] * HEAD_RADIUS, n[1] * HEAD_RADIUS + HEAD_Y, n[2] * HEAD_RADIUS];
            mesh.vertices.push(vertex(p, n));
        }
    }
    let row = SLICES + 1;
    for stack in 0..STACKS {
        for slice in 0..SLICES {
            let a = base + stack * row + slice;
            let b = a + row;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
}

fn push_box(mesh: &mut CpuMesh) {
    let [sx, sy, sz] = TORSO_SCALE.map(|s| s * TORSO_HALF);
    // (normal, u, v) per face with u x v = normal; corners are n +/- u +/- v.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    for (n, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let c = |i: usize| n[i] + su * u[i] + sv * v[i];
            let p = [c(0) * sx, c(1) * sy + TORSO_Y, c(2) * sz];
            mesh.vertices.push(vertex(p, n));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_deterministic_and_indexed_in_range() {
        let a = placeholder_mesh();
        let b = placeholder_mesh();
        assert_eq!(a, b);
        assert!(!a.is_empty());
        let n = a.vertices.len() as u32;
        assert!(a.indices.iter().all(|&i| i < n));
        assert_eq!(a.indices.len() % 3, 0);
        assert_eq!(a.triangle_count() as u32, STACKS * SLICES * 2 + 12);
    }

    #[test]
    fn bounds_cover_head_and_torso() {
        let m = placeholder_mesh();
        let max_y = m.vertices.iter().map(|v| v.pos[1]).fold(f32::MIN, f32::max);
        let min_y = m.vertices.iter().map(|v| v.pos[1]).fold(f32::MAX, f32::min);
        assert!((max_y - (HEAD_Y + HEAD_RADIUS)).abs() < 1e-5);
        assert!((min_y - (TORSO_Y - TORSO_HALF * 1.6)).abs() < 1e-5);
    }

    #[test]
    fn box_faces_wind_outward() {
        let m = placeholder_mesh();
        let first_box = ((STACKS + 1) * (SLICES + 1)) as usize;
        for face in 0..6 {
            let i = first_box + face * 4;
            let p = |k: usize| glam::Vec3::from(m.vertices[i + k].pos);
            let n = glam::Vec3::from(m.vertices[i].nrm);
            let geo = (p(1) - p(0)).cross(p(2) - p(0));
            assert!(geo.dot(n) > 0.0, "face {face}");
        }
    }
}
