//! Buffer/vertex types shared across pipelines.
//!
//! All types here are `#[repr(C)]` and `bytemuck`-safe so they can be uploaded to GPU buffers
//! without extra copies.

use bytemuck::{Pod, Zeroable};
use lf_assets::DrawVertex;

/// Per-draw uniform; one 256-byte aligned slot per draw in the frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    /// rgb tint; w unused.
    pub tint: [f32; 4],
}

impl DrawUniform {
    pub fn new(proj: glam::Mat4, model_view: glam::Mat4, tint: [f32; 3]) -> Self {
        Self {
            mvp: (proj * model_view).to_cols_array_2d(),
            model_view: model_view.to_cols_array_2d(),
            tint: [tint[0], tint[1], tint[2], 1.0],
        }
    }
}

const DRAW_VERTEX_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2, 3 => Uint32];

/// Layout of `lf_assets::DrawVertex` (pos, nrm, uv, attrs bits).
pub const DRAW_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<DrawVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &DRAW_VERTEX_ATTRS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_uniform_matches_wgsl_size() {
        // mat4x4 + mat4x4 + vec4
        assert_eq!(std::mem::size_of::<DrawUniform>(), 144);
    }

    #[test]
    fn vertex_layout_offsets_match_struct() {
        assert_eq!(DRAW_VERTEX_LAYOUT.array_stride, 36);
        let offsets: Vec<u64> = DRAW_VERTEX_LAYOUT.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 32]);
    }

    #[test]
    fn mvp_is_proj_times_model_view() {
        let proj = glam::Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        let mv = glam::Mat4::from_translation(glam::vec3(0.0, 0.0, -6.0));
        let u = DrawUniform::new(proj, mv, [1.0, 0.5, 0.5]);
        assert_eq!(u.mvp, (proj * mv).to_cols_array_2d());
        assert_eq!(u.tint, [1.0, 0.5, 0.5, 1.0]);
    }
}
