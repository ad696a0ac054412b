//! Pipeline creation helpers and shader loading.
//!
//! Two pipelines share one depth-tested pass: the fullscreen background
//! (no depth write) and the mesh pipeline (plus an optional wireframe variant
//! when the adapter supports `POLYGON_MODE_LINE`).
//!
//! WGSL source lives next to this file and is embedded with `include_str!`.

use std::num::NonZeroU64;

use wgpu::{
    BindGroupLayout, ColorTargetState, FragmentState, PipelineLayoutDescriptor, PolygonMode,
    RenderPipeline, ShaderModule, ShaderSource, VertexState,
};

use crate::gfx::types::{DRAW_VERTEX_LAYOUT, DrawUniform};
use crate::gfx::util::DEPTH_FORMAT;

pub fn create_mesh_shader(device: &wgpu::Device) -> ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh-shader"),
        source: ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!("shader.wgsl"))),
    })
}

pub fn create_background_shader(device: &wgpu::Device) -> ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("background-shader"),
        source: ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
            "background.wgsl"
        ))),
    })
}

/// Per-draw uniform addressed with a dynamic offset.
pub fn create_draw_bgl(device: &wgpu::Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("draw-bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64),
            },
            count: None,
        }],
    })
}

pub fn create_background_bgl(device: &wgpu::Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("background-bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub fn create_background_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("background-sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Filled mesh pipeline, plus a line-mode variant when `wireframe` is
/// available on the device.
pub fn create_mesh_pipelines(
    device: &wgpu::Device,
    shader: &ShaderModule,
    draw_bgl: &BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> (RenderPipeline, Option<RenderPipeline>) {
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("mesh-pipeline-layout"),
        bind_group_layouts: &[draw_bgl],
        push_constant_ranges: &[],
    });
    let build = |label: &str, polygon_mode: PolygonMode| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[DRAW_VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                // OBJ winding is not reliable; shade both sides.
                cull_mode: None,
                polygon_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    };
    let fill = build("mesh-pipeline", PolygonMode::Fill);
    let wire = device
        .features()
        .contains(wgpu::Features::POLYGON_MODE_LINE)
        .then(|| build("mesh-wire-pipeline", PolygonMode::Line));
    (fill, wire)
}

pub fn create_background_pipeline(
    device: &wgpu::Device,
    shader: &ShaderModule,
    bg_bgl: &BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> RenderPipeline {
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("background-pipeline-layout"),
        bind_group_layouts: &[bg_bgl],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("background-pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_bg"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_bg"),
            targets: &[Some(ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
