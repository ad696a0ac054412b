//! Renderer initialization (`new`).

use std::sync::Arc;

use anyhow::Context;
use viewport_core::camera::OrbitCamera;
use viewport_core::controller::CLEAR_DARK;
use viewport_core::placeholder::placeholder_mesh;
use winit::window::Window;

use crate::gfx::types::DrawUniform;
use crate::gfx::{Renderer, mesh, pipeline, util};

use super::slots::DrawSlots;
use super::{MAX_DRAWS_PER_FRAME, RendererOptions};

fn backend_from_env() -> Option<wgpu::Backends> {
    match std::env::var("LF_BACKEND").ok().as_deref() {
        Some("vulkan" | "VULKAN" | "vk") => Some(wgpu::Backends::VULKAN),
        Some("gl" | "GL" | "opengl") => Some(wgpu::Backends::GL),
        Some("metal" | "METAL") => Some(wgpu::Backends::METAL),
        Some("dx12" | "DX12") => Some(wgpu::Backends::DX12),
        Some("primary" | "PRIMARY" | "all") => Some(wgpu::Backends::PRIMARY),
        _ => None,
    }
}

impl Renderer {
    /// Create a renderer bound to a window surface.
    pub async fn new(window: Arc<Window>, opts: RendererOptions) -> anyhow::Result<Self> {
        let candidates: &[wgpu::Backends] = if let Some(b) = backend_from_env() {
            if b == wgpu::Backends::PRIMARY { &[wgpu::Backends::PRIMARY] } else { &[b, wgpu::Backends::PRIMARY] }
        } else if cfg!(target_os = "linux") {
            &[wgpu::Backends::VULKAN, wgpu::Backends::GL, wgpu::Backends::PRIMARY]
        } else {
            &[wgpu::Backends::PRIMARY, wgpu::Backends::GL]
        };

        // Create a surface per candidate instance and try to get an adapter
        let mut picked: Option<(wgpu::Surface<'static>, wgpu::Adapter)> = None;
        for &bmask in candidates {
            let inst = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: bmask,
                flags: wgpu::InstanceFlags::empty(),
                ..Default::default()
            });
            let surf = inst
                .create_surface(Arc::clone(&window))
                .context("create wgpu surface")?;
            match inst
                .request_adapter(&wgpu::RequestAdapterOptions {
                    compatible_surface: Some(&surf),
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    force_fallback_adapter: false,
                })
                .await
            {
                Ok(a) => {
                    picked = Some((surf, a));
                    break;
                }
                Err(e) => log::debug!("no adapter for {bmask:?}: {e:?}"),
            }
        }
        let (surface, adapter) = picked
            .ok_or_else(|| anyhow::anyhow!("no suitable GPU adapter across backends {candidates:?}"))?;

        let mut req_features = wgpu::Features::empty();
        if opts.wireframe && adapter.features().contains(wgpu::Features::POLYGON_MODE_LINE) {
            req_features |= wgpu::Features::POLYGON_MODE_LINE;
        }
        let info = adapter.get_info();
        log::info!("Adapter: {:?} ({:?})", info.name, info.backend);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("wgpu-device"),
                required_features: req_features,
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
            })
            .await
            .context("request device")?;

        // Log validation instead of panicking
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("wgpu uncaptured error: {e:?}");
        }));

        // Surface configuration
        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let present_mode = if opts.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        };
        let max_dim = device.limits().max_texture_dimension_2d.clamp(1, 4096);
        let (w, h) = util::scale_to_max((size.width, size.height), max_dim);
        if (w, h) != (size.width, size.height) {
            log::warn!(
                "Clamping surface from {}x{} to {}x{} (max_dim={})",
                size.width,
                size.height,
                w,
                h,
                max_dim
            );
        }
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: w,
            height: h,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = util::create_depth_view(&device, config.width, config.height);

        // Pipelines/BGLs
        let mesh_shader = pipeline::create_mesh_shader(&device);
        let bg_shader = pipeline::create_background_shader(&device);
        let draw_bgl = pipeline::create_draw_bgl(&device);
        let bg_bgl = pipeline::create_background_bgl(&device);
        let (mesh_pipeline, wire_pipeline) =
            pipeline::create_mesh_pipelines(&device, &mesh_shader, &draw_bgl, config.format);
        if opts.wireframe && wire_pipeline.is_none() {
            log::warn!("wireframe requested but POLYGON_MODE_LINE is unsupported; drawing filled");
        }
        let bg_pipeline = pipeline::create_background_pipeline(&device, &bg_shader, &bg_bgl, config.format);
        let bg_sampler = pipeline::create_background_sampler(&device);

        // Per-draw uniforms: one aligned slot per draw + the placeholder slot
        let uniform_size = std::mem::size_of::<DrawUniform>() as u64;
        let stride = util::align_to(
            uniform_size,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );
        let stride = u32::try_from(stride).context("uniform stride overflows u32")?;
        let slots = DrawSlots::new(MAX_DRAWS_PER_FRAME, stride);
        let draw_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw-uniforms"),
            size: slots.buffer_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let draw_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw-bg"),
            layout: &draw_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buf,
                    offset: 0,
                    size: wgpu::BufferSize::new(uniform_size),
                }),
            }],
        });

        // The placeholder must exist before the first frame so drawing it
        // never allocates.
        let placeholder = mesh::upload_mesh(&device, "placeholder", &placeholder_mesh())
            .map_err(|e| anyhow::anyhow!("upload placeholder: {e}"))?;

        let aspect = config.width as f32 / config.height.max(1) as f32;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            max_dim,
            depth,
            mesh_pipeline,
            wire_pipeline,
            bg_pipeline,
            bg_bgl,
            bg_sampler,
            draw_buf,
            draw_bg,
            slots,
            placeholder: Arc::new(placeholder),
            cmds: Vec::new(),
            clear_rgb: CLEAR_DARK,
            proj: OrbitCamera::projection(aspect),
            wireframe: opts.wireframe,
            frame_index: 0,
        })
    }
}
