//! GPU-resident meshes and background textures.
//!
//! Both uploads run inside wgpu error scopes so allocation and validation
//! failures come back as `BackendError` instead of the uncaptured handler.
//! Buffers created before a failure are dropped with the partial value.

use lf_assets::{CpuMesh, TextureCpu};
use viewport_core::BackendError;
use wgpu::util::DeviceExt;

/// Compiled form of a `CpuMesh`: vertex + u32 index buffer.
#[derive(Debug)]
pub struct GpuMesh {
    pub vb: wgpu::Buffer,
    pub ib: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug)]
pub struct GpuTexture {
    _texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

fn scoped<T>(device: &wgpu::Device, f: impl FnOnce() -> T) -> (T, Option<wgpu::Error>) {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let out = f();
    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());
    (out, validation.or(oom))
}

pub fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &CpuMesh) -> Result<GpuMesh, BackendError> {
    if mesh.is_empty() {
        return Err(BackendError::CompileFailure(format!("{label}: no triangles")));
    }
    let index_count = u32::try_from(mesh.indices.len())
        .map_err(|_| BackendError::CompileFailure(format!("{label}: too many indices")))?;
    let vb_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
    let ib_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);
    let max = device.limits().max_buffer_size;
    if vb_bytes.len() as u64 > max || ib_bytes.len() as u64 > max {
        return Err(BackendError::CompileFailure(format!(
            "{label}: {} / {} bytes exceeds max buffer size {max}",
            vb_bytes.len(),
            ib_bytes.len()
        )));
    }
    let ((vb, ib), err) = scoped(device, || {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label}-vb").as_str()),
            contents: vb_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label}-ib").as_str()),
            contents: ib_bytes,
            usage: wgpu::BufferUsages::INDEX,
        });
        (vb, ib)
    });
    if let Some(e) = err {
        vb.destroy();
        ib.destroy();
        return Err(BackendError::CompileFailure(format!("{label}: {e}")));
    }
    Ok(GpuMesh { vb, ib, index_count })
}

pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    img: &TextureCpu,
) -> Result<GpuTexture, BackendError> {
    let max_dim = device.limits().max_texture_dimension_2d;
    if img.width == 0 || img.height == 0 || img.width > max_dim || img.height > max_dim {
        return Err(BackendError::Texture(format!(
            "{label}: unsupported size {}x{} (max {max_dim})",
            img.width, img.height
        )));
    }
    let expected = img.width as usize * img.height as usize * 4;
    if img.pixels.len() != expected {
        return Err(BackendError::Texture(format!(
            "{label}: {} bytes for {}x{} RGBA8",
            img.pixels.len(),
            img.width,
            img.height
        )));
    }
    let format = if img.srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let size = wgpu::Extent3d { width: img.width, height: img.height, depth_or_array_layers: 1 };
    let ((texture, bind_group), err) = scoped(device, || {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &img.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * img.width),
                rows_per_image: Some(img.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        (texture, bind_group)
    });
    if let Some(e) = err {
        texture.destroy();
        return Err(BackendError::Texture(format!("{label}: {e}")));
    }
    Ok(GpuTexture { _texture: texture, bind_group, width: img.width, height: img.height })
}
