//! Scene textures: decoding with a CPU-built mip chain, and GPU upload.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use pitchview_core::TextureFilter;

use crate::error::{RenderError, RenderResult};

/// Decoded RGBA8 image with its full mip chain.
///
/// Rows are stored bottom-up, so texture coordinate (0, 0) addresses the
/// lower-left corner of the source image.
#[derive(Debug, Clone)]
pub struct TextureImage {
    levels: Vec<RgbaImage>,
}

impl TextureImage {
    /// Decodes an image file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| RenderError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "decoded texture '{}' ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_rgba(image.flipv().to_rgba8()))
    }

    /// Builds the mip chain for an already flipped RGBA image.
    #[must_use]
    pub fn from_rgba(base: RgbaImage) -> Self {
        let mut levels = vec![base];
        loop {
            let last = &levels[levels.len() - 1];
            let (w, h) = last.dimensions();
            if w <= 1 && h <= 1 {
                break;
            }
            let next = imageops::resize(last, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle);
            levels.push(next);
        }
        Self { levels }
    }

    /// A single opaque white texel.
    #[must_use]
    pub fn white() -> Self {
        Self::from_rgba(RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255])))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.levels[0].width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.levels[0].height()
    }

    /// Number of mip levels, including the base image.
    #[must_use]
    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Mip levels from largest to smallest.
    #[must_use]
    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }
}

/// Bind group layout for a texture and its sampler (group 2).
pub fn create_texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("texture bind group layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
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

fn filter_mode(filter: TextureFilter) -> wgpu::FilterMode {
    match filter {
        TextureFilter::Nearest => wgpu::FilterMode::Nearest,
        TextureFilter::Linear => wgpu::FilterMode::Linear,
    }
}

/// A texture uploaded to the GPU, ready to bind.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Uploads every mip level of `image` and creates a repeating sampler.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &TextureImage,
        filter: TextureFilter,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: image.mip_level_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, pixels) in image.levels().iter().enumerate() {
            let (width, height) = pixels.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                pixels.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mode = filter_mode(filter);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: mode,
            min_filter: mode,
            mipmap_filter: mode,
            ..Default::default()
        });

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
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            sampler,
            bind_group,
        }
    }
}
