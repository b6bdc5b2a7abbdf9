//! Frame submission and readback.

use pitchview_core::Frame;

use super::RenderEngine;
use crate::buffer::update_buffer;
use crate::error::{RenderError, RenderResult};
use crate::uniforms::{DrawUniforms, FrameUniforms};

impl RenderEngine {
    /// Draws `frame` to the window surface and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, frame: &Frame) -> RenderResult<()> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.width, self.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return Ok(());
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return Ok(());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.prepare(frame);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });
        self.record(&mut encoder, &view, frame);
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Draws `frame` into an offscreen target and returns its pixels as
    /// tightly packed RGBA8 rows, top row first.
    pub fn render_to_image(&mut self, frame: &Frame) -> RenderResult<Vec<u8>> {
        let (width, height) = (self.width, self.height);
        let format = self.surface_config.format;

        let target = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        let bytes_per_row = Self::aligned_bytes_per_row(width);
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback buffer"),
            size: u64::from(bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        self.prepare(frame);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen encoder"),
            });
        self.record(&mut encoder, &view, frame);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|_| RenderError::BufferMapFailed)?
            .map_err(|_| RenderError::BufferMapFailed)?;

        // Copy data, removing row padding
        let data = buffer_slice.get_mapped_range();
        let row_bytes = (width * 4) as usize;
        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height {
            let start = (row * bytes_per_row) as usize;
            pixels.extend_from_slice(&data[start..start + row_bytes]);
        }
        drop(data);
        readback.unmap();

        if format == wgpu::TextureFormat::Bgra8Unorm {
            for pixel in pixels.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
        }

        Ok(pixels)
    }

    /// Calculates bytes per row with proper alignment for wgpu buffer copies.
    fn aligned_bytes_per_row(width: u32) -> u32 {
        let unaligned = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        unaligned.div_ceil(align) * align
    }

    /// Per-draw uniforms for `frame`, in draw order.
    ///
    /// Draws whose texture was never uploaded are shaded untextured.
    pub fn draw_uniforms(&self, frame: &Frame) -> Vec<DrawUniforms> {
        frame
            .items
            .iter()
            .map(|item| {
                let textured = self.is_texture_bound(item.texture);
                DrawUniforms::new(item, frame.view, self.texture_mode, textured)
            })
            .collect()
    }

    /// Writes the frame and per-draw uniforms.
    fn prepare(&mut self, frame: &Frame) {
        let frame_uniforms = FrameUniforms::new(self.projection.projection_matrix(), &self.lighting);
        update_buffer(&self.queue, &self.frame_buffer, &[frame_uniforms]);

        self.ensure_draw_capacity(frame.items.len());

        let stride = self.draw_stride as usize;
        let size = std::mem::size_of::<DrawUniforms>();
        let mut bytes = vec![0u8; stride * frame.items.len()];
        for (i, uniforms) in self.draw_uniforms(frame).iter().enumerate() {
            let start = i * stride;
            bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(uniforms));
        }
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.draw_buffer, 0, &bytes);
        }
    }

    /// Records the scene pass into `encoder`, drawing items in order.
    fn record(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, frame: &Frame) {
        let clear = frame.clear_color;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(clear.x),
                        g: f64::from(clear.y),
                        b: f64::from(clear.z),
                        a: f64::from(clear.w),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (i, item) in frame.items.iter().enumerate() {
            let Some(mesh) = self.meshes.get(&item.mesh) else {
                log::trace!("no buffers for '{}', skipped", item.label);
                continue;
            };
            let offset = (i as u64 * self.draw_stride) as u32;
            pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
            pass.set_bind_group(2, &self.texture_for(item.texture).bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
        }
    }
}
