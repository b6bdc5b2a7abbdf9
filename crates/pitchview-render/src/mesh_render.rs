//! Mesh GPU rendering resources.

use pitchview_core::MeshData;

use crate::buffer::{create_index_buffer, create_vertex_buffer};

/// Interleaved vertex layout shared by every mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout matching the scene shader's inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Interleaves the attributes of `mesh`.
#[must_use]
pub fn interleave(mesh: &MeshData) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.tex_coords)
        .map(|((p, n), t)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
            tex_coord: t.to_array(),
        })
        .collect()
}

/// GPU buffers for one mesh.
pub struct MeshRenderData {
    /// Interleaved vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer (triangle indices).
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub num_indices: u32,
}

impl MeshRenderData {
    /// Uploads `mesh` to new vertex and index buffers.
    pub fn new(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertices = interleave(mesh);
        let vertex_buffer = create_vertex_buffer(device, &vertices, Some(label));
        let index_buffer = create_index_buffer(device, &mesh.indices, Some(label));
        Self {
            vertex_buffer,
            index_buffer,
            num_indices: mesh.indices.len() as u32,
        }
    }
}
