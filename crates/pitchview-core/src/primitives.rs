//! Quadric primitives: cylinders, disks and flat quads.
//!
//! Cylinders run along +Z starting at the origin and disks lie in the z = 0
//! plane facing +Z. Triangles wind counter-clockwise seen from outside.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::mesh::MeshData;

/// Smallest usable number of subdivisions around an axis.
pub const MIN_SLICES: u32 = 3;

#[allow(clippy::cast_precision_loss)]
fn ratio(i: u32, n: u32) -> f32 {
    i as f32 / n as f32
}

/// Builds an open cylinder (or cone frustum) without end caps.
///
/// Texture coordinates wrap once around the axis (`s`) and once along it (`t`).
#[must_use]
pub fn cylinder(
    base_radius: f32,
    top_radius: f32,
    height: f32,
    slices: u32,
    stacks: u32,
) -> MeshData {
    let slices = slices.max(MIN_SLICES);
    let stacks = stacks.max(1);

    let vertex_count = ((slices + 1) * (stacks + 1)) as usize;
    let mut mesh = MeshData {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        tex_coords: Vec::with_capacity(vertex_count),
        indices: Vec::with_capacity((slices * stacks * 6) as usize),
    };

    // Slope of the side wall; zero for a straight cylinder.
    let slope = if height.abs() > f32::EPSILON {
        (base_radius - top_radius) / height
    } else {
        0.0
    };

    for stack in 0..=stacks {
        let t = ratio(stack, stacks);
        let z = height * t;
        let radius = base_radius + (top_radius - base_radius) * t;
        for slice in 0..=slices {
            let s = ratio(slice, slices);
            let (sin, cos) = (s * TAU).sin_cos();
            mesh.positions.push(Vec3::new(radius * cos, radius * sin, z));
            mesh.normals
                .push(Vec3::new(cos, sin, slope).normalize_or_zero());
            mesh.tex_coords.push(Vec2::new(s, t));
        }
    }

    let row = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * row + slice;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    mesh
}

/// Builds a flat annulus in the z = 0 plane; `inner_radius == 0` gives a disk.
#[must_use]
pub fn disk(inner_radius: f32, outer_radius: f32, slices: u32, loops: u32) -> MeshData {
    let slices = slices.max(MIN_SLICES);
    let loops = loops.max(1);
    let solid = inner_radius <= 0.0;

    let vertex_count = ((slices + 1) * (loops + 1)) as usize;
    let mut mesh = MeshData {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        tex_coords: Vec::with_capacity(vertex_count),
        indices: Vec::new(),
    };

    let tex_scale = if outer_radius > 0.0 {
        0.5 / outer_radius
    } else {
        0.0
    };

    for ring in 0..=loops {
        let radius = inner_radius + (outer_radius - inner_radius) * ratio(ring, loops);
        for slice in 0..=slices {
            let (sin, cos) = (ratio(slice, slices) * TAU).sin_cos();
            let p = Vec3::new(radius * cos, radius * sin, 0.0);
            mesh.positions.push(p);
            mesh.normals.push(Vec3::Z);
            mesh.tex_coords
                .push(Vec2::new(0.5 + p.x * tex_scale, 0.5 + p.y * tex_scale));
        }
    }

    let row = slices + 1;
    for ring in 0..loops {
        for slice in 0..slices {
            let a = ring * row + slice;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            // The innermost ring of a solid disk collapses to the centre.
            if !(solid && ring == 0) {
                mesh.indices.extend_from_slice(&[a, c, b]);
            }
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    mesh
}

/// Builds a quad from four corners given counter-clockwise.
#[must_use]
pub fn quad(corners: [Vec3; 4], tex_coords: [Vec2; 4], normal: Vec3) -> MeshData {
    MeshData {
        positions: corners.to_vec(),
        normals: vec![normal.normalize_or_zero(); 4],
        tex_coords: tex_coords.to_vec(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
