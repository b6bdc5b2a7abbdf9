//! CPU-side triangle mesh data.

use glam::{Vec2, Vec3};

use crate::error::{PitchviewError, Result};

/// Indexed triangle mesh with per-vertex normals and texture coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    /// Triangle list, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

impl MeshData {
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the axis-aligned bounding box, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Checks that attribute arrays line up and indices are in range.
    pub fn validate(&self, name: &str) -> Result<()> {
        let count = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(PitchviewError::IndexOutOfRange {
                mesh: name.to_string(),
                index,
                count,
            });
        }
        if self.normals.len() != count || self.tex_coords.len() != count {
            return Err(PitchviewError::InvalidConfig(format!(
                "mesh '{name}' has {count} positions, {} normals and {} texture coordinates",
                self.normals.len(),
                self.tex_coords.len()
            )));
        }
        Ok(())
    }

    /// Recomputes vertex normals as the area-weighted average of incident
    /// face normals.
    pub fn compute_vertex_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let e1 = self.positions[b] - self.positions[a];
            let e2 = self.positions[c] - self.positions[a];
            // Cross product length is twice the area, so this is already area-weighted.
            let weighted = e1.cross(e2);
            self.normals[a] += weighted;
            self.normals[b] += weighted;
            self.normals[c] += weighted;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }
}
