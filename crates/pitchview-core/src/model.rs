//! Imported 3D model.
//!
//! Parsing is delegated to `tobj`; this module only converts its output into
//! [`MeshData`] and turns the meshes into draw items.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3, Vec4};

use crate::config::ModelConfig;
use crate::error::{PitchviewError, Result};
use crate::frame::{DrawItem, MeshId, TextureBinding};
use crate::matrix_stack::MatrixStack;
use crate::mesh::MeshData;

/// Surface properties read from the model's material library.
///
/// `Ka` is not kept: the ambient term follows the diffuse colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMaterial {
    pub name: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Diffuse texture, resolved against the model directory.
    pub diffuse_texture: Option<PathBuf>,
}

impl Default for ModelMaterial {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ZERO,
            shininess: 0.0,
            diffuse_texture: None,
        }
    }
}

impl ModelMaterial {
    fn from_tobj(material: &tobj::Material, directory: &Path) -> Self {
        let defaults = Self::default();
        Self {
            name: material.name.clone(),
            diffuse: material.diffuse.map_or(defaults.diffuse, Vec3::from),
            specular: material.specular.map_or(defaults.specular, Vec3::from),
            shininess: material.shininess.unwrap_or(defaults.shininess),
            diffuse_texture: material
                .diffuse_texture
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| directory.join(name)),
        }
    }
}

/// One mesh of the imported model.
#[derive(Debug, Clone)]
pub struct ModelMesh {
    pub name: String,
    pub data: MeshData,
    /// Index into [`ImportedScene::materials`].
    pub material: Option<usize>,
}

/// A model file loaded from disk.
#[derive(Debug, Clone)]
pub struct ImportedScene {
    directory: PathBuf,
    file_name: String,
    meshes: Vec<ModelMesh>,
    materials: Vec<ModelMaterial>,
}

impl ImportedScene {
    /// Imports `file_name` from `directory`.
    ///
    /// Faces are triangulated and attributes re-indexed to a single index
    /// buffer. Missing normals are computed; missing texture coordinates are
    /// set to zero. A broken material library is logged and ignored.
    pub fn load(directory: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        let path = directory.join(file_name);

        let (models, materials) = tobj::load_obj(
            &path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| PitchviewError::ModelLoad {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let materials: Vec<ModelMaterial> = match materials {
            Ok(materials) => materials
                .iter()
                .map(|m| ModelMaterial::from_tobj(m, &directory))
                .collect(),
            Err(e) => {
                log::warn!(
                    "materials for '{}' could not be loaded: {e}",
                    path.display()
                );
                Vec::new()
            }
        };

        let mut meshes = Vec::with_capacity(models.len());
        for (i, model) in models.into_iter().enumerate() {
            let name = if model.name.is_empty() {
                format!("mesh {i}")
            } else {
                model.name
            };
            let data = convert_mesh(&model.mesh);
            data.validate(&name)?;
            if data.is_empty() {
                log::debug!("skipping mesh '{name}' without faces");
                continue;
            }
            let material = model.mesh.material_id.filter(|&id| id < materials.len());
            meshes.push(ModelMesh {
                name,
                data,
                material,
            });
        }

        if meshes.is_empty() {
            return Err(PitchviewError::EmptyModel(path));
        }

        log::info!(
            "imported '{}': {} meshes, {} materials",
            path.display(),
            meshes.len(),
            materials.len()
        );

        Ok(Self {
            directory,
            file_name: file_name.to_string(),
            meshes,
            materials,
        })
    }

    /// Full path of the model file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn meshes(&self) -> &[ModelMesh] {
        &self.meshes
    }

    #[must_use]
    pub fn materials(&self) -> &[ModelMaterial] {
        &self.materials
    }

    /// Bounding box over all meshes.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .filter_map(|mesh| mesh.data.bounding_box())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Appends one draw per mesh, placed by `placement` under the stack's
    /// current transform.
    pub fn draw_items(
        &self,
        stack: &mut MatrixStack,
        placement: &ModelConfig,
        out: &mut Vec<DrawItem>,
    ) {
        stack.push();
        stack.translate(placement.translation);
        stack.rotate_xyz(
            placement.rotation.x,
            placement.rotation.y,
            placement.rotation.z,
        );
        stack.scale(Vec3::splat(placement.scale));

        let fallback = ModelMaterial::default();
        for (i, mesh) in self.meshes.iter().enumerate() {
            let material = mesh.material.map_or(&fallback, |id| &self.materials[id]);
            let texture = match mesh.material {
                Some(id) if material.diffuse_texture.is_some() => TextureBinding::Material(id),
                _ => TextureBinding::None,
            };
            out.push(DrawItem {
                label: mesh.name.clone(),
                mesh: MeshId::Model(i),
                transform: stack.top(),
                color: material_color(material),
                specular: material.specular.extend(material.shininess),
                texture,
                uv_scale: 1.0,
            });
        }

        stack.pop();
    }
}

fn convert_mesh(mesh: &tobj::Mesh) -> MeshData {
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();
    let count = positions.len();

    let tex_coords = if mesh.texcoords.len() / 2 == count {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| Vec2::new(t[0], t[1]))
            .collect()
    } else {
        vec![Vec2::ZERO; count]
    };

    let mut data = MeshData {
        positions,
        normals: Vec::new(),
        tex_coords,
        indices: mesh.indices.clone(),
    };

    if mesh.normals.len() / 3 == count && count > 0 {
        data.normals = mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]).normalize_or_zero())
            .collect();
    } else {
        data.compute_vertex_normals();
    }
    data
}

/// Colour used for draws of `material`, with full opacity.
#[must_use]
pub fn material_color(material: &ModelMaterial) -> Vec4 {
    material.diffuse.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tobj_mesh(positions: Vec<f32>, indices: Vec<u32>) -> tobj::Mesh {
        tobj::Mesh {
            positions,
            indices,
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_mesh_computes_missing_normals() {
        let mesh = tobj_mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        let data = convert_mesh(&mesh);
        assert_eq!(data.num_vertices(), 3);
        assert_eq!(data.tex_coords, vec![Vec2::ZERO; 3]);
        for n in &data.normals {
            assert!((*n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_convert_mesh_keeps_supplied_attributes() {
        let mut mesh = tobj_mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        mesh.normals = vec![0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0];
        mesh.texcoords = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let data = convert_mesh(&mesh);
        assert_eq!(data.normals, vec![Vec3::Z; 3]);
        assert_eq!(data.tex_coords[1], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_material_defaults_fill_gaps() {
        let material = tobj::Material {
            name: "leather".into(),
            diffuse: Some([1.0, 0.5, 0.25]),
            diffuse_texture: Some("leather.png".into()),
            ..Default::default()
        };
        let converted = ModelMaterial::from_tobj(&material, Path::new("models"));
        assert_eq!(converted.diffuse, Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(converted.specular, Vec3::ZERO);
        assert_eq!(converted.shininess, 0.0);
        assert_eq!(
            converted.diffuse_texture,
            Some(PathBuf::from("models/leather.png"))
        );
        assert_eq!(material_color(&converted), Vec4::new(1.0, 0.5, 0.25, 1.0));
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let err = ImportedScene::load("does/not/exist", "nothing.obj").unwrap_err();
        assert!(matches!(err, PitchviewError::ModelLoad { .. }));
    }
}
