//! Texture and mesh uploads.

use pitchview_core::{
    FixedMesh, ImportedScene, MeshId, TextureBinding, TextureConfig, TextureFilter, TextureSlot,
    World,
};

use super::RenderEngine;
use crate::error::RenderResult;
use crate::mesh_render::MeshRenderData;
use crate::texture::{GpuTexture, TextureImage};

impl RenderEngine {
    /// Decodes and uploads the scene textures named in `config`.
    pub fn load_textures(&mut self, config: &TextureConfig) -> RenderResult<()> {
        for slot in TextureSlot::ALL {
            let source = match slot {
                TextureSlot::Grass => &config.grass,
                TextureSlot::Plastic => &config.plastic,
            };
            let image = TextureImage::load(&source.path)?;
            let label = format!("{slot:?} texture");
            let texture = GpuTexture::new(
                &self.device,
                &self.queue,
                &self.pipeline.texture_layout,
                &image,
                source.filter,
                &label,
            );
            log::info!(
                "loaded {label} from '{}' ({}x{}, {} mips)",
                source.path.display(),
                image.width(),
                image.height(),
                image.mip_level_count()
            );
            self.scene_textures[slot.index()] = Some(texture);
        }
        Ok(())
    }

    /// Uploads the fixed scene meshes and the imported model.
    pub fn upload_scene(&mut self, world: &World) {
        for id in FixedMesh::ALL {
            let mesh = world.fixed_scene().mesh(id);
            let data = MeshRenderData::new(&self.device, mesh, &format!("{id:?} mesh"));
            self.meshes.insert(MeshId::Fixed(id), data);
        }
        self.upload_model(world.scene());
    }

    /// Replaces the buffers and material textures of the imported model.
    ///
    /// Material textures that fail to load are logged; their meshes draw
    /// untextured.
    pub fn upload_model(&mut self, scene: Option<&ImportedScene>) {
        self.meshes.retain(|id, _| matches!(id, MeshId::Fixed(_)));
        self.material_textures.clear();

        let Some(scene) = scene else {
            return;
        };

        for (i, mesh) in scene.meshes().iter().enumerate() {
            let data = MeshRenderData::new(&self.device, &mesh.data, &mesh.name);
            self.meshes.insert(MeshId::Model(i), data);
        }

        for (i, material) in scene.materials().iter().enumerate() {
            let Some(path) = &material.diffuse_texture else {
                continue;
            };
            match TextureImage::load(path) {
                Ok(image) => {
                    let texture = GpuTexture::new(
                        &self.device,
                        &self.queue,
                        &self.pipeline.texture_layout,
                        &image,
                        TextureFilter::Linear,
                        &material.name,
                    );
                    self.material_textures.insert(i, texture);
                }
                Err(e) => log::warn!("material '{}': {e}", material.name),
            }
        }

        log::debug!(
            "uploaded model '{}': {} meshes, {} material textures",
            scene.path().display(),
            scene.meshes().len(),
            self.material_textures.len()
        );
    }

    /// Whether `binding` names a texture that has been uploaded.
    pub fn is_texture_bound(&self, binding: TextureBinding) -> bool {
        match binding {
            TextureBinding::Scene(slot) => self.scene_textures[slot.index()].is_some(),
            TextureBinding::Material(id) => self.material_textures.contains_key(&id),
            TextureBinding::None => false,
        }
    }

    /// Texture bound for `binding`, falling back to plain white.
    pub(crate) fn texture_for(&self, binding: TextureBinding) -> &GpuTexture {
        let texture = match binding {
            TextureBinding::Scene(slot) => self.scene_textures[slot.index()].as_ref(),
            TextureBinding::Material(id) => self.material_textures.get(&id),
            TextureBinding::None => None,
        };
        texture.unwrap_or(&self.fallback_texture)
    }
}
