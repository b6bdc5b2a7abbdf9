//! Uniform blocks of the scene shader.
//!
//! Layouts must match `shaders/scene.wgsl` exactly.

use glam::{Mat4, Vec4};

use pitchview_core::{DrawItem, LightingConfig, TextureBinding, TextureMode};

/// Per-frame uniforms (144 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub proj: [[f32; 4]; 4],
    /// Light position in eye space (w = 1).
    pub light_position: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub global_ambient: [f32; 4],
}

impl FrameUniforms {
    /// Packs the projection and the light. The light position is taken as
    /// already being in eye space.
    #[must_use]
    pub fn new(proj: Mat4, lighting: &LightingConfig) -> Self {
        Self {
            proj: proj.to_cols_array_2d(),
            light_position: lighting.position.extend(1.0).to_array(),
            light_ambient: lighting.ambient,
            light_diffuse: lighting.diffuse,
            light_specular: lighting.specular,
            global_ambient: lighting.global_ambient,
        }
    }
}

/// Per-draw uniforms (176 bytes), addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct DrawUniforms {
    pub model_view: [[f32; 4]; 4],
    /// Inverse transpose of the model-view matrix.
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// Material specular colour; `w` holds the shininess exponent.
    pub specular: [f32; 4],
    /// 0 = none, 1 = add, 2 = modulate, 3 = replace
    pub texture_mode: u32,
    pub uv_scale: f32,
    pub _pad: [f32; 2],
}

impl DrawUniforms {
    /// Builds the uniforms for `item` seen through `view`.
    ///
    /// `textured` tells whether the item's texture is actually bound; when
    /// it is not, or the item names no texture, texturing is switched off.
    #[must_use]
    pub fn new(item: &DrawItem, view: Mat4, mode: TextureMode, textured: bool) -> Self {
        let model_view = view * item.transform;
        let mode = match item.texture {
            TextureBinding::Scene(_) | TextureBinding::Material(_) if textured => mode,
            _ => TextureMode::None,
        };
        Self {
            model_view: model_view.to_cols_array_2d(),
            normal_matrix: normal_matrix(model_view).to_cols_array_2d(),
            color: item.color.to_array(),
            specular: item.specular.to_array(),
            texture_mode: mode.shader_code(),
            uv_scale: item.uv_scale,
            _pad: [0.0; 2],
        }
    }
}

/// Inverse transpose of the upper 3x3, so scaled normals stay perpendicular.
#[must_use]
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    let inverse = model_view.inverse();
    if inverse.is_finite() {
        let m = inverse.transpose();
        Mat4::from_cols(
            m.x_axis.truncate().extend(0.0),
            m.y_axis.truncate().extend(0.0),
            m.z_axis.truncate().extend(0.0),
            Vec4::W,
        )
    } else {
        Mat4::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pitchview_core::{FixedMesh, MeshId, TextureSlot};

    fn item(texture: TextureBinding) -> DrawItem {
        DrawItem {
            label: "test".into(),
            mesh: MeshId::Fixed(FixedMesh::Post),
            transform: Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)),
            color: Vec4::ONE,
            specular: Vec4::ZERO,
            texture,
            uv_scale: 20.0,
        }
    }

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 144);
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 176);
    }

    #[test]
    fn test_untextured_draw_disables_texturing() {
        let u = DrawUniforms::new(
            &item(TextureBinding::None),
            Mat4::IDENTITY,
            TextureMode::Add,
            true,
        );
        assert_eq!(u.texture_mode, 0);

        let u = DrawUniforms::new(
            &item(TextureBinding::Scene(TextureSlot::Grass)),
            Mat4::IDENTITY,
            TextureMode::Add,
            true,
        );
        assert_eq!(u.texture_mode, 1);
        assert_eq!(u.uv_scale, 20.0);
    }

    #[test]
    fn test_unbound_texture_disables_texturing() {
        for mode in [TextureMode::Add, TextureMode::Modulate, TextureMode::Replace] {
            let u = DrawUniforms::new(
                &item(TextureBinding::Material(0)),
                Mat4::IDENTITY,
                mode,
                false,
            );
            assert_eq!(u.texture_mode, 0);
            assert_eq!(u.color, [1.0; 4]);
        }
    }

    #[test]
    fn test_normal_matrix_undoes_nonuniform_scale() {
        let m = normal_matrix(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        let n = m.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!((n - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let m = normal_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, -70.0)));
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn test_light_position_is_homogeneous() {
        let u = FrameUniforms::new(Mat4::IDENTITY, &LightingConfig::default());
        assert_eq!(u.light_position, [40.0, 10.0, 10.0, 1.0]);
    }
}
