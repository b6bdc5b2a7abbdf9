//! Per-frame draw list handed to the renderer.

use glam::{Mat4, Vec4};

/// Scene texture table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Grass = 0,
    Plastic = 1,
}

impl TextureSlot {
    /// Number of scene textures.
    pub const COUNT: usize = 2;

    /// All slots in table order.
    pub const ALL: [TextureSlot; Self::COUNT] = [TextureSlot::Grass, TextureSlot::Plastic];

    /// Position in the texture table.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Shared meshes of the fixed scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedMesh {
    Ground,
    Post,
    Crossbar,
    Cap,
}

impl FixedMesh {
    pub const ALL: [FixedMesh; 4] = [
        FixedMesh::Ground,
        FixedMesh::Post,
        FixedMesh::Crossbar,
        FixedMesh::Cap,
    ];
}

/// Which mesh a draw refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Fixed(FixedMesh),
    /// Index into the imported scene's meshes.
    Model(usize),
}

/// Texture sampled by a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureBinding {
    Scene(TextureSlot),
    /// Diffuse texture of an imported material.
    Material(usize),
    None,
}

/// One mesh draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Human readable name, used in logs.
    pub label: String,
    pub mesh: MeshId,
    /// Model transform (object to world).
    pub transform: Mat4,
    /// Vertex colour; drives the ambient and diffuse material terms.
    pub color: Vec4,
    /// Specular colour, with the shininess exponent in `w`.
    pub specular: Vec4,
    pub texture: TextureBinding,
    /// Multiplier applied to texture coordinates.
    pub uv_scale: f32,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: Vec4,
    /// World-to-eye transform.
    pub view: Mat4,
    /// Draws in submission order.
    pub items: Vec<DrawItem>,
}
