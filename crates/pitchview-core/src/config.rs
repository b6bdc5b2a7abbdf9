//! Scene configuration.
//!
//! Every section carries defaults matching the stock scene, so an empty JSON
//! object (or no file at all) yields a complete configuration.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PitchviewError, Result};

/// Top-level configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Image files used for the scene textures.
    pub textures: TextureConfig,
    /// Imported model location and placement.
    pub model: ModelConfig,
    /// Perspective projection parameters.
    pub projection: ProjectionConfig,
    /// Light source parameters.
    pub lighting: LightingConfig,
    /// Initial camera values and input step sizes.
    pub camera: CameraConfig,
    /// Tessellation of the goal primitives.
    pub primitives: PrimitiveConfig,
    /// How sampled texels combine with the lit colour.
    pub texture_mode: TextureMode,
    /// Background colour (RGBA).
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            textures: TextureConfig::default(),
            model: ModelConfig::default(),
            projection: ProjectionConfig::default(),
            lighting: LightingConfig::default(),
            camera: CameraConfig::default(),
            primitives: PrimitiveConfig::default(),
            texture_mode: TextureMode::Add,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from JSON text and validates it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the numeric parameters describe a usable scene.
    pub fn validate(&self) -> Result<()> {
        let projection = &self.projection;
        if !(projection.fov_y_degrees > 0.0 && projection.fov_y_degrees < 180.0) {
            return Err(PitchviewError::InvalidConfig(format!(
                "field of view must be within (0, 180) degrees, got {}",
                projection.fov_y_degrees
            )));
        }
        if projection.near <= 0.0 {
            return Err(PitchviewError::InvalidConfig(format!(
                "near plane must be positive, got {}",
                projection.near
            )));
        }
        if projection.far <= projection.near {
            return Err(PitchviewError::InvalidConfig(format!(
                "far plane ({}) must lie beyond near plane ({})",
                projection.far, projection.near
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(PitchviewError::InvalidConfig(
                "window size must be non-zero".into(),
            ));
        }

        let camera = &self.camera;
        if camera.min_distance > camera.max_distance {
            return Err(PitchviewError::InvalidConfig(format!(
                "camera distance bounds are reversed: {} > {}",
                camera.min_distance, camera.max_distance
            )));
        }
        if self.model.scale <= 0.0 {
            return Err(PitchviewError::InvalidConfig(format!(
                "model scale must be positive, got {}",
                self.model.scale
            )));
        }
        Ok(())
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "pitchview".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// Sampling filter for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Nearest texel.
    Nearest,
    /// Bilinear.
    #[default]
    Linear,
}

/// One texture source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSource {
    /// Image file, decoded by extension.
    pub path: PathBuf,
    /// Minification/magnification filter.
    #[serde(default)]
    pub filter: TextureFilter,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>, filter: TextureFilter) -> Self {
        Self {
            path: path.into(),
            filter,
        }
    }
}

/// Image files for the fixed scene textures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub grass: TextureSource,
    pub plastic: TextureSource,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            grass: TextureSource::new("assets/images/grass.ppm", TextureFilter::Linear),
            plastic: TextureSource::new("assets/images/plastic.ppm", TextureFilter::Nearest),
        }
    }
}

/// Location and placement of the imported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing the model and its material files.
    pub directory: PathBuf,
    /// Model file name inside `directory`.
    pub file_name: String,
    /// Translation applied before drawing the model.
    pub translation: Vec3,
    /// Rotation in degrees about X, then Y, then Z.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets/models"),
            file_name: "football.obj".to_string(),
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl ModelConfig {
    /// Full path of the model file.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.5,
            far: 20000.0,
        }
    }
}

/// A single positional light, given in eye space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Light position relative to the camera.
    pub position: Vec3,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Scene-wide ambient term added on top of the light.
    pub global_ambient: [f32; 4],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(40.0, 10.0, 10.0),
            ambient: [0.4, 0.4, 0.4, 1.0],
            diffuse: [0.3, 0.3, 0.3, 1.0],
            specular: [0.8, 0.8, 0.8, 1.0],
            global_ambient: [0.2, 0.2, 0.2, 1.0],
        }
    }
}

/// Initial camera values and input step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the camera to the scene origin at startup.
    pub initial_distance: f32,
    /// Degrees per rotation key press.
    pub rotation_step: f32,
    /// Units per distance key press or wheel notch.
    pub distance_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Degrees per pixel of mouse drag.
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_distance: 70.0,
            rotation_step: 5.0,
            distance_step: 5.0,
            min_distance: 1.0,
            max_distance: 10000.0,
            mouse_sensitivity: 0.25,
        }
    }
}

/// Tessellation of the quadric primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveConfig {
    /// Subdivisions around the axis.
    pub slices: u32,
    /// Subdivisions along a cylinder axis.
    pub stacks: u32,
    /// Concentric rings of a disk.
    pub loops: u32,
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            slices: 24,
            stacks: 1,
            loops: 1,
        }
    }
}

/// How a sampled texel is combined with the lit vertex colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureMode {
    /// Ignore the texture.
    None,
    /// `lit + texel`, clamped.
    #[default]
    Add,
    /// `lit * texel`.
    Modulate,
    /// Texel only.
    Replace,
}

impl TextureMode {
    /// Shader-side code for this mode.
    #[must_use]
    pub fn shader_code(self) -> u32 {
        match self {
            TextureMode::None => 0,
            TextureMode::Add => 1,
            TextureMode::Modulate => 2,
            TextureMode::Replace => 3,
        }
    }
}
