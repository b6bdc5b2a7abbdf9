//! Core of pitchview.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`SceneConfig`] loaded from JSON
//! - [`WorldView`] camera state and the [`World`] that owns the scene
//! - quadric [`primitives`] and the hard-coded [`FixedScene`]
//! - [`ImportedScene`] model import
//!
//! A [`World`] produces a [`Frame`], a flat list of draws that the renderer
//! submits in order.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Mesh sizes never approach u32::MAX
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod error;
pub mod frame;
pub mod matrix_stack;
pub mod mesh;
pub mod model;
pub mod primitives;
pub mod scene;
pub mod view;
pub mod world;

pub use config::{
    CameraConfig, LightingConfig, ModelConfig, PrimitiveConfig, ProjectionConfig, SceneConfig,
    TextureConfig, TextureFilter, TextureMode, TextureSource, WindowConfig,
};
pub use error::{PitchviewError, Result};
pub use frame::{DrawItem, FixedMesh, Frame, MeshId, TextureBinding, TextureSlot};
pub use matrix_stack::MatrixStack;
pub use mesh::MeshData;
pub use model::{ImportedScene, ModelMaterial, ModelMesh};
pub use scene::FixedScene;
pub use view::WorldView;
pub use world::World;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
