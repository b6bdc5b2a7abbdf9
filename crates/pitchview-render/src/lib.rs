//! Rendering backend for pitchview.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - GPU resource management (buffers, textures, the scene pipeline)
//! - The lit, textured scene shader (WGSL)
//! - Texture decoding with mipmaps
//! - Offscreen readback and screenshots

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod camera;
pub mod engine;
pub mod error;
pub mod mesh_render;
pub mod pipeline;
pub mod screenshot;
pub mod texture;
pub mod uniforms;

pub use camera::Projection;
pub use engine::RenderEngine;
pub use error::{RenderError, RenderResult};
pub use mesh_render::{MeshRenderData, Vertex};
pub use pipeline::{ScenePipeline, DEPTH_FORMAT};
pub use screenshot::{save_image, save_to_buffer, ScreenshotError};
pub use texture::{GpuTexture, TextureImage};
pub use uniforms::{DrawUniforms, FrameUniforms};
