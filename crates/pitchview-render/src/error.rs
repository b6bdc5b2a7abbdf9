//! Rendering error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface supports no 8-bit linear RGBA or BGRA format.
    #[error("surface offers no 8-bit linear RGBA/BGRA format")]
    SurfaceConfigurationFailed,

    /// A texture image could not be read or decoded.
    #[error("failed to load texture '{}': {source}", path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Reading rendered pixels back from the GPU failed.
    #[error("GPU buffer mapping failed")]
    BufferMapFailed,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
