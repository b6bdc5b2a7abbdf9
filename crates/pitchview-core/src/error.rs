//! Error types for pitchview.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for pitchview scene operations.
#[derive(Error, Debug)]
pub enum PitchviewError {
    /// The model importer rejected the file.
    #[error("failed to import model '{}': {message}", path.display())]
    ModelLoad { path: PathBuf, message: String },

    /// The model file was read but contained no meshes.
    #[error("model '{}' contains no meshes", .0.display())]
    EmptyModel(PathBuf),

    /// A mesh referenced a vertex that does not exist.
    #[error("mesh '{mesh}' references vertex {index} but only has {count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        count: usize,
    },

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for pitchview operations.
pub type Result<T> = std::result::Result<T, PitchviewError>;
