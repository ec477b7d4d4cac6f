//! Error types for ps-utils-rs.

use glam::IVec3;
use thiserror::Error;

/// The main error type for ps-utils-rs operations.
#[derive(Error, Debug)]
pub enum PsUtilsError {
    /// A voxel coordinate lies outside the declared grid.
    #[error("voxel {index} at {coord} is outside the grid of resolution {resolution}")]
    InvalidCoordinate {
        index: usize,
        coord: IVec3,
        resolution: u32,
    },

    /// The grid resolution cannot hold any voxel.
    #[error("voxel grid resolution must be positive")]
    InvalidResolution,

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// User-provided text could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// An image could not be decoded.
    #[error("image error: {0}")]
    ImageError(String),

    /// Window or GPU setup failed.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for ps-utils-rs operations.
pub type Result<T> = std::result::Result<T, PsUtilsError>;
