//! Core logic for ps-utils-rs.
//!
//! This crate holds everything that does not touch a GUI backend:
//! - [`KeyRepeatHandler`] for debounced, lockable hotkeys
//! - [`VoxelSelectionBrush`] for brush-based selection over a voxel set
//! - Cube and bounding-box geometry used to build voxel meshes
//! - Choice tables, gizmo control modes and save-path helpers
//! - Configuration options and the shared error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Voxel coordinates and element indices are converted between i32/usize/f32 routinely
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod choice;
pub mod control_mode;
pub mod error;
pub mod geometry;
pub mod key_handler;
pub mod options;
pub mod save_utils;
pub mod voxel_set;

pub use choice::{Choice, ChoiceMap};
pub use control_mode::{key_control_mode, ControlMode, DEFAULT_CONTROL_KEYMAP};
pub use error::{PsUtilsError, Result};
pub use geometry::{bbox_wireframe, voxel_mesh, VoxelMesh};
pub use key_handler::{Key, KeyRepeatHandler, KeySource, DEFAULT_KEY_REPEAT_INTERVAL};
pub use options::{BrushOptions, ViewerOptions};
pub use voxel_set::{
    load_coords_json, BrushColors, BrushMode, BrushShape, HoverTarget, MeshElement,
    VoxelSelectionBrush,
};

// Re-export glam types for convenience
pub use glam::{IVec3, Mat4, UVec3, Vec2, Vec3, Vec4};
