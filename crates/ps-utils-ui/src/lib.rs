//! egui widgets for ps-utils-rs.
//!
//! Everything here is immediate-mode: call the widget every frame from your
//! viewer's `gui`/`scene` hooks and keep its state in your viewer struct.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Pixel and texel conversions between f32/usize/u8 are routine in UI code
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod alert;
pub mod buttons;
pub mod camera;
pub mod gizmo;
pub mod input;
pub mod integration;
pub mod panels;
pub mod render_buffer;
pub mod scene_view;
pub mod sliders;
pub mod thumbnail;
pub mod voxel_widget;

pub use alert::AlertHandler;
pub use buttons::{state_button, state_button_with_colors, IntPopup, SavePopup, StateButtonColors};
pub use camera::{Camera, ProjectionMode};
pub use gizmo::{slider_control_mode, TransformGizmo};
pub use input::{BrushInput, EguiKeys};
pub use integration::EguiIntegration;
pub use panels::{build_central_panel, build_left_panel};
pub use render_buffer::RenderBuffer;
pub use scene_view::{SceneHit, SceneLines, SceneMesh, SceneResponse, SceneView};
pub use sliders::{
    choice_combo, choice_slider, drag_n, enum_combo, enum_slider, exp_slider, input_n, slider_n,
    ExpRange,
};
pub use thumbnail::Thumbnail;
pub use voxel_widget::VoxelSetWidget;
