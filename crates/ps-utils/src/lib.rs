//! ps-utils-rs: boilerplate-free interactive viewers for 3D visualization demos.
//!
//! Implement [`Viewer`] on your state, then hand it to [`run`]. The viewer
//! gets a left control panel, a central scene area, hotkeys with repeat and
//! locking, and widgets for voxel selection, popups, sliders, images and
//! transform gizmos.
//!
//! # Quick Start
//!
//! ```no_run
//! use ps_utils::*;
//!
//! struct Counter {
//!     clicks: u32,
//! }
//!
//! impl Viewer for Counter {
//!     fn gui(&mut self, ui: &mut egui::Ui, frame: &mut Frame<'_>) {
//!         show_fps(ui, frame);
//!         if ui.button("Click").clicked() || frame.keys.pressed(Key::Space) {
//!             self.clicks += 1;
//!         }
//!         ui.label(format!("clicks: {}", self.clicks));
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     run(Counter { clicks: 0 }, ViewerOptions::default().with_title("counter"))
//! }
//! ```
//!
//! # Testing viewers
//!
//! [`HeadlessRunner`] drives the same per-frame pipeline without a window,
//! from synthetic [`egui::RawInput`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
pub mod frame;
pub mod headless;

pub use egui;

pub use ps_utils_core::{
    bbox_wireframe, key_control_mode, load_coords_json, save_utils, voxel_mesh, BrushColors,
    BrushMode, BrushOptions, BrushShape, Choice, ChoiceMap, ControlMode, HoverTarget, IVec3, Key,
    KeyRepeatHandler, KeySource, Mat4, MeshElement, PsUtilsError, Result, UVec3, Vec2, Vec3, Vec4,
    ViewerOptions, VoxelMesh, VoxelSelectionBrush, DEFAULT_CONTROL_KEYMAP,
    DEFAULT_KEY_REPEAT_INTERVAL,
};

pub use ps_utils_ui::{
    choice_combo, choice_slider, drag_n, enum_combo, enum_slider, exp_slider, input_n,
    slider_control_mode, slider_n, state_button, state_button_with_colors, AlertHandler,
    BrushInput, Camera, ExpRange, IntPopup, ProjectionMode, RenderBuffer, SavePopup, SceneHit,
    SceneLines, SceneMesh, SceneResponse, SceneView, StateButtonColors, Thumbnail,
    TransformGizmo, VoxelSetWidget,
};

pub use frame::{frame_interval, show_fps, Frame, FrameClock, Viewer};
pub use headless::HeadlessRunner;

use winit::event_loop::EventLoop;

/// Opens a window and runs `viewer` until it is closed.
///
/// Escape closes the window unless a popup holds the hotkeys or a text
/// field has focus.
pub fn run<V: Viewer>(viewer: V, options: ViewerOptions) -> Result<()> {
    // a host binary may have set up its own logger already
    let _ = env_logger::try_init();

    let event_loop = EventLoop::new()
        .map_err(|e| PsUtilsError::RenderError(format!("failed to create event loop: {e}")))?;

    let mut app = app::App::new(viewer, options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| PsUtilsError::RenderError(format!("event loop error: {e}")))?;

    app.into_result()
}
