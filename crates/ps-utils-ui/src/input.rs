//! Bridges egui input state to the core input traits.

use egui::InputState;
use ps_utils_core::{Key, KeySource};

/// Wheel travel, in points, reported by egui for one mouse-wheel notch.
const POINTS_PER_NOTCH: f32 = 50.0;

/// [`KeySource`] view over an egui frame's input.
pub struct EguiKeys<'a>(pub &'a InputState);

impl KeySource for EguiKeys<'_> {
    fn is_key_down(&self, key: Key) -> bool {
        match to_egui_key(key) {
            Some(egui_key) => self.0.key_down(egui_key),
            // egui folds left/right modifiers together
            None => match key {
                Key::RightShift => self.0.modifiers.shift,
                Key::RightCtrl => self.0.modifiers.ctrl,
                _ => false,
            },
        }
    }
}

/// Maps a supported key to egui's key enum. Modifier keys have no egui key.
pub fn to_egui_key(key: Key) -> Option<egui::Key> {
    let egui_key = match key {
        Key::Space => egui::Key::Space,
        Key::Num1 => egui::Key::Num1,
        Key::A => egui::Key::A,
        Key::B => egui::Key::B,
        Key::D => egui::Key::D,
        Key::E => egui::Key::E,
        Key::F => egui::Key::F,
        Key::G => egui::Key::G,
        Key::H => egui::Key::H,
        Key::I => egui::Key::I,
        Key::J => egui::Key::J,
        Key::K => egui::Key::K,
        Key::M => egui::Key::M,
        Key::N => egui::Key::N,
        Key::O => egui::Key::O,
        Key::P => egui::Key::P,
        Key::Q => egui::Key::Q,
        Key::R => egui::Key::R,
        Key::S => egui::Key::S,
        Key::T => egui::Key::T,
        Key::U => egui::Key::U,
        Key::Y => egui::Key::Y,
        Key::Z => egui::Key::Z,
        Key::ArrowLeft => egui::Key::ArrowLeft,
        Key::ArrowRight => egui::Key::ArrowRight,
        Key::ArrowUp => egui::Key::ArrowUp,
        Key::ArrowDown => egui::Key::ArrowDown,
        Key::PageUp => egui::Key::PageUp,
        Key::PageDown => egui::Key::PageDown,
        Key::Enter => egui::Key::Enter,
        Key::RightShift | Key::RightCtrl => return None,
    };
    Some(egui_key)
}

/// Pointer state a voxel brush reacts to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrushInput {
    /// The brush modifier (Alt) is held.
    pub modifier: bool,
    /// The primary mouse button is held.
    pub primary_down: bool,
    /// Mouse-wheel travel this frame, in notches.
    pub wheel_notches: f32,
}

impl BrushInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            modifier: input.modifiers.alt,
            primary_down: input.pointer.primary_down(),
            wheel_notches: input.raw_scroll_delta.y / POINTS_PER_NOTCH,
        }
    }
}
