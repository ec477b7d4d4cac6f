//! Transform gizmo control modes and their hotkeys.

use crate::choice::Choice;
use crate::key_handler::{Key, KeyRepeatHandler};

/// Which handles a transform gizmo shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Translation arrows only.
    Translation,
    /// Rotation rings only.
    Rotation,
    /// Translation arrows and rotation rings together.
    #[default]
    TranslationRotation,
    /// Scale handles.
    Scale,
}

impl ControlMode {
    pub fn translates(self) -> bool {
        matches!(
            self,
            ControlMode::Translation | ControlMode::TranslationRotation
        )
    }

    pub fn rotates(self) -> bool {
        matches!(self, ControlMode::Rotation | ControlMode::TranslationRotation)
    }

    pub fn scales(self) -> bool {
        self == ControlMode::Scale
    }
}

impl Choice for ControlMode {
    const ALL: &'static [Self] = &[
        ControlMode::Translation,
        ControlMode::Rotation,
        ControlMode::TranslationRotation,
        ControlMode::Scale,
    ];

    fn label(self) -> &'static str {
        match self {
            ControlMode::Translation => "translation",
            ControlMode::Rotation => "rotation",
            ControlMode::TranslationRotation => "translation_rotation",
            ControlMode::Scale => "scale",
        }
    }
}

/// Default hotkeys: `t` translate, `r` rotate, `e` both, `s` scale.
pub const DEFAULT_CONTROL_KEYMAP: [(Key, ControlMode); 4] = [
    (Key::T, ControlMode::Translation),
    (Key::R, ControlMode::Rotation),
    (Key::E, ControlMode::TranslationRotation),
    (Key::S, ControlMode::Scale),
];

/// Returns the mode whose hotkey fired this frame, if any.
///
/// When several hotkeys fire together the last one in `keymap` wins.
pub fn key_control_mode(
    keys: &KeyRepeatHandler,
    keymap: &[(Key, ControlMode)],
) -> Option<ControlMode> {
    keymap
        .iter()
        .filter(|(key, _)| keys.pressed(*key))
        .map(|&(_, mode)| mode)
        .last()
}
