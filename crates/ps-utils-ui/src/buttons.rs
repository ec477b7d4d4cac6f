//! Buttons and modal prompts.

use std::path::{Path, PathBuf};

use egui::{Color32, DragValue, Id, Modal, Ui};
use ps_utils_core::KeyRepeatHandler;

/// Normal, hovered and pressed fills of a [`state_button`] in one state.
pub type ButtonFills = [Color32; 3];

pub const GREEN_FILLS: ButtonFills = [
    Color32::from_rgb(51, 179, 51),
    Color32::from_rgb(77, 204, 77),
    Color32::from_rgb(26, 153, 26),
];

pub const RED_FILLS: ButtonFills = [
    Color32::from_rgb(179, 51, 51),
    Color32::from_rgb(204, 77, 77),
    Color32::from_rgb(153, 26, 26),
];

/// Colours of a two-state button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateButtonColors {
    /// Fills while the state is on (the button offers to turn it off).
    pub enabled: ButtonFills,
    /// Fills while the state is off.
    pub disabled: ButtonFills,
}

impl Default for StateButtonColors {
    fn default() -> Self {
        Self {
            enabled: RED_FILLS,
            disabled: GREEN_FILLS,
        }
    }
}

/// A button that flips `value` when clicked.
///
/// Shows `enabled_label` on red while `value` is true, `disabled_label` on
/// green otherwise. Returns whether it was clicked.
pub fn state_button(
    ui: &mut Ui,
    value: &mut bool,
    enabled_label: &str,
    disabled_label: &str,
) -> bool {
    state_button_with_colors(
        ui,
        value,
        enabled_label,
        disabled_label,
        StateButtonColors::default(),
    )
}

/// [`state_button`] with custom colours.
pub fn state_button_with_colors(
    ui: &mut Ui,
    value: &mut bool,
    enabled_label: &str,
    disabled_label: &str,
    colors: StateButtonColors,
) -> bool {
    let ([normal, hovered, active], label) = if *value {
        (colors.enabled, enabled_label)
    } else {
        (colors.disabled, disabled_label)
    };

    let clicked = ui
        .scope(|ui| {
            let widgets = &mut ui.visuals_mut().widgets;
            widgets.inactive.weak_bg_fill = normal;
            widgets.hovered.weak_bg_fill = hovered;
            widgets.active.weak_bg_fill = active;
            ui.button(label).clicked()
        })
        .inner;

    if clicked {
        *value = !*value;
    }
    clicked
}

/// Outcome of one frame of a modal prompt.
enum PromptAction {
    None,
    Confirm,
    Cancel,
}

/// Closes a prompt on Confirm or Cancel and releases its key lock.
///
/// Returns true only when the prompt was confirmed.
fn finish_prompt(
    action: PromptAction,
    open: &mut bool,
    name: &str,
    keys: &mut KeyRepeatHandler,
) -> bool {
    if matches!(action, PromptAction::None) {
        return false;
    }
    *open = false;
    keys.unlock(name);
    matches!(action, PromptAction::Confirm)
}

/// A "Save" button that opens a modal asking for a target path.
///
/// While the modal is open the key handler is locked under the popup name so
/// typing a path does not trigger hotkeys.
#[derive(Debug, Clone)]
pub struct SavePopup {
    name: String,
    path: String,
    open: bool,
    pub save_label: String,
    pub confirm_label: String,
    /// Warn when the target already exists.
    pub show_warning: bool,
}

impl SavePopup {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            open: false,
            save_label: "Save".to_string(),
            confirm_label: "Confirm".to_string(),
            show_warning: true,
        }
    }

    #[must_use]
    pub fn with_labels(
        mut self,
        save_label: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        self.save_label = save_label.into();
        self.confirm_label = confirm_label.into();
        self
    }

    /// The path currently entered.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draws the button and, when open, the modal.
    ///
    /// Returns the confirmed path on the frame the user confirms (button or Enter).
    pub fn show(&mut self, ui: &mut Ui, keys: &mut KeyRepeatHandler) -> Option<PathBuf> {
        if ui.button(&self.save_label).clicked() && !self.open {
            self.open = true;
            keys.lock(self.name.clone());
        }
        if !self.open {
            return None;
        }

        let ctx = ui.ctx().clone();
        let mut action = PromptAction::None;
        let response = Modal::new(Id::new(("save_popup", &self.name))).show(&ctx, |ui| {
            ui.label(&self.name);
            ui.horizontal(|ui| {
                ui.label("path");
                ui.text_edit_singleline(&mut self.path);
            });

            if self.show_warning && Path::new(&self.path).exists() {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    "Warning: a file already exists at this location!",
                );
            }

            ui.horizontal(|ui| {
                if ui.button(&self.confirm_label).clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    action = PromptAction::Confirm;
                } else if ui.button("Cancel").clicked() {
                    action = PromptAction::Cancel;
                }
            });
        });

        if matches!(action, PromptAction::None) && response.should_close() {
            action = PromptAction::Cancel;
        }
        finish_prompt(action, &mut self.open, &self.name, keys)
            .then(|| PathBuf::from(&self.path))
    }
}

/// A button that opens a modal asking for an integer.
#[derive(Debug, Clone)]
pub struct IntPopup {
    name: String,
    value: i64,
    open: bool,
    pub value_name: String,
    pub button_label: String,
    pub confirm_label: String,
}

impl IntPopup {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            open: false,
            value_name: "N".to_string(),
            button_label: "Add".to_string(),
            confirm_label: "Confirm".to_string(),
        }
    }

    #[must_use]
    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = label.into();
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draws the button and, when open, the modal.
    ///
    /// Returns the confirmed value on the frame the user confirms.
    pub fn show(&mut self, ui: &mut Ui, keys: &mut KeyRepeatHandler) -> Option<i64> {
        if ui.button(&self.button_label).clicked() && !self.open {
            self.open = true;
            keys.lock(self.name.clone());
        }
        if !self.open {
            return None;
        }

        let ctx = ui.ctx().clone();
        let mut action = PromptAction::None;
        let response = Modal::new(Id::new(("int_popup", &self.name))).show(&ctx, |ui| {
            ui.label(&self.name);
            ui.horizontal(|ui| {
                ui.label(&self.value_name);
                ui.add(DragValue::new(&mut self.value));
            });
            ui.horizontal(|ui| {
                if ui.button(&self.confirm_label).clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    action = PromptAction::Confirm;
                } else if ui.button("Cancel").clicked() {
                    action = PromptAction::Cancel;
                }
            });
        });

        if matches!(action, PromptAction::None) && response.should_close() {
            action = PromptAction::Cancel;
        }
        finish_prompt(action, &mut self.open, &self.name, keys).then_some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ui(
        ctx: &egui::Context,
        raw: egui::RawInput,
        mut add_contents: impl FnMut(&mut Ui),
    ) {
        ctx.begin_pass(raw);
        egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        let _ = ctx.end_pass();
    }

    #[test]
    fn test_state_button_unclicked_keeps_value() {
        let ctx = egui::Context::default();
        let mut value = true;
        let mut clicked = true;
        run_ui(&ctx, egui::RawInput::default(), |ui| {
            clicked = state_button(ui, &mut value, "Stop", "Train");
        });
        assert!(!clicked);
        assert!(value);
    }

    #[test]
    fn test_save_popup_finish_releases_lock() {
        let mut keys = KeyRepeatHandler::default();
        let mut popup = SavePopup::new("Save##test", "out.txt");
        popup.open = true;
        keys.lock("Save##test");

        let pending = finish_prompt(PromptAction::None, &mut popup.open, &popup.name, &mut keys);
        assert!(!pending);
        assert!(popup.is_open());
        assert!(keys.is_locked());

        let confirmed =
            finish_prompt(PromptAction::Confirm, &mut popup.open, &popup.name, &mut keys);
        assert!(confirmed);
        assert!(!popup.is_open());
        assert!(!keys.is_locked());
    }

    #[test]
    fn test_int_popup_releases_lock_on_confirm_and_cancel() {
        let mut keys = KeyRepeatHandler::default();
        let mut popup = IntPopup::new("number", 7);

        for (action, confirmed) in [(PromptAction::Confirm, true), (PromptAction::Cancel, false)] {
            popup.open = true;
            keys.lock("number");
            keys.lock("other");

            assert_eq!(
                finish_prompt(action, &mut popup.open, &popup.name, &mut keys),
                confirmed
            );
            assert!(!popup.is_open());
            assert!(!keys.is_locked_by("number"));
            assert!(keys.is_locked_by("other"));

            keys.unlock("other");
            assert!(!keys.is_locked());
        }
    }

    #[test]
    fn test_closed_popups_draw_only_their_button() {
        let ctx = egui::Context::default();
        let mut keys = KeyRepeatHandler::default();
        let mut save = SavePopup::new("save", "out.txt").with_labels("Save Message", "Sure?");
        let mut number = IntPopup::new("number", 3).with_button_label("Choose a Number");

        let mut results = (None, None);
        run_ui(&ctx, egui::RawInput::default(), |ui| {
            results = (save.show(ui, &mut keys), number.show(ui, &mut keys));
        });

        assert_eq!(results, (None, None));
        assert!(!keys.is_locked());
        assert_eq!(number.value(), 3);
        assert_eq!(save.path(), "out.txt");
    }
}
