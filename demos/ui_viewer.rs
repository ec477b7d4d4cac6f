//! Demo showing every pure UI widget: state buttons, multi-value sliders,
//! the exponential slider, choice widgets, alerts and popups.
//!
//! Run with: `cargo run --example ui_viewer`

use ps_utils::egui::{self, Color32, Ui};
use ps_utils::save_utils::save_text;
use ps_utils::*;

struct UiViewer {
    state_value: bool,
    slider_values: [i32; 3],
    exp_value: f64,
    resolution: u32,
    animal: String,
    resolutions: ChoiceMap<u32>,
    animals: ChoiceMap<String>,
    control_mode: ControlMode,
    alert: AlertHandler,
    save_popup: SavePopup,
    save_message: String,
    number_popup: IntPopup,
}

impl UiViewer {
    fn new() -> Self {
        Self {
            state_value: false,
            slider_values: [0, 1, 2],
            exp_value: 2.3e-4,
            resolution: 32,
            animal: "bunny".to_string(),
            resolutions: ChoiceMap::new((0..12).map(|i| 1u32 << i)),
            animals: ChoiceMap::new(["cat", "dog", "bunny", "turtle"].map(String::from)),
            control_mode: ControlMode::default(),
            alert: AlertHandler::default().with_background(Color32::from_rgb(200, 30, 30)),
            save_popup: SavePopup::new("Save Message", "saved_message.txt")
                .with_labels("Save Message", "Are you sure?"),
            save_message: "Write a poem here...".to_string(),
            number_popup: IntPopup::new("Number Popup", 1)
                .with_button_label("Choose a Number"),
        }
    }

    fn sliders(&mut self, ui: &mut Ui) {
        ui.label("Multi-input sliders");
        slider_n(ui, "Slider3", &mut self.slider_values, 0..=50);
        drag_n(ui, "Drag3", &mut self.slider_values, 0..=50);
        input_n(ui, "Input3", &mut self.slider_values, 0..=50, 1.0, 3);

        ui.separator();
        ui.label("Exponential Slider");
        exp_slider(ui, "Exp Slider", &mut self.exp_value, ExpRange::default());

        ui.separator();
        ui.label("Choice Components");
        choice_slider(ui, "ChoiceSlider1", &mut self.resolution, &self.resolutions);
        choice_slider(ui, "ChoiceSlider2", &mut self.animal, &self.animals);
        choice_combo(ui, "ChoiceCombo1", &mut self.resolution, &self.resolutions);
        choice_combo(ui, "ChoiceCombo2", &mut self.animal, &self.animals);
        enum_combo(ui, "Control Mode", &mut self.control_mode);
    }

    fn popups(&mut self, ui: &mut Ui, keys: &mut KeyRepeatHandler) {
        ui.label("Alerts");
        ui.horizontal(|ui| {
            for (i, message) in ["ALERT", "WARNING", "CHILL"].into_iter().enumerate() {
                if ui.button(format!("Message {}", i + 1)).clicked() {
                    self.alert.trigger(message);
                }
            }
        });

        ui.separator();
        ui.label("Save");
        if let Some(path) = self.save_popup.show(ui, keys) {
            if let Err(e) = save_text(&path, &self.save_message) {
                self.alert.trigger(format!(
                    "Could not save the message at: {}\n{e}",
                    path.display()
                ));
            }
        }
        ui.text_edit_multiline(&mut self.save_message);

        if let Some(number) = self.number_popup.show(ui, keys) {
            log::info!("Picked number {number}");
        }
        ui.label(format!("Number: {}", self.number_popup.value()));
    }
}

impl Viewer for UiViewer {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);

        egui::CollapsingHeader::new("Buttons")
            .default_open(true)
            .show(ui, |ui| {
                if state_button(ui, &mut self.state_value, "Stop", "Train") {
                    log::info!("Training: {}", self.state_value);
                }
            });

        egui::CollapsingHeader::new("Sliders & co")
            .default_open(true)
            .show(ui, |ui| self.sliders(ui));

        egui::CollapsingHeader::new("Alerts & Popups")
            .default_open(true)
            .show(ui, |ui| self.popups(ui, frame.keys));

        self.alert.show(ui.ctx());
    }
}

fn main() -> Result<()> {
    run(UiViewer::new(), ViewerOptions::default().with_title("ui_viewer"))
}
