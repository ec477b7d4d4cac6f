//! Modal alert messages.

use egui::{Color32, Context, Frame, Id, Modal};

/// Pushes a message to screen in a modal, e.g. when loading fails.
///
/// Call [`AlertHandler::trigger`] from anywhere, and [`AlertHandler::show`]
/// once per frame.
#[derive(Debug, Clone)]
pub struct AlertHandler {
    popup_name: String,
    message: String,
    open: bool,
    background: Option<Color32>,
}

impl Default for AlertHandler {
    fn default() -> Self {
        Self::new("Alert Popup")
    }
}

impl AlertHandler {
    pub fn new(popup_name: impl Into<String>) -> Self {
        Self {
            popup_name: popup_name.into(),
            message: String::new(),
            open: false,
            background: None,
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: Color32) -> Self {
        self.background = Some(color);
        self
    }

    pub fn trigger(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.open = true;
        log::warn!("{}: {}", self.popup_name, self.message);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn show(&mut self, ctx: &Context) {
        if !self.open {
            return;
        }

        let mut frame = Frame::popup(&ctx.style());
        if let Some(color) = self.background {
            frame = frame.fill(color);
        }

        let mut close = false;
        let response = Modal::new(Id::new(("alert", &self.popup_name)))
            .frame(frame)
            .show(ctx, |ui| {
                ui.label(&self.message);
                close = ui.button("Close").clicked();
            });

        if close || response.should_close() {
            self.open = false;
        }
    }
}
