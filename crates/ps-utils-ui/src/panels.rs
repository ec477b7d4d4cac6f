//! Viewer panel layout.

use egui::{CentralPanel, Context, Frame, SidePanel, Ui};

/// Builds the resizable left panel holding a viewer's controls.
pub fn build_left_panel<R>(
    ctx: &Context,
    title: &str,
    default_width: f32,
    build_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    SidePanel::left("ps_utils_main_panel")
        .default_width(default_width)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading(title);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, build_contents)
                .inner
        })
        .inner
}

/// Fills the remaining space, without margins, with the viewer's scene.
pub fn build_central_panel<R>(ctx: &Context, build_contents: impl FnOnce(&mut Ui) -> R) -> R {
    CentralPanel::default()
        .frame(Frame::NONE)
        .show(ctx, build_contents)
        .inner
}
