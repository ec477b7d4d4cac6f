//! Demo showing drag-and-drop with image thumbnails.
//!
//! Drop a PNG or JPEG onto the window to preview it.
//!
//! Run with: `cargo run --example drag_viewer`

use std::path::Path;

use ps_utils::egui::{Context, Ui};
use ps_utils::save_utils::{check_extension, BASIC_IMAGE_EXTENSIONS};
use ps_utils::*;

#[derive(Default)]
struct DragViewer {
    thumbnail: Option<Thumbnail>,
    alert: AlertHandler,
}

impl Viewer for DragViewer {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);

        match &self.thumbnail {
            Some(thumbnail) => {
                thumbnail.show(ui);
            }
            None => {
                ui.label("Drop an image here.");
            }
        }

        self.alert.show(ui.ctx());
    }

    fn on_drop(&mut self, path: &Path, ctx: &Context) {
        if !check_extension(path, &BASIC_IMAGE_EXTENSIONS) {
            self.alert.trigger(format!(
                "Can only load images with extensions: {BASIC_IMAGE_EXTENSIONS:?}"
            ));
            return;
        }

        match Thumbnail::from_path(ctx, "dropped image", path) {
            Ok(thumbnail) => self.thumbnail = Some(thumbnail),
            Err(e) => self
                .alert
                .trigger(format!("Couldn't load image at: {}\n{e}", path.display())),
        }
    }
}

fn main() -> Result<()> {
    run(
        DragViewer::default(),
        ViewerOptions::default().with_title("drag_viewer"),
    )
}
