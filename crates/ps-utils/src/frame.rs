//! Viewer hooks and the per-frame pipeline shared by the window and headless runners.

use std::path::Path;
use std::time::{Duration, Instant};

use egui::{Context, Ui};
use ps_utils_core::{Key, KeyRepeatHandler, ViewerOptions};
use ps_utils_ui::{build_central_panel, build_left_panel, EguiKeys};

/// An interactive viewer.
///
/// Construct your state in the viewer's constructor, then hand it to
/// [`run`](crate::run). Each frame runs, in order: key handler step,
/// [`step`](Viewer::step), [`gui`](Viewer::gui) in the left panel,
/// [`scene`](Viewer::scene) in the central panel, then [`draw`](Viewer::draw).
pub trait Viewer {
    /// Called once after the window and egui context exist.
    fn post_init(&mut self, _ctx: &Context) {}

    /// Per-frame work, e.g. an optimisation step.
    fn step(&mut self) {}

    /// Left panel contents. Defaults to the fps counter.
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);
    }

    /// Central panel contents, typically a scene view.
    fn scene(&mut self, _ui: &mut Ui, _frame: &mut Frame<'_>) {}

    /// Per-frame buffer uploads.
    fn draw(&mut self, _ctx: &Context) {}

    /// A file was dropped onto the window.
    fn on_drop(&mut self, _path: &Path, _ctx: &Context) {}
}

/// Per-frame state handed to viewer hooks.
pub struct Frame<'a> {
    /// Hotkeys, already stepped for this frame.
    pub keys: &'a mut KeyRepeatHandler,
    fps: f64,
    index: u64,
}

impl<'a> Frame<'a> {
    pub fn new(keys: &'a mut KeyRepeatHandler, fps: f64, index: u64) -> Self {
        Self { keys, fps, index }
    }

    /// Instantaneous frame rate, from the time since the previous frame.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Zero-based frame counter.
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// Shows `fps: <rate>;`.
pub fn show_fps(ui: &mut Ui, frame: &Frame<'_>) {
    ui.label(format!("fps: {:.4};", frame.fps()));
}

/// Frame timing.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    index: u64,
    fps: f64,
}

impl FrameClock {
    /// Records a frame at `now` and returns `(fps, frame index)`.
    pub fn tick(&mut self, now: Instant) -> (f64, u64) {
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f64();
            if dt > 0.0 {
                self.fps = 1.0 / dt;
            }
        }
        let index = if self.last.is_some() { self.index + 1 } else { 0 };
        self.last = Some(now);
        self.index = index;
        (self.fps, index)
    }
}

/// Minimum time between frames for `max_fps` (0 means unlimited).
pub fn frame_interval(max_fps: u32) -> Option<Duration> {
    (max_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(max_fps)))
}

/// Runs one frame of `viewer` inside an egui pass already begun on `ctx`.
pub(crate) fn run_frame<V: Viewer + ?Sized>(
    ctx: &Context,
    viewer: &mut V,
    keys: &mut KeyRepeatHandler,
    options: &ViewerOptions,
    (fps, index): (f64, u64),
) {
    // text fields own the keyboard; let counters decay without firing
    if ctx.wants_keyboard_input() {
        keys.step(&|_: Key| false);
    } else {
        ctx.input(|input| keys.step(&EguiKeys(input)));
    }

    viewer.step();

    let mut frame = Frame::new(keys, fps, index);
    build_left_panel(ctx, &options.title, options.left_panel_width, |ui| {
        viewer.gui(ui, &mut frame);
    });
    build_central_panel(ctx, |ui| viewer.scene(ui, &mut frame));

    viewer.draw(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_reports_rate_and_index() {
        let start = Instant::now();
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(start), (0.0, 0));

        let (fps, index) = clock.tick(start + Duration::from_millis(20));
        assert_eq!(index, 1);
        assert!((fps - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(0), None);
        assert_eq!(frame_interval(4), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_show_fps_format() {
        let mut keys = KeyRepeatHandler::default();
        let frame = Frame::new(&mut keys, 59.94, 3);
        assert_eq!(format!("fps: {:.4};", frame.fps()), "fps: 59.9400;");
        assert_eq!(frame.index(), 3);
    }
}
