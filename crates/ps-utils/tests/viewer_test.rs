//! Frame-sequence tests for the viewer host.
//!
//! These drive viewers through [`HeadlessRunner`] with synthetic egui input,
//! so they run without a window or GPU.

use std::path::{Path, PathBuf};

use ps_utils::egui::{self, Context, Event, Modifiers, RawInput, Ui};
use ps_utils::*;

fn key_event(key: egui::Key, pressed: bool) -> Event {
    Event::Key {
        key,
        physical_key: Some(key),
        pressed,
        repeat: false,
        modifiers: Modifiers::NONE,
    }
}

fn input_with(events: Vec<Event>) -> RawInput {
    RawInput {
        events,
        ..RawInput::default()
    }
}

#[derive(Default)]
struct Recorder {
    hooks: Vec<&'static str>,
    dropped: Vec<PathBuf>,
    fired: Vec<u64>,
    lock_owner: Option<&'static str>,
}

impl Viewer for Recorder {
    fn post_init(&mut self, _ctx: &Context) {
        self.hooks.push("post_init");
    }

    fn step(&mut self) {
        self.hooks.push("step");
    }

    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        self.hooks.push("gui");
        show_fps(ui, frame);
        if let Some(owner) = self.lock_owner {
            frame.keys.lock(owner);
        }
        if frame.keys.pressed(Key::S) {
            self.fired.push(frame.index());
        }
    }

    fn scene(&mut self, _ui: &mut Ui, _frame: &mut Frame<'_>) {
        self.hooks.push("scene");
    }

    fn draw(&mut self, _ctx: &Context) {
        self.hooks.push("draw");
    }

    fn on_drop(&mut self, path: &Path, _ctx: &Context) {
        self.dropped.push(path.to_path_buf());
    }
}

#[test]
fn test_hooks_run_in_order() {
    let mut runner = HeadlessRunner::new(Recorder::default(), ViewerOptions::default());
    runner.run_frame(RawInput::default());
    runner.run_frame(RawInput::default());

    assert_eq!(
        runner.viewer().hooks,
        [
            "post_init", "step", "gui", "scene", "draw", "step", "gui", "scene", "draw"
        ]
    );
}

#[test]
fn test_held_key_repeats_after_interval() {
    let mut runner = HeadlessRunner::new(Recorder::default(), ViewerOptions::default());

    // press once; egui keeps the key down until it sees a release
    runner.run_frame(input_with(vec![key_event(egui::Key::S, true)]));
    for _ in 1..25 {
        runner.run_frame(RawInput::default());
    }

    assert_eq!(runner.viewer().fired, [0, 11, 22]);
}

#[test]
fn test_short_press_fires_once() {
    let mut runner = HeadlessRunner::new(Recorder::default(), ViewerOptions::default());

    runner.run_frame(input_with(vec![key_event(egui::Key::S, true)]));
    runner.run_frame(RawInput::default());
    runner.run_frame(input_with(vec![key_event(egui::Key::S, false)]));
    for _ in 0..15 {
        runner.run_frame(RawInput::default());
    }

    assert_eq!(runner.viewer().fired, [0]);
}

#[test]
fn test_lock_suppresses_hotkeys() {
    let recorder = Recorder {
        lock_owner: Some("Save Popup"),
        ..Recorder::default()
    };
    let mut runner = HeadlessRunner::new(recorder, ViewerOptions::default());

    runner.run_frame(input_with(vec![key_event(egui::Key::S, true)]));
    for _ in 0..12 {
        runner.run_frame(RawInput::default());
    }
    assert!(runner.viewer().fired.is_empty());
    assert!(runner.keys().is_locked_by("Save Popup"));

    // released lock: the held key fires once its counter expires
    runner.viewer_mut().lock_owner = None;
    runner.keys_mut().unlock("Save Popup");
    for _ in 0..12 {
        runner.run_frame(RawInput::default());
    }
    assert_eq!(runner.viewer().fired.len(), 1);
}

struct Counter {
    clicks: u32,
}

impl Viewer for Counter {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);
        if ui.button("Click").clicked() || frame.keys.pressed(Key::Space) {
            self.clicks += 1;
        }
        ui.label(format!("clicks: {}", self.clicks));
    }
}

#[test]
fn test_space_hotkey_counts_like_a_click() {
    let mut runner = HeadlessRunner::new(Counter { clicks: 0 }, ViewerOptions::default());

    runner.run_frame(input_with(vec![key_event(egui::Key::Space, true)]));
    runner.run_frame(input_with(vec![key_event(egui::Key::Space, false)]));
    runner.run_frame(RawInput::default());

    assert_eq!(runner.viewer().clicks, 1);
}

#[test]
fn test_frames_paint_panels() {
    let options = ViewerOptions::default().with_max_fps(50);
    let mut runner = HeadlessRunner::new(Recorder::default(), options);
    runner.run_frame(RawInput::default());

    let output = runner.run_frame(RawInput::default());
    assert!(!output.shapes.is_empty());
}

#[test]
fn test_drop_reaches_viewer() {
    let mut runner = HeadlessRunner::new(Recorder::default(), ViewerOptions::default());
    runner.drop_file("photos/cat.png");
    assert_eq!(runner.viewer().dropped, [PathBuf::from("photos/cat.png")]);
}

struct BrushViewer {
    widget: VoxelSetWidget,
    changes: usize,
}

impl Viewer for BrushViewer {
    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        if self.widget.gui(ui, frame.keys) {
            self.changes += 1;
        }
    }
}

fn brush_viewer() -> BrushViewer {
    let coords = vec![
        IVec3::new(0, 0, 0),
        IVec3::new(1, 0, 0),
        IVec3::new(5, 5, 5),
    ];
    let options = BrushOptions {
        radius: 1.5,
        ..BrushOptions::default()
    };
    let widget = VoxelSetWidget::new("voxels", coords, 8, -1.0, 1.0, None, None, &options)
        .expect("valid coordinates");
    BrushViewer { widget, changes: 0 }
}

#[test]
fn test_brush_stroke_and_panel() {
    let mut runner = HeadlessRunner::new(brush_viewer(), ViewerOptions::default());

    let alt_click = BrushInput {
        modifier: true,
        primary_down: true,
        wheel_notches: 0.0,
    };
    // hover voxel 0, whose faces are 0..12
    runner.viewer_mut().widget.apply_input(alt_click, Some(3));
    runner.run_frame(RawInput::default());

    let viewer = runner.viewer();
    assert_eq!(viewer.widget.brush().selection(), [true, true, false]);
    assert_eq!(viewer.changes, 1);

    // `s` toggles the brush to remove mode
    runner.run_frame(input_with(vec![key_event(egui::Key::S, true)]));
    assert_eq!(runner.viewer().widget.brush().mode(), BrushMode::Remove);

    // a new stroke on voxel 1 removes its neighbourhood
    let widget = &mut runner.viewer_mut().widget;
    widget.apply_input(BrushInput::default(), Some(12));
    widget.apply_input(alt_click, Some(12));
    assert_eq!(widget.brush().selected_count(), 0);
}
