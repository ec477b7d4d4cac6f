//! Windowless frame runner.
//!
//! Feeds synthetic input through the same per-frame pipeline as [`run`](crate::run):
//! hotkey step, `step`, `gui`, `scene`, `draw`. Useful for integration tests
//! and for batch jobs that reuse a viewer's logic.

use std::path::Path;
use std::time::{Duration, Instant};

use egui::{Context, FullOutput, RawInput};
use ps_utils_core::{KeyRepeatHandler, ViewerOptions};

use crate::frame::{frame_interval, run_frame, FrameClock, Viewer};

/// Drives a [`Viewer`] with an egui context and no window.
pub struct HeadlessRunner<V: Viewer> {
    ctx: Context,
    viewer: V,
    keys: KeyRepeatHandler,
    options: ViewerOptions,
    clock: FrameClock,
    start: Instant,
    frames: u32,
}

impl<V: Viewer> HeadlessRunner<V> {
    /// Creates the runner and calls [`Viewer::post_init`].
    pub fn new(mut viewer: V, options: ViewerOptions) -> Self {
        let ctx = Context::default();
        ctx.set_visuals(if options.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        viewer.post_init(&ctx);

        Self {
            ctx,
            viewer,
            keys: KeyRepeatHandler::new(options.key_repeat_interval),
            options,
            clock: FrameClock::default(),
            start: Instant::now(),
            frames: 0,
        }
    }

    /// Runs one frame with `raw` as its input.
    ///
    /// Frame time advances by the target interval (or 1/60 s when unlimited)
    /// regardless of wall time.
    pub fn run_frame(&mut self, raw: RawInput) -> FullOutput {
        let dt = frame_interval(self.options.max_fps)
            .unwrap_or(Duration::from_secs_f64(1.0 / 60.0));
        let frame_time = self.start + dt * self.frames;
        self.frames = self.frames.saturating_add(1);
        let timing = self.clock.tick(frame_time);

        self.ctx.begin_pass(raw);
        run_frame(&self.ctx, &mut self.viewer, &mut self.keys, &self.options, timing);
        self.ctx.end_pass()
    }

    /// Delivers a dropped file to [`Viewer::on_drop`].
    pub fn drop_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        log::info!("File dropped: {}", path.display());
        self.viewer.on_drop(path, &self.ctx);
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn keys(&self) -> &KeyRepeatHandler {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut KeyRepeatHandler {
        &mut self.keys
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn into_viewer(self) -> V {
        self.viewer
    }
}
