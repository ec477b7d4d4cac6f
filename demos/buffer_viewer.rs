#![allow(clippy::cast_precision_loss)]
//! Demo showing render-buffer updates from a per-frame step loop.
//!
//! Each step advances a procedural pattern that converges towards a target
//! image; `draw` uploads the current estimate to a [`RenderBuffer`].
//!
//! Run with: `cargo run --example buffer_viewer`

use ps_utils::egui::{Context, Ui};
use ps_utils::*;

const RENDER_SIZE: usize = 256;
const NUM_ITERATIONS: u32 = 1000;
const LEARNING_RATE: f32 = 0.01;

/// Checkerboard with a radial colour gradient.
fn target_image(size: usize) -> Vec<Vec4> {
    let mut pixels = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let u = x as f32 / size as f32;
            let v = y as f32 / size as f32;
            let r = Vec2::new(u - 0.5, v - 0.5).length() * 2.0;
            let checker = if (x / 32 + y / 32) % 2 == 0 { 1.0 } else { 0.6 };
            pixels.push(Vec4::new(u * checker, v * checker, (1.0 - r).max(0.0), 1.0));
        }
    }
    pixels
}

struct BufferViewer {
    target: Vec<Vec4>,
    estimate: Vec<Vec4>,
    buffer: RenderBuffer,
    optimizing: bool,
    step_count: u32,
    loss: f32,
}

impl BufferViewer {
    fn new() -> Self {
        let target = target_image(RENDER_SIZE);
        let mut viewer = Self {
            estimate: Vec::new(),
            target,
            buffer: RenderBuffer::new("render_buffer", RENDER_SIZE, RENDER_SIZE),
            optimizing: true,
            step_count: 0,
            loss: 0.0,
        };
        viewer.reset();
        viewer
    }

    fn reset(&mut self) {
        self.estimate = vec![Vec4::new(0.5, 0.5, 0.5, 1.0); self.target.len()];
        self.step_count = 0;
        self.loss = self.mse();
        self.optimizing = true;
    }

    fn mse(&self) -> f32 {
        let sum: f32 = self
            .estimate
            .iter()
            .zip(&self.target)
            .map(|(e, t)| (*e - *t).truncate().length_squared())
            .sum();
        sum / self.target.len().max(1) as f32
    }

    /// One gradient step on the per-pixel squared error.
    fn training_step(&mut self) -> bool {
        if self.step_count >= NUM_ITERATIONS {
            return false;
        }
        for (e, t) in self.estimate.iter_mut().zip(&self.target) {
            let grad = 2.0 * (*e - *t);
            *e -= LEARNING_RATE * grad.truncate().extend(0.0);
        }
        self.loss = self.mse();
        self.step_count += 1;
        self.step_count < NUM_ITERATIONS
    }
}

impl Viewer for BufferViewer {
    fn step(&mut self) {
        if self.optimizing {
            self.optimizing = self.training_step();
        }
    }

    fn gui(&mut self, ui: &mut Ui, frame: &mut Frame<'_>) {
        show_fps(ui, frame);

        ui.horizontal(|ui| {
            state_button(ui, &mut self.optimizing, "Stop", "Train");
            if ui.button("Reset").clicked() {
                self.reset();
            }
        });
        ui.label(format!("Iteration: {}/{NUM_ITERATIONS}", self.step_count));
        ui.label(format!("Loss: {:.6}", self.loss));
    }

    fn scene(&mut self, ui: &mut Ui, _frame: &mut Frame<'_>) {
        ui.centered_and_justified(|ui| self.buffer.show(ui));
    }

    fn draw(&mut self, ctx: &Context) {
        if let Err(e) = self.buffer.update_from_host(ctx, &self.estimate) {
            log::error!("{e}");
        }
    }
}

fn main() -> Result<()> {
    let options = ViewerOptions::default()
        .with_title("buffer_viewer")
        .with_window_size(1080, 1080);
    run(BufferViewer::new(), options)
}
