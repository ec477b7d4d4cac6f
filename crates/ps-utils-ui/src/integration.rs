//! Bridges egui to the viewer window: winit events in, wgpu draw calls out.

use egui::Context;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use winit::event::WindowEvent;
use winit::window::Window;

/// egui context plus the winit input state and wgpu painter of the viewer window.
pub struct EguiIntegration {
    pub context: Context,
    pub state: EguiWinitState,
    pub renderer: EguiRenderer,
}

impl EguiIntegration {
    /// Sets up egui for `window`, painting into targets of `output_format`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Window,
        dark_mode: bool,
    ) -> Self {
        let context = Context::default();
        let visuals = if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        context.set_visuals(visuals);

        let state = EguiWinitState::new(
            context.clone(),
            context.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let renderer =
            EguiRenderer::new(device, output_format, egui_wgpu::RendererOptions::default());

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui; true means the UI used it.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.context.wants_keyboard_input()
    }

    /// Starts an egui pass from the input gathered since the last frame.
    pub fn begin_frame(&mut self, window: &Window) {
        let input = self.state.take_egui_input(window);
        self.context.begin_pass(input);
    }

    /// Closes the pass and applies cursor, clipboard and IME requests to the window.
    pub fn end_frame(&mut self, window: &Window) -> egui::FullOutput {
        let full_output = self.context.end_pass();
        self.state
            .handle_platform_output(window, full_output.platform_output.clone());
        full_output
    }

    /// Draws a finished pass into `view`.
    ///
    /// With `clear_color` the target is cleared first; otherwise egui is
    /// composited over whatever the target already holds.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_descriptor: &ScreenDescriptor,
        output: egui::FullOutput,
        clear_color: Option<wgpu::Color>,
    ) {
        let primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        let textures = output.textures_delta;

        self.upload(device, queue, encoder, &primitives, &textures, screen_descriptor);

        let target = wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: load_op(clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ps-utils ui"),
                color_attachments: &[Some(target)],
                ..Default::default()
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &primitives, screen_descriptor);
        drop(pass);

        for id in &textures.free {
            self.renderer.free_texture(id);
        }
    }

    /// Sends new or changed textures and this frame's vertex data to the GPU.
    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures: &egui::TexturesDelta,
        screen_descriptor: &ScreenDescriptor,
    ) {
        for (id, delta) in &textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }
}

fn load_op(clear_color: Option<wgpu::Color>) -> wgpu::LoadOp<wgpu::Color> {
    match clear_color {
        Some(color) => wgpu::LoadOp::Clear(color),
        None => wgpu::LoadOp::Load,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_selects_load_op() {
        assert_eq!(load_op(None), wgpu::LoadOp::Load);
        assert_eq!(
            load_op(Some(wgpu::Color::BLACK)),
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        );
    }
}
