//! Window, GPU surface and event loop.

use std::sync::Arc;
use std::time::Instant;

use egui_wgpu::ScreenDescriptor;
use pollster::FutureExt;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ps_utils_core::{KeyRepeatHandler, PsUtilsError, Result, ViewerOptions};
use ps_utils_ui::EguiIntegration;

use crate::frame::{frame_interval, run_frame, FrameClock, Viewer};

/// Surface, device and queue of the window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| PsUtilsError::RenderError(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PsUtilsError::RenderError(format!("no suitable GPU adapter: {e}")))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ps-utils device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await
            .map_err(|e| PsUtilsError::RenderError(format!("failed to create device: {e}")))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| PsUtilsError::RenderError("surface has no formats".to_string()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "GPU ready: {} ({:?}), surface {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }
}

/// Event loop state for one viewer window.
pub(crate) struct App<V: Viewer> {
    viewer: V,
    options: ViewerOptions,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui: Option<EguiIntegration>,
    keys: KeyRepeatHandler,
    clock: FrameClock,
    next_frame: Option<Instant>,
    close_requested: bool,
    error: Option<PsUtilsError>,
}

impl<V: Viewer> App<V> {
    pub(crate) fn new(viewer: V, options: ViewerOptions) -> Self {
        Self {
            viewer,
            keys: KeyRepeatHandler::new(options.key_repeat_interval),
            options,
            window: None,
            gpu: None,
            egui: None,
            clock: FrameClock::default(),
            next_frame: None,
            close_requested: false,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub(crate) fn into_result(self) -> Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PsUtilsError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn clear_color(&self) -> wgpu::Color {
        if self.options.dark_mode {
            wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            }
        } else {
            wgpu::Color {
                r: 0.95,
                g: 0.95,
                b: 0.95,
                a: 1.0,
            }
        }
    }

    fn redraw(&mut self) {
        let clear_color = self.clear_color();
        let (Some(window), Some(gpu), Some(egui)) = (&self.window, &mut self.gpu, &mut self.egui)
        else {
            return;
        };

        egui.begin_frame(window);
        run_frame(
            &egui.context,
            &mut self.viewer,
            &mut self.keys,
            &self.options,
            self.clock.tick(Instant::now()),
        );
        let output = egui.end_frame(window);

        let texture = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = (gpu.config.width, gpu.config.height);
                gpu.resize(w, h);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                self.close_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return;
            }
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ps-utils frame encoder"),
            });
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: output.pixels_per_point,
        };

        egui.render(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            output,
            Some(clear_color),
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        texture.present();
    }
}

impl<V: Viewer> ApplicationHandler for App<V> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(
                self.options.window_width,
                self.options.window_height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(
                    event_loop,
                    PsUtilsError::RenderError(format!("failed to create window: {e}")),
                );
                return;
            }
        };

        let gpu = match Gpu::new(window.clone()).block_on() {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        let egui = EguiIntegration::new(
            &gpu.device,
            gpu.config.format,
            &window,
            self.options.dark_mode,
        );
        self.viewer.post_init(&egui.context);
        log::info!("Viewer '{}' started", self.options.title);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui = Some(egui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let egui_wants_keyboard =
            if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
                egui.handle_event(window, &event);
                egui.wants_keyboard_input()
            } else {
                false
            };

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                // Escape first dismisses popups and text focus
                if !egui_wants_keyboard && !self.keys.is_locked() {
                    self.close_requested = true;
                }
            }
            WindowEvent::DroppedFile(path) => {
                log::info!("File dropped: {}", path.display());
                if let Some(egui) = &self.egui {
                    self.viewer.on_drop(&path, &egui.context);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        match frame_interval(self.options.max_fps) {
            None => {
                event_loop.set_control_flow(ControlFlow::Poll);
                window.request_redraw();
            }
            Some(interval) => {
                let now = Instant::now();
                let due = self.next_frame.is_none_or(|next| now >= next);
                if due {
                    window.request_redraw();
                    self.next_frame = Some(now + interval);
                }
                if let Some(next) = self.next_frame {
                    event_loop.set_control_flow(ControlFlow::WaitUntil(next));
                }
            }
        }
    }
}
