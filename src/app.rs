//! Windowed runner.
//!
//! Drives an [`Effect`] with a winit event loop: pointer and touch events
//! update the input state, resizes rebuild the field, and every redraw runs
//! one simulate + render step before requesting the next frame. The loop
//! runs for the lifetime of the window; render errors are triaged, never
//! allowed to stop rescheduling. Window and GPU initialization failures
//! end the loop and are returned from [`run`].

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{Touch, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::EffectConfig;
use crate::effect::Effect;
use crate::error::EffectError;
use crate::gpu::GpuState;
use crate::physics::PointerState;
use crate::raster::Silhouette;
use crate::time::Time;

/// Run one effect in a window. Blocks until the window is closed.
pub fn run(silhouette: Silhouette, config: EffectConfig, seed: u64) -> Result<(), EffectError> {
    run_titled(silhouette, config, seed, "pixelfield")
}

/// [`run`] with a custom window title.
pub fn run_titled(
    silhouette: Silhouette,
    config: EffectConfig,
    seed: u64,
    title: &str,
) -> Result<(), EffectError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        window: None,
        gpu: None,
        effect: None,
        pointer: PointerState::new(),
        time: Time::new(),
        silhouette: Some(silhouette),
        config,
        seed,
        title: title.to_string(),
        init_error: None,
    };
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.take_init_error() {
        return Err(err);
    }
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    effect: Option<Effect>,
    pointer: PointerState,
    time: Time,
    silhouette: Option<Silhouette>,
    config: EffectConfig,
    seed: u64,
    title: String,
    init_error: Option<EffectError>,
}

impl App {
    fn take_init_error(&mut self) -> Option<EffectError> {
        self.init_error.take()
    }

    fn viewport(&self) -> Vec2 {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                Vec2::new(size.width as f32, size.height as f32)
            })
            .unwrap_or(Vec2::ZERO)
    }

    fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.moved(position);
        if let Some(effect) = &mut self.effect {
            effect.pointer_moved(&self.pointer);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let background = self.config.palette.background;
        match pollster::block_on(GpuState::new(window, background)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.init_error = Some(EffectError::Gpu(e));
                event_loop.exit();
                return;
            }
        }

        if let Some(silhouette) = self.silhouette.take() {
            self.effect = Some(Effect::new(
                silhouette,
                self.config.clone(),
                self.viewport(),
                self.seed,
            ));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(effect) = &mut self.effect {
                    effect.rebuild(Vec2::new(
                        physical_size.width as f32,
                        physical_size.height as f32,
                    ));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Touch(Touch { location, .. }) => {
                self.pointer_moved(Vec2::new(location.x as f32, location.y as f32));
            }
            WindowEvent::RedrawRequested => {
                if let Some(fps) = self.time.update() {
                    if let Some(window) = &self.window {
                        window.set_title(&format!("{} ({:.0} fps)", self.title, fps));
                    }
                }
                if let Some(effect) = &mut self.effect {
                    effect.step(&self.pointer);
                    if let Some(gpu) = &mut self.gpu {
                        match gpu.render(&effect.instances()) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => {
                                gpu.resize(winit::dpi::PhysicalSize {
                                    width: gpu.config.width,
                                    height: gpu.config.height,
                                })
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                            Err(e) => eprintln!("Render error: {:?}", e),
                        }
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
