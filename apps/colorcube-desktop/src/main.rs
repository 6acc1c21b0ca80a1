mod error;

use clap::Parser;
use colorcube_camera::CameraState;
use colorcube_input::{Action, InputSession, PointerButton};
use colorcube_render::FrameLayout;
use colorcube_render_wgpu::{WgpuRenderer, pick_surface_format};
use error::StartupError;
use glam::Vec2;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Colorful Letter";

#[derive(Parser)]
#[command(name = "colorcube-desktop", about = "Rotating colored cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

/// Application state: the camera and the input that drives it.
#[derive(Debug, Default)]
struct AppState {
    camera: CameraState,
    input: InputSession,
}

impl AppState {
    fn handle(&mut self, action: Action) {
        self.input.apply(action, &mut self.camera);
    }

    /// Map a window event to an action. Returns `None` for events the
    /// camera does not care about.
    fn action_for(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<Action> {
        let action = match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                self.input.cursor_moved(Vec2::new(logical.x, logical.y))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = if *button == MouseButton::Left {
                    PointerButton::Primary
                } else {
                    PointerButton::Other
                };
                self.input.button(button, *state == ElementState::Pressed)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                self.input.wheel(y)
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.input.escape_pressed(),
            _ => return None,
        };
        Some(action)
    }
}

/// GPU resources, created once the window exists.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self, StartupError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(StartupError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("colorcube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format =
            pick_surface_format(&surface_caps.formats).ok_or(StartupError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height)?;

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Draw one frame. Returns `false` when the surface is out of memory and
    /// the viewer should stop.
    fn draw(&mut self, camera: &CameraState) -> bool {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return true;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory");
                return false;
            }
            Err(e) => {
                tracing::warn!("surface error: {e}");
                return true;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let layout = FrameLayout::from_size(self.config.width, self.config.height);
        self.renderer
            .render(&self.device, &self.queue, &view, camera, &layout);
        output.present();
        true
    }
}

struct GpuApp {
    state: AppState,
    window_size: LogicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    failure: Option<StartupError>,
}

impl GpuApp {
    fn new(width: u32, height: u32) -> Self {
        Self {
            state: AppState::default(),
            window_size: LogicalSize::new(width, height),
            window: None,
            gpu: None,
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.window_size)
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let gpu = Gpu::new(window.clone())?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        if let Some(action) = self.state.action_for(&event, scale_factor) {
            self.state.handle(action);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(gpu) = &mut self.gpu else {
                    return;
                };
                if !gpu.draw(&self.state.camera) {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.input.close_requested() {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources reference the window surface; drop them first.
        self.gpu = None;
        self.window = None;
        tracing::info!("viewer closed");
    }
}

fn run(cli: &Cli) -> Result<(), StartupError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("colorcube-desktop starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        // SAFETY: test-only; the id tags synthetic events and never reaches winit.
        unsafe { DeviceId::dummy() }
    }

    fn cursor(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn left(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
        }
    }

    fn feed(app: &mut AppState, event: WindowEvent, scale_factor: f64) {
        if let Some(action) = app.action_for(&event, scale_factor) {
            app.handle(action);
        }
    }

    #[test]
    fn left_drag_rotates() {
        let mut app = AppState::default();
        feed(&mut app, cursor(100.0, 100.0), 1.0);
        feed(&mut app, left(ElementState::Pressed), 1.0);
        feed(&mut app, cursor(110.0, 100.0), 1.0);
        assert!((app.camera.rotation_pending.x - 3.0).abs() < 1e-5);

        feed(&mut app, left(ElementState::Released), 1.0);
        assert_eq!(app.camera.rotation_accumulated, app.camera.rotation_pending);
    }

    #[test]
    fn cursor_is_measured_in_logical_pixels() {
        let mut app = AppState::default();
        feed(&mut app, cursor(200.0, 200.0), 2.0);
        feed(&mut app, left(ElementState::Pressed), 2.0);
        feed(&mut app, cursor(220.0, 200.0), 2.0);
        assert!((app.camera.rotation_pending.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn right_button_does_not_rotate() {
        let mut app = AppState::default();
        feed(&mut app, cursor(0.0, 0.0), 1.0);
        feed(
            &mut app,
            WindowEvent::MouseInput {
                device_id: device(),
                state: ElementState::Pressed,
                button: MouseButton::Right,
            },
            1.0,
        );
        feed(&mut app, cursor(50.0, 50.0), 1.0);
        assert_eq!(app.camera.rotation_pending, Vec2::ZERO);
    }

    #[test]
    fn wheel_dollies_by_one_step_per_event() {
        let mut app = AppState::default();
        let wheel = |y: f32| WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, y),
            phase: winit::event::TouchPhase::Moved,
        };
        feed(&mut app, wheel(3.0), 1.0);
        assert!((app.camera.translation.z - (-1.1)).abs() < 1e-6);
        feed(&mut app, wheel(-1.0), 1.0);
        feed(&mut app, wheel(-1.0), 1.0);
        assert!((app.camera.translation.z - (-0.9)).abs() < 1e-6);
    }

    #[test]
    fn close_request_is_observed_by_the_loop() {
        let mut app = AppState::default();
        assert!(!app.input.close_requested());
        app.handle(Action::RequestClose);
        assert!(app.input.close_requested());
    }

    #[test]
    fn unrelated_events_pass_through() {
        let mut app = AppState::default();
        assert!(app.action_for(&WindowEvent::CloseRequested, 1.0).is_none());
        assert!(app.action_for(&WindowEvent::RedrawRequested, 1.0).is_none());
    }

    #[test]
    fn cli_defaults_to_square_window() {
        let cli = Cli::parse_from(["colorcube-desktop"]);
        assert_eq!((cli.width, cli.height), (600, 600));
        assert!(!cli.verbose);
    }
}
