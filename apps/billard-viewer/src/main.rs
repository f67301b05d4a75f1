use anyhow::{Context, Result};
use billard_camera::MotionMode;
use billard_input::{InputEvent, InputQueue, Key};
use billard_render::{FrameDriver, FrameOutcome};
use billard_render_wgpu::{GpuContext, GpuError, WgpuBackend};
use billard_scene::ViewerConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixel-precise scroll deltas are divided by this to get wheel lines.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "billard-viewer", about = "Billiard room scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration (YAML); the built-in billiard room when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override how held keys map to motion
    #[arg(long, value_enum)]
    motion: Option<MotionArg>,

    /// Start with mouse-look active
    #[arg(long)]
    mouse_look: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MotionArg {
    /// Fixed increments per frame
    Fixed,
    /// Increments scaled by frame time
    Elapsed,
}

impl From<MotionArg> for MotionMode {
    fn from(arg: MotionArg) -> Self {
        match arg {
            MotionArg::Fixed => MotionMode::default(),
            MotionArg::Elapsed => MotionMode::elapsed_default(),
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
    }
}

struct ViewerApp {
    config: ViewerConfig,
    driver: FrameDriver,
    events: InputQueue,
    window: Option<Arc<Window>>,
    backend: Option<WgpuBackend>,
    mouse_look: bool,
    last_frame: Instant,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(config: ViewerConfig) -> Self {
        let driver = FrameDriver::from_config(&config);
        let mouse_look = config.input.mouse_look;
        Self {
            config,
            driver,
            events: InputQueue::new(),
            window: None,
            backend: None,
            mouse_look,
            last_frame: Instant::now(),
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let backend = pollster::block_on(async {
            let ctx = GpuContext::new(
                window.clone(),
                size.width,
                size.height,
                self.config.render.vsync,
            )
            .await?;
            WgpuBackend::new(ctx, &self.config).await
        })
        .context("failed to initialize GPU backend")?;

        if self.mouse_look {
            window.set_cursor_visible(false);
        }
        self.window = Some(window);
        self.backend = Some(backend);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn toggle_mouse_look(&mut self) {
        self.mouse_look = !self.mouse_look;
        self.events.push(InputEvent::MouseLook(self.mouse_look));
        if let Some(window) = &self.window {
            window.set_cursor_visible(!self.mouse_look);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let aspect = backend.aspect();

        match self.driver.frame(self.events.drain(), dt, aspect, backend) {
            Ok(FrameOutcome::Rendered) => {}
            Ok(FrameOutcome::Exit) => event_loop.exit(),
            Err(e) if e.is_surface_lost() => backend.recover_surface(),
            Err(GpuError::Surface(wgpu::SurfaceError::Timeout)) => {
                tracing::warn!("surface timed out, skipping frame");
            }
            Err(e) => {
                tracing::error!(error = %e, "frame failed");
                self.fatal = Some(e.into());
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!(error = %e, "initialization failed");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.events.push(InputEvent::CloseRequested),
            WindowEvent::Resized(new_size) => {
                if let Some(backend) = &mut self.backend {
                    backend.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => self.events.push(InputEvent::FocusLost),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let Some(key) = map_key(code) else {
                    return;
                };
                match state {
                    ElementState::Pressed if !repeat => {
                        self.events.push(InputEvent::KeyPressed(key));
                    }
                    ElementState::Released => self.events.push(InputEvent::KeyReleased(key)),
                    ElementState::Pressed => {}
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: ElementState::Pressed,
                ..
            } => self.toggle_mouse_look(),
            WindowEvent::CursorMoved { position, .. } => {
                self.events.push(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.events.push(InputEvent::Scroll {
                    y: scroll_lines(delta),
                });
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(motion) = cli.motion {
        config.input.motion = motion.into();
    }
    if cli.mouse_look {
        config.input.mouse_look = true;
    }

    tracing::info!(
        targets = config.scene.targets.len(),
        motion = ?config.input.motion,
        "billard-viewer starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }
    tracing::info!(frames = app.driver.frame_index(), "billard-viewer exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_and_arrow_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::Space), None);
    }

    #[test]
    fn scroll_deltas_become_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        let pixels = winit::dpi::PhysicalPosition::new(0.0, 40.0);
        assert_eq!(scroll_lines(MouseScrollDelta::PixelDelta(pixels)), 2.0);
    }

    #[test]
    fn motion_override() {
        assert_eq!(MotionMode::from(MotionArg::Fixed), MotionMode::default());
        assert_eq!(
            MotionMode::from(MotionArg::Elapsed),
            MotionMode::elapsed_default()
        );
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["billard-viewer", "-v", "--motion", "elapsed", "--mouse-look"]);
        assert!(cli.verbose);
        assert!(cli.mouse_look);
        assert!(matches!(cli.motion, Some(MotionArg::Elapsed)));
        assert!(cli.config.is_none());
    }
}
