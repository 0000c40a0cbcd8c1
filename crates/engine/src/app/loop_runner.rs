use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::clock::FrameClock;
use super::draw::DrawList;
use super::input::{ActionStates, EdgeLatch};
use super::metrics::MetricsAccumulator;
use super::rendering::{RenderError, Renderer, Viewport};
use super::scene::{InputEdges, SceneHost};
use super::{InputAction, InputSnapshot, Scene, Vec2};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub view_width: u32,
    pub view_height: u32,
    pub target_fps: u32,
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Above the Clouds".to_string(),
            view_width: 1280,
            view_height: 720,
            target_fps: 60,
            max_frame_delta: Duration::from_millis(250),
            metrics_log_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] RenderError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let viewport = Viewport {
        width: config.view_width.max(1),
        height: config.view_height.max(1),
    };
    let mut host = SceneHost::new(scene);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window: &'static winit::window::Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                viewport.width as f64,
                viewport.height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    ));
    let mut renderer = Renderer::new(window, viewport).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));
    let render_frame_target = target_frame_duration(config.target_fps);
    let initial_size = window.inner_size();
    let mut input_collector = InputCollector::new(viewport, initial_size.width, initial_size.height);

    host.load();
    info!(
        target_fps = config.target_fps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        view_width = viewport.width,
        view_height = viewport.height,
        "loop_config"
    );

    let started = Instant::now();
    let mut clock = FrameClock::new(started, max_frame_delta);
    let mut last_present_instant = started;
    let mut metrics = MetricsAccumulator::new(started, metrics_log_interval);
    let mut draw = DrawList::new();
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    input_collector.set_window_size(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize_surface(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    input_collector.set_window_size(size.width, size.height);
                    if let Err(error) = renderer.resize_surface(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.set_cursor_window_px(position.x as f32, position.y as f32);
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.clear_cursor_position();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_physical_key(
                        event.physical_key,
                        event.state == ElementState::Pressed,
                    );
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let delta = clock.tick(now);

                    let input_snapshot = input_collector.snapshot_for_frame();
                    host.update(delta.seconds(), &input_snapshot);

                    // Single pacing sleep point; the simulation itself never sleeps.
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    draw.clear_commands();
                    host.render(&mut draw);
                    if let Err(error) = renderer.render(&draw) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = host.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }

                    metrics.record_frame(delta.raw, delta.was_clamped());
                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            max_frame_time_ms = snapshot.max_frame_time_ms,
                            clamped_frames = snapshot.clamped_frames,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                host.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    action_states: ActionStates,
    interact: EdgeLatch,
    toggle_inventory: EdgeLatch,
    cancel: EdgeLatch,
    primary_click: EdgeLatch,
    debug_dump: EdgeLatch,
    cursor_window_px: Option<Vec2>,
    view_width: u32,
    view_height: u32,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(viewport: Viewport, window_width: u32, window_height: u32) -> Self {
        Self {
            view_width: viewport.width,
            view_height: viewport.height,
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => {
                self.action_states.set(InputAction::MoveUp, is_pressed);
            }
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.action_states.set(InputAction::MoveDown, is_pressed);
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.action_states.set(InputAction::MoveLeft, is_pressed);
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.action_states.set(InputAction::MoveRight, is_pressed);
            }
            KeyCode::KeyE | KeyCode::Space => self.interact.handle(is_pressed),
            KeyCode::Tab | KeyCode::KeyI => self.toggle_inventory.handle(is_pressed),
            KeyCode::Escape => self.cancel.handle(is_pressed),
            KeyCode::F3 => self.debug_dump.handle(is_pressed),
            _ => {}
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary_click.handle(state == ElementState::Pressed);
        }
    }

    fn snapshot_for_frame(&mut self) -> InputSnapshot {
        let edges = InputEdges {
            interact: self.interact.take(),
            toggle_inventory: self.toggle_inventory.take(),
            cancel: self.cancel.take(),
            primary_click: self.primary_click.take(),
            debug_dump: self.debug_dump.take(),
        };
        InputSnapshot::new(self.action_states, edges, self.cursor_view_px())
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    fn set_cursor_window_px(&mut self, x: f32, y: f32) {
        self.cursor_window_px = Some(Vec2 { x, y });
    }

    fn clear_cursor_position(&mut self) {
        self.cursor_window_px = None;
    }

    /// Maps the window-space cursor into the fixed view buffer. pixels draws the buffer
    /// at the largest whole-number scale that fits and centers it, so anything over the
    /// letterbox bars is `None`.
    fn cursor_view_px(&self) -> Option<Vec2> {
        let cursor = self.cursor_window_px?;
        if self.view_width == 0 || self.view_height == 0 {
            return None;
        }
        let view_width = self.view_width as f32;
        let view_height = self.view_height as f32;
        let width_ratio = (self.window_width as f32 / view_width).max(1.0);
        let height_ratio = (self.window_height as f32 / view_height).max(1.0);
        let scale = width_ratio.clamp(1.0, height_ratio).floor();
        let offset_x = (self.window_width as f32 - view_width * scale) * 0.5;
        let offset_y = (self.window_height as f32 - view_height * scale) * 0.5;

        let x = (cursor.x - offset_x) / scale;
        let y = (cursor.y - offset_y) / scale;
        if !(0.0..view_width).contains(&x) || !(0.0..view_height).contains(&y) {
            return None;
        }
        Some(Vec2 { x, y })
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn target_frame_duration(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}
