mod clock;
mod draw;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use draw::{with_alpha, DrawCmd, DrawList, Rgba};
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::FrameMetricsSnapshot;
pub use rendering::{text_width_px, world_to_screen, Camera2D, RenderError, Renderer, Viewport};
pub use scene::{InputSnapshot, Scene, Vec2};
