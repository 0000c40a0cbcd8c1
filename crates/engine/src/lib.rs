//! Runtime shell: window, per-frame input snapshots, frame clock, and a primitive draw list
//! rasterized into a fixed-size pixel buffer. Game rules live in the game crate.

pub mod app;

pub use app::{
    run_app, text_width_px, with_alpha, world_to_screen, AppError, Camera2D, DrawCmd, DrawList,
    FrameMetricsSnapshot, InputAction, InputSnapshot, LoopConfig, RenderError, Renderer, Rgba,
    Scene, Vec2, Viewport,
};
