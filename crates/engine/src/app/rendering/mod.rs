mod glyphs;
mod renderer;
mod transform;

pub use renderer::{text_width_px, RenderError, Renderer};
pub use transform::{world_to_screen, Camera2D, Viewport};
