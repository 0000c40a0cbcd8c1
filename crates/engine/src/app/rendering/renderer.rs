use pixels::{Pixels, SurfaceTexture, TextureError};
use thiserror::Error;
use winit::window::Window;

use crate::app::draw::{DrawCmd, DrawList, Rgba};

use super::glyphs::{glyph_for, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::Viewport;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create pixel surface: {0}")]
    Create(#[source] pixels::Error),
    #[error("failed to resize pixel surface: {0}")]
    Resize(#[source] TextureError),
    #[error("failed to present frame: {0}")]
    Present(#[source] pixels::Error),
}

/// Fixed-size view buffer scaled onto the window surface. Scenes always draw in view
/// pixels regardless of the window's physical size.
pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: &'static Window, viewport: Viewport) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels =
            Pixels::new(viewport.width, viewport.height, surface).map_err(RenderError::Create)?;
        Ok(Self { pixels, viewport })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels
            .resize_surface(width, height)
            .map_err(RenderError::Resize)
    }

    pub fn render(&mut self, draw: &DrawList) -> Result<(), RenderError> {
        let Viewport { width, height } = self.viewport;
        rasterize(self.pixels.frame_mut(), width, height, draw);
        self.pixels.render().map_err(RenderError::Present)
    }
}

pub(crate) fn rasterize(frame: &mut [u8], width: u32, height: u32, draw: &DrawList) {
    if width == 0 || height == 0 {
        return;
    }
    for cmd in draw.commands() {
        match cmd {
            DrawCmd::Clear(color) => {
                for chunk in frame.chunks_exact_mut(4) {
                    chunk.copy_from_slice(color);
                }
            }
            DrawCmd::FillRect {
                x,
                y,
                width: rect_width,
                height: rect_height,
                color,
            } => draw_filled_rect(frame, width, height, *x, *y, *rect_width, *rect_height, *color),
            DrawCmd::OutlineRect {
                x,
                y,
                width: rect_width,
                height: rect_height,
                color,
            } => draw_rect_outline(frame, width, height, *x, *y, *rect_width, *rect_height, *color),
            DrawCmd::FillCircle {
                cx,
                cy,
                radius,
                color,
            } => draw_filled_circle(frame, width, height, *cx, *cy, *radius, *color),
            DrawCmd::Line {
                x0,
                y0,
                x1,
                y1,
                color,
            } => draw_line(frame, width, height, (*x0, *y0), (*x1, *y1), *color),
            DrawCmd::Text {
                x,
                y,
                scale,
                text,
                color,
            } => draw_text(frame, width, height, *x, *y, *scale, text, *color),
            DrawCmd::Tint(color) => apply_tint(frame, *color),
        }
    }
}

fn blend_pixel(frame: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let index = (y as usize * width as usize + x as usize) * 4;
    let Some(dst) = frame.get_mut(index..index + 4) else {
        return;
    };
    let alpha = color[3] as u32;
    if alpha == 255 {
        dst[..3].copy_from_slice(&color[..3]);
        dst[3] = 255;
        return;
    }
    if alpha == 0 {
        return;
    }
    let inv = 255 - alpha;
    for channel in 0..3 {
        dst[channel] = ((color[channel] as u32 * alpha + dst[channel] as u32 * inv) / 255) as u8;
    }
    dst[3] = 255;
}

#[allow(clippy::too_many_arguments)]
fn draw_filled_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = x.saturating_add(rect_width).min(width as i32);
    let end_y = y.saturating_add(rect_height).min(height as i32);
    for py in start_y..end_y {
        for px in start_x..end_x {
            blend_pixel(frame, width, height, px, py, color);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_rect_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    draw_filled_rect(frame, width, height, x, y, rect_width, 1, color);
    draw_filled_rect(frame, width, height, x, y + rect_height - 1, rect_width, 1, color);
    draw_filled_rect(frame, width, height, x, y + 1, 1, rect_height - 2, color);
    draw_filled_rect(frame, width, height, x + rect_width - 1, y + 1, 1, rect_height - 2, color);
}

fn draw_filled_circle(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Rgba,
) {
    let radius_sq = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius_sq {
                blend_pixel(frame, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

fn draw_line(
    frame: &mut [u8],
    width: u32,
    height: u32,
    from: (i32, i32),
    to: (i32, i32),
    color: Rgba,
) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend_pixel(frame, width, height, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += step_x;
        }
        if doubled <= dx {
            err += dx;
            y += step_y;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    scale: i32,
    text: &str,
    color: Rgba,
) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    for ch in text.chars() {
        let glyph = glyph_for(ch);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if glyph.is_set(col, row) {
                    draw_filled_rect(
                        frame,
                        width,
                        height,
                        x + col * scale,
                        y + row * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
        x += advance;
    }
}

fn apply_tint(frame: &mut [u8], color: Rgba) {
    for chunk in frame.chunks_exact_mut(4) {
        for channel in 0..3 {
            chunk[channel] = ((chunk[channel] as u32 * color[channel] as u32) / 255) as u8;
        }
    }
}

/// Pixel width of `text` at `scale`, matching the advance used when drawing.
pub fn text_width_px(text: &str, scale: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * (GLYPH_WIDTH + 1) * scale - scale
}
