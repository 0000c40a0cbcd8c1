/// RGBA color; alpha below 255 is blended over what is already in the frame.
pub type Rgba = [u8; 4];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rgba),
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
    OutlineRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
    FillCircle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Rgba,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        scale: i32,
        text: String,
        color: Rgba,
    },
    /// Multiplies every pixel channel by `color / 255`.
    Tint(Rgba),
}

/// Screen-space primitives recorded by a scene and rasterized by the renderer in order.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.cmds.clear();
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self, color: Rgba) {
        self.cmds.push(DrawCmd::Clear(color));
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.cmds.push(DrawCmd::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn outline_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width <= 1 || height <= 1 {
            return;
        }
        self.cmds.push(DrawCmd::OutlineRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            return;
        }
        self.cmds.push(DrawCmd::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        self.cmds.push(DrawCmd::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    pub fn text(&mut self, x: i32, y: i32, scale: i32, text: impl Into<String>, color: Rgba) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Text {
            x,
            y,
            scale: scale.max(1),
            text,
            color,
        });
    }

    pub fn tint(&mut self, color: Rgba) {
        if color == [255, 255, 255, 255] {
            return;
        }
        self.cmds.push(DrawCmd::Tint(color));
    }
}

pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    let alpha = (alpha.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
    [color[0], color[1], color[2], alpha]
}
