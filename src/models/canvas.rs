use serde::Serialize;

/// Geometry of the drawing surface.
///
/// The surface is `grid` cells on a side, each cell `scale` pixels wide, so
/// one cell is exactly one downsampling block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSpec {
    pub grid: u32,
    pub scale: u32,
    pub line_width: u32,
}

impl CanvasSpec {
    /// 28x28 grid at scale 21 (588x588 pixels), 2-cell pen
    pub const DEFAULT: Self = Self {
        grid: 28,
        scale: 21,
        line_width: 2,
    };

    /// Canvas width in pixels, saturating at `u32::MAX`
    pub fn width(&self) -> u32 {
        self.grid.saturating_mul(self.scale)
    }

    /// Canvas height in pixels, saturating at `u32::MAX`
    pub fn height(&self) -> u32 {
        self.grid.saturating_mul(self.scale)
    }

    /// Pen width in pixels, saturating at `u32::MAX`
    pub fn stroke_width(&self) -> u32 {
        self.line_width.saturating_mul(self.scale)
    }

    /// Same canvas at a different scale factor
    pub fn with_scale(self, scale: u32) -> Self {
        Self { scale, ..self }
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A captured RGBA canvas, 4 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaCanvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaCanvas {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Solid canvas of one color
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }
}
