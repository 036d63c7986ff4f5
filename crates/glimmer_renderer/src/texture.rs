//! In-memory image textures for uv-mapped patterns.

use glimmer_math::Color;
use thiserror::Error;

pub type TextureResult<T> = Result<T, TextureError>;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Row-major pixel grid sampled by uv coordinates. Pixels are stored
/// top row first, so `v` is flipped at sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTexture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageTexture {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> TextureResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Fill a texture procedurally from a per-pixel closure.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Nearest-pixel sample at `(u, v)`, both in `0.0..=1.0` with `v`
    /// growing upward.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let v = 1.0 - v;
        let x = (u * (self.width - 1) as f64).round().min((self.width - 1) as f64);
        let y = (v * (self.height - 1) as f64).round().min((self.height - 1) as f64);
        self.pixel_at(x as u32, y as u32)
    }
}
