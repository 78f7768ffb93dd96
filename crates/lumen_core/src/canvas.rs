//! Pixel canvas used as the render target and as image-texture storage.
//!
//! Colors are stored unclamped in linear `[0, 1]`-ish space. Clamping only
//! happens when converting to 8-bit, so intermediate blending keeps its
//! full range.

use std::path::Path;

use lumen_math::Color;
use thiserror::Error;

/// Errors that can occur when writing, loading or saving a canvas.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;

/// A fixed-size grid of colors.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> CanvasResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Write one pixel. Out-of-bounds writes are an error.
    pub fn put(&mut self, x: u32, y: u32, color: Color) -> CanvasResult<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Write a full row starting at column 0.
    pub fn put_row(&mut self, y: u32, row: &[Color]) -> CanvasResult<()> {
        for (x, color) in row.iter().enumerate() {
            self.put(x as u32, y, *color)?;
        }
        Ok(())
    }

    pub fn get(&self, x: u32, y: u32) -> CanvasResult<Color> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Pixel nearest to floating-point image coordinates, clamped to the edges.
    pub fn nearest(&self, x: f64, y: f64) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        let px = (x.round().max(0.0) as u32).min(self.width - 1);
        let py = (y.round().max(0.0) as u32).min(self.height - 1);
        self.pixels[py as usize * self.width as usize + px as usize]
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color)[..3]);
        }
        bytes
    }

    /// Save to any format the `image` crate infers from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Load an image file. 8-bit channels map linearly onto `[0, 1]`.
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    p[0] as f64 / 255.0,
                    p[1] as f64 / 255.0,
                    p[2] as f64 / 255.0,
                )
            })
            .collect();

        log::debug!("Loaded image: {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_black() {
        let c = Canvas::new(10, 20);
        assert_eq!(c.width(), 10);
        assert_eq!(c.height(), 20);
        assert_eq!(c.get(9, 19).unwrap(), Color::ZERO);
    }

    #[test]
    fn test_put_and_get() {
        let mut c = Canvas::new(10, 20);
        let red = Color::new(1.0, 0.0, 0.0);
        c.put(2, 3, red).unwrap();
        assert_eq!(c.get(2, 3).unwrap(), red);
    }

    #[test]
    fn test_put_out_of_bounds_fails() {
        let mut c = Canvas::new(4, 4);
        let err = c.put(4, 0, Color::ONE).unwrap_err();
        assert!(matches!(err, CanvasError::OutOfBounds { x: 4, y: 0, .. }));
        assert!(c.put(0, 4, Color::ONE).is_err());
    }

    #[test]
    fn test_put_row() {
        let mut c = Canvas::new(3, 2);
        c.put_row(1, &[Color::X, Color::Y, Color::Z]).unwrap();
        assert_eq!(c.get(2, 1).unwrap(), Color::Z);
        assert!(c.put_row(0, &[Color::X; 4]).is_err());
    }

    #[test]
    fn test_clamping_happens_at_conversion() {
        let mut c = Canvas::new(1, 1);
        let bright = Color::new(1.5, -0.5, 0.5);
        c.put(0, 0, bright).unwrap();
        // stored unclamped
        assert_eq!(c.get(0, 0).unwrap(), bright);
        assert_eq!(c.to_rgba8(), vec![255, 0, 128, 255]);
    }

    #[test]
    fn test_nearest_clamps_to_edges() {
        let mut c = Canvas::new(2, 2);
        c.put(1, 1, Color::ONE).unwrap();
        assert_eq!(c.nearest(0.9, 0.6), Color::ONE);
        assert_eq!(c.nearest(5.0, 5.0), Color::ONE);
        assert_eq!(c.nearest(-1.0, 0.0), Color::ZERO);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut c = Canvas::new(2, 1);
        c.put(0, 0, Color::new(1.0, 0.0, 0.0)).unwrap();
        c.put(1, 0, Color::new(0.0, 0.0, 1.0)).unwrap();

        let path = std::env::temp_dir().join("lumen_canvas_round_trip.png");
        c.save(&path).unwrap();
        let loaded = Canvas::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width(), 2);
        assert_eq!(loaded.get(0, 0).unwrap(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(loaded.get(1, 0).unwrap(), Color::new(0.0, 0.0, 1.0));
    }
}
