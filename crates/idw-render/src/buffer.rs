//! Reusable RGBA raster buffer.
//!
//! One buffer per layer, owned by a single interpolation pass at a time.
//! Storage survives across passes and only grows; `prepare` reshapes and
//! clears it to transparent, reallocating only when the viewport grows
//! past any size seen before.

/// A viewport-sized RGBA pixel buffer (4 bytes per pixel, row-major).
#[derive(Debug, Default)]
pub struct RasterBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reshape for the given viewport and clear to fully transparent.
    pub fn prepare(&mut self, width: u32, height: u32) {
        let len = width as usize * height as usize * 4;
        if self.pixels.len() < len {
            self.pixels.resize(len, 0);
        }
        self.pixels[..len].fill(0);
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Active pixel data, exactly `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.len()]
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.pixels[..len]
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}
