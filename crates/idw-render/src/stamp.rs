//! Cell stamping: turn resolved grid values into a density raster.
//!
//! Each interpolated cell is drawn as a fully-opaque square brush of side
//! `r`, offset to `(cell.x - r, cell.y - r)`, with source alpha scaled by
//! `value / max`. Stamps composite source-over so overlapping footprints
//! blend instead of overwriting. After all cells are stamped, the buffer's
//! alpha channel holds the normalized density field; RGB stays zero until
//! colorization.

use crate::buffer::RasterBuffer;
use crate::interpolate::InterpolatedCell;

/// The square alpha brush used to rasterize one cell.
///
/// Built once per cell-size setting and reused for every cell of every
/// pass. The brush is uniform (fully opaque), so only its side length is
/// carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    size: u32,
}

impl Stamp {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Stamp every cell into the buffer's alpha channel.
///
/// `max` must be positive; cell values above it produce a fully-opaque
/// stamp rather than wrapping.
pub fn stamp_cells(buffer: &mut RasterBuffer, cells: &[InterpolatedCell], stamp: &Stamp, max: f64) {
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;
    let r = stamp.size() as i64;
    let pixels = buffer.pixels_mut();

    for cell in cells {
        let coverage = (cell.value / max).clamp(0.0, 1.0);
        if coverage == 0.0 {
            continue;
        }
        let src_a = (coverage * 255.0).round() as u32;

        // brush placement mirrors drawImage(cell, x - r, y - r)
        let x0 = cell.x as i64 - r;
        let y0 = cell.y as i64 - r;

        let col_start = x0.max(0);
        let col_end = (x0 + r).min(width);
        let row_start = y0.max(0);
        let row_end = (y0 + r).min(height);
        if col_start >= col_end || row_start >= row_end {
            continue;
        }

        for y in row_start..row_end {
            let row_base = (y * width) as usize * 4;
            for x in col_start..col_end {
                let a = &mut pixels[row_base + x as usize * 4 + 3];
                // source-over: out = src + dst * (1 - src)
                let dst = *a as u32;
                let out = src_a + dst * (255 - src_a) / 255;
                *a = out.min(255) as u8;
            }
        }
    }

    tracing::debug!(cells = cells.len(), "stamped density raster");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32, value: f64) -> InterpolatedCell {
        InterpolatedCell { x, y, value }
    }

    #[test]
    fn test_stamp_writes_scaled_alpha() {
        let mut buf = RasterBuffer::new();
        buf.prepare(60, 60);
        let stamp = Stamp::new(20);

        // stamp lands at (30 - 20, 30 - 20) .. (30, 30)
        stamp_cells(&mut buf, &[cell(30, 30, 5.0)], &stamp, 10.0);

        let alpha_at = |x: usize, y: usize| buf.pixels()[(y * 60 + x) * 4 + 3];
        assert_eq!(alpha_at(15, 15), 128);
        assert_eq!(alpha_at(10, 10), 128);
        assert_eq!(alpha_at(35, 35), 0, "outside the brush footprint");
    }

    #[test]
    fn test_zero_value_leaves_transparent() {
        let mut buf = RasterBuffer::new();
        buf.prepare(40, 40);
        stamp_cells(&mut buf, &[cell(20, 20, 0.0)], &Stamp::new(20), 1.0);
        assert!(buf.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_value_above_max_caps_at_opaque() {
        let mut buf = RasterBuffer::new();
        buf.prepare(40, 40);
        stamp_cells(&mut buf, &[cell(20, 20, 99.0)], &Stamp::new(20), 1.0);
        assert_eq!(buf.pixels()[(10 * 40 + 10) * 4 + 3], 255);
    }

    #[test]
    fn test_overlapping_stamps_accumulate() {
        let mut buf = RasterBuffer::new();
        buf.prepare(40, 40);
        let stamp = Stamp::new(20);
        let cells = [cell(20, 20, 0.5), cell(25, 20, 0.5)];
        stamp_cells(&mut buf, &cells, &stamp, 1.0);

        // overlap region gets src + dst*(1 - src) > either alone
        let overlap = buf.pixels()[(10 * 40 + 10) * 4 + 3];
        assert!(overlap > 128);
        assert!(overlap < 255);
    }

    #[test]
    fn test_stamp_clipped_at_buffer_edge() {
        let mut buf = RasterBuffer::new();
        buf.prepare(30, 30);
        // brush box starts at (-10, -10); only its lower-right quarter lands
        stamp_cells(&mut buf, &[cell(10, 10, 1.0)], &Stamp::new(20), 1.0);

        let alpha_at = |x: usize, y: usize| buf.pixels()[(y * 30 + x) * 4 + 3];
        assert_eq!(alpha_at(0, 0), 255);
        assert_eq!(alpha_at(9, 9), 255);
        assert_eq!(alpha_at(10, 10), 0);
    }
}
