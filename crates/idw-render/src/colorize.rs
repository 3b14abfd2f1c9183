//! Gradient colorization of a density raster.
//!
//! Rewrites the buffer in place: each pixel's alpha byte selects an RGB
//! entry from the 256-entry gradient table, and alpha is replaced with the
//! layer's fixed output opacity. Density chooses the color, not the
//! transparency.

use idw_common::GradientLut;

/// Colorize an RGBA buffer in place.
///
/// When `range_limited` is set, pixels with zero density are skipped and
/// stay fully transparent: "no data within range" must remain
/// distinguishable from "interpolated value of zero", which colorizes to
/// the gradient's zero stop like any other density.
pub fn colorize(pixels: &mut [u8], lut: &GradientLut, opacity: f64, range_limited: bool) {
    let out_alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

    for px in pixels.chunks_exact_mut(4) {
        let a = px[3];
        if range_limited && a == 0 {
            continue;
        }
        let [r, g, b, _] = lut.get(a);
        px[0] = r;
        px[1] = g;
        px[2] = b;
        px[3] = out_alpha;
    }
}
