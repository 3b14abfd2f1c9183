//! The per-layer context tying samples, options, and the render pipeline
//! to a host viewport.

use std::path::Path;
use std::time::Instant;

use idw_common::{GeoSample, GradientLut, IdwResult, Sample};
use idw_render::colorize::colorize;
use idw_render::stamp::stamp_cells;
use idw_render::{png, CellGrid, GeoScale, GridDims, InterpolationParams, RasterBuffer, Stamp};

use crate::config::IdwOptions;
use crate::viewport::Viewport;

/// An IDW overlay layer bound to one viewport.
///
/// Owns every piece of per-layer state the pipeline touches: the sample
/// set, validated options, the materialized gradient table, the stamp, the
/// grid accumulators, and the output raster. Grid and raster storage is
/// reused across passes and resized only when the viewport grows.
///
/// Redraws are coalesced: mutations set a pending flag, and the host's
/// `on_frame` call runs at most one pass per frame. Requests made while
/// the viewport is animating are dropped, matching the expectation that
/// the host re-triggers once the animation settles.
pub struct IdwLayer<V: Viewport> {
    viewport: V,
    samples: Vec<GeoSample>,
    options: IdwOptions,
    lut: GradientLut,
    stamp: Stamp,
    grid: CellGrid,
    buffer: RasterBuffer,
    projected: Vec<Sample>,
    redraw_pending: bool,
}

impl<V: Viewport> IdwLayer<V> {
    /// Create a layer; options are validated and the gradient materialized
    /// up front.
    pub fn new(viewport: V, samples: Vec<GeoSample>, options: IdwOptions) -> IdwResult<Self> {
        options.validate()?;
        let lut = options.gradient.build_lut()?;
        let stamp = Stamp::new(options.cell_size);

        Ok(Self {
            viewport,
            samples,
            options,
            lut,
            stamp,
            grid: CellGrid::new(),
            buffer: RasterBuffer::new(),
            projected: Vec::new(),
            redraw_pending: true,
        })
    }

    pub fn options(&self) -> &IdwOptions {
        &self.options
    }

    pub fn samples(&self) -> &[GeoSample] {
        &self.samples
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The colorized output raster from the most recent pass.
    pub fn raster(&self) -> &RasterBuffer {
        &self.buffer
    }

    /// Replace the whole sample set.
    pub fn set_samples(&mut self, samples: Vec<GeoSample>) {
        self.samples = samples;
        self.request_redraw();
    }

    /// Append one sample.
    pub fn add_sample(&mut self, sample: GeoSample) {
        self.samples.push(sample);
        self.request_redraw();
    }

    pub fn clear_samples(&mut self) {
        self.samples.clear();
        self.request_redraw();
    }

    /// Swap in new options.
    ///
    /// Validation and gradient materialization happen before any layer
    /// state changes, so a rejected update leaves the previous options and
    /// the current raster intact.
    pub fn set_options(&mut self, options: IdwOptions) -> IdwResult<()> {
        options.validate()?;
        let lut = options.gradient.build_lut()?;

        self.stamp = Stamp::new(options.cell_size);
        self.lut = lut;
        self.options = options;
        self.request_redraw();
        Ok(())
    }

    /// Note a pan/zoom/resize; equivalent to any other redraw trigger.
    pub fn viewport_changed(&mut self) {
        self.request_redraw();
    }

    /// Ask for a recompute at the next frame boundary.
    ///
    /// Repeated requests within one frame coalesce into a single pass.
    /// While the viewport is animating the request is dropped; the host
    /// signals again via `viewport_changed` once it settles.
    pub fn request_redraw(&mut self) {
        if self.viewport.is_animating() {
            return;
        }
        self.redraw_pending = true;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Frame-boundary hook, called by the host once per display refresh.
    ///
    /// Runs the pending pass, if any. Returns whether a pass ran.
    pub fn on_frame(&mut self) -> bool {
        if !self.redraw_pending || self.viewport.is_animating() {
            return false;
        }
        self.redraw_pending = false;
        self.redraw();
        true
    }

    /// Run one full interpolation pass synchronously.
    ///
    /// Uninterruptible by design: no other pass can touch this layer's
    /// grid or raster while it runs.
    pub fn redraw(&mut self) {
        let (width, height) = self.viewport.size();
        let dims = GridDims::for_viewport(width, height, self.options.cell_size);

        self.projected.clear();
        for s in &self.samples {
            let (x, y) = self.viewport.project(s.lat, s.lng);
            self.projected.push(Sample::new(x, y, s.effective_value()));
        }

        let geo_scale = if self.options.range > 0.0 {
            let (lng_span, lat_span) = self.viewport.geo_span();
            Some(GeoScale::from_viewport(lng_span, lat_span, width, height))
        } else {
            None
        };
        let params = InterpolationParams {
            exp: self.options.exp,
            range: self.options.range,
            max: self.options.max,
            geo_scale,
        };

        let started = Instant::now();
        self.grid.reset(dims);
        self.grid.accumulate(&self.projected, &params);
        let cells = self.grid.resolve(self.options.max);
        tracing::debug!(
            samples = self.projected.len(),
            cols = dims.cols,
            rows = dims.rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "interpolated grid"
        );

        let started = Instant::now();
        self.buffer.prepare(width, height);
        stamp_cells(&mut self.buffer, &cells, &self.stamp, self.options.max);
        colorize(
            self.buffer.pixels_mut(),
            &self.lut,
            self.options.opacity,
            self.options.range > 0.0,
        );
        tracing::debug!(
            cells = cells.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "drew cells"
        );
    }

    /// Dump the current raster to a PNG file.
    pub fn snapshot(&self, path: impl AsRef<Path>) -> IdwResult<()> {
        png::write_png(
            path,
            self.buffer.pixels(),
            self.buffer.width() as usize,
            self.buffer.height() as usize,
        )
    }
}

/// Pure geometric transform the host applies to the existing raster during
/// a zoom animation, instead of recomputing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    /// Uniform scale factor
    pub scale: f64,
    /// Translation x in pixels
    pub dx: f64,
    /// Translation y in pixels
    pub dy: f64,
}

impl ZoomTransform {
    /// Transform that scales the raster around a fixed focus point.
    pub fn around(scale: f64, focus_x: f64, focus_y: f64) -> Self {
        Self {
            scale,
            dx: focus_x * (1.0 - scale),
            dy: focus_y * (1.0 - scale),
        }
    }

    /// Map a raster-space point through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.dx, y * self.scale + self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_transform_fixes_focus_point() {
        let t = ZoomTransform::around(2.0, 50.0, 80.0);
        assert_eq!(t.apply(50.0, 80.0), (50.0, 80.0));
    }

    #[test]
    fn test_zoom_transform_scales_about_focus() {
        let t = ZoomTransform::around(2.0, 50.0, 50.0);
        // a point 10px right of focus moves to 20px right
        assert_eq!(t.apply(60.0, 50.0), (70.0, 50.0));

        let t = ZoomTransform::around(0.5, 0.0, 0.0);
        assert_eq!(t.apply(100.0, 40.0), (50.0, 20.0));
    }
}
