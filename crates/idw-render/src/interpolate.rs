//! Inverse-distance-weighted grid interpolation.
//!
//! For every cell of a grid covering the viewport, computes a weighted
//! average of the sample values, weight = `1 / distance^exp`. Two
//! accumulation paths share one contract:
//!
//! - **Unlimited**: every sample contributes to every cell. Naive
//!   O(samples × cells); fine for small grids, documented as such.
//! - **Range-limited** (`range > 0` km): each sample only visits the cells
//!   inside its real-world radius, bounding the cost to
//!   O(samples × cells-in-range). Requires per-axis km-per-pixel scale
//!   factors since longitude and latitude do not scale isotropically.

use idw_common::Sample;

/// Kilometers per degree of longitude (mid-latitude approximation).
const KM_PER_DEG_LNG: f64 = 104.64;
/// Kilometers per degree of latitude.
const KM_PER_DEG_LAT: f64 = 110.69;

/// Accumulator sentinel: a sample landed exactly on this cell's center.
/// The cell's numerator holds that sample's value verbatim and no further
/// contribution may touch it.
const EXACT_HIT: f64 = -1.0;

/// Grid dimensions derived from the viewport and cell size.
///
/// The grid covers the pixel box `[-r, width + r] × [-r, height + r]` so
/// samples just outside the viewport still influence visible cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Cell side length in pixels
    pub cell_size: u32,
}

impl GridDims {
    /// Compute grid dimensions for a viewport.
    ///
    /// `cols = ceil((width + 2r)/r) + 1`, `rows = ceil((height + 2r)/r) + 1`.
    pub fn for_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        let r = cell_size as f64;
        let cols = ((width as f64 + 2.0 * r) / r).ceil() as usize + 1;
        let rows = ((height as f64 + 2.0 * r) / r).ceil() as usize + 1;
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    /// Pixel center of cell `(row, col)`.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let r = self.cell_size as f64;
        (col as f64 * r + r / 2.0, row as f64 * r + r / 2.0)
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

/// Per-axis real-world scale of the viewport, in km per pixel.
#[derive(Debug, Clone, Copy)]
pub struct GeoScale {
    /// km per pixel along the x axis
    pub km_per_px_x: f64,
    /// km per pixel along the y axis
    pub km_per_px_y: f64,
}

impl GeoScale {
    /// Derive scale factors from the viewport's geographic span.
    ///
    /// `lng_span`/`lat_span` are the absolute degree spans of the visible
    /// area; `width`/`height` its pixel dimensions.
    pub fn from_viewport(lng_span: f64, lat_span: f64, width: u32, height: u32) -> Self {
        Self {
            km_per_px_x: lng_span.abs() * KM_PER_DEG_LNG / width as f64,
            km_per_px_y: lat_span.abs() * KM_PER_DEG_LAT / height as f64,
        }
    }

    /// Real-world distance in km between two pixel positions.
    #[inline]
    fn km_distance(&self, dx_px: f64, dy_px: f64) -> f64 {
        let dx = dx_px * self.km_per_px_x;
        let dy = dy_px * self.km_per_px_y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Parameters for one interpolation pass.
#[derive(Debug, Clone, Copy)]
pub struct InterpolationParams {
    /// Power exponent for the distance weight. `0.0` degenerates to an
    /// unweighted mean (`d^0 = 1`); no division by zero is possible since
    /// `d == 0` takes the exact-hit path before the power is evaluated.
    pub exp: f64,
    /// Effective radius in km; `0.0` disables range limiting.
    pub range: f64,
    /// Normalization ceiling for resolved values.
    pub max: f64,
    /// Viewport scale, required when `range > 0`.
    pub geo_scale: Option<GeoScale>,
}

/// One resolved grid cell, positioned by its top-left pixel corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedCell {
    /// X pixel position
    pub x: i32,
    /// Y pixel position
    pub y: i32,
    /// Resolved value, clamped to `[0, max]`
    pub value: f64,
}

/// Reusable numerator/denominator accumulators for the interpolation grid.
///
/// Row-major layout, `row * cols + col`. Storage is kept across passes and
/// only grows; `reset` reshapes and zeroes it.
#[derive(Debug, Default)]
pub struct CellGrid {
    num: Vec<f64>,
    den: Vec<f64>,
    cols: usize,
    rows: usize,
    cell_size: u32,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reshape for the given dimensions and zero all accumulators.
    pub fn reset(&mut self, dims: GridDims) {
        let len = dims.len();
        if self.num.len() < len {
            self.num.resize(len, 0.0);
            self.den.resize(len, 0.0);
        }
        self.num[..len].fill(0.0);
        self.den[..len].fill(0.0);
        self.cols = dims.cols;
        self.rows = dims.rows;
        self.cell_size = dims.cell_size;
    }

    pub fn dims(&self) -> GridDims {
        GridDims {
            cols: self.cols,
            rows: self.rows,
            cell_size: self.cell_size,
        }
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Accumulate every sample into the grid.
    ///
    /// Range limiting requires a [`GeoScale`]; when `range > 0` arrives
    /// without one, the pass falls back to unlimited interpolation and
    /// logs a warning rather than guessing a scale.
    pub fn accumulate(&mut self, samples: &[Sample], params: &InterpolationParams) {
        if params.range > 0.0 {
            if let Some(scale) = params.geo_scale {
                for sample in samples {
                    self.accumulate_ranged(sample, params.exp, params.range, scale);
                }
                return;
            }
            tracing::warn!(
                range_km = params.range,
                "range limiting requested without a geo scale, interpolating unlimited"
            );
        }

        // Naive path: every sample visits every cell.
        for sample in samples {
            self.accumulate_box(
                sample,
                params.exp,
                None,
                0,
                self.cols.saturating_sub(1),
                0,
                self.rows.saturating_sub(1),
            );
        }
    }

    /// Range-limited accumulation: clip the sample's candidate-cell box to
    /// the grid, then run the shared inner loop with a km distance cutoff.
    fn accumulate_ranged(&mut self, sample: &Sample, exp: f64, range: f64, scale: GeoScale) {
        let r = self.cell_size as f64;
        // pixel-space half extents of the effective radius, per axis
        let half_x = range / scale.km_per_px_x;
        let half_y = range / scale.km_per_px_y;

        // cell indices whose centers can lie inside the box; the km check
        // in the inner loop re-filters, so a one-cell-generous box is fine
        let col_min = ((sample.x - half_x) / r - 0.5).floor();
        let col_max = ((sample.x + half_x) / r - 0.5).ceil();
        let row_min = ((sample.y - half_y) / r - 0.5).floor();
        let row_max = ((sample.y + half_y) / r - 0.5).ceil();

        // discard samples whose box misses the grid entirely
        if col_max < 0.0 || row_max < 0.0 {
            return;
        }
        if col_min >= self.cols as f64 || row_min >= self.rows as f64 {
            return;
        }

        let col_min = col_min.max(0.0) as usize;
        let col_max = (col_max as usize).min(self.cols - 1);
        let row_min = row_min.max(0.0) as usize;
        let row_max = (row_max as usize).min(self.rows - 1);

        self.accumulate_box(
            sample,
            exp,
            Some((range, scale)),
            col_min,
            col_max,
            row_min,
            row_max,
        );
    }

    /// Accumulate one sample over an inclusive cell-index box.
    #[allow(clippy::too_many_arguments)]
    fn accumulate_box(
        &mut self,
        sample: &Sample,
        exp: f64,
        cutoff: Option<(f64, GeoScale)>,
        col_min: usize,
        col_max: usize,
        row_min: usize,
        row_max: usize,
    ) {
        let dims = self.dims();
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                let i = self.idx(row, col);
                if self.den[i] < 0.0 {
                    // cell fixed by an exact hit
                    continue;
                }

                let (cx, cy) = dims.cell_center(row, col);
                let dx = sample.x - cx;
                let dy = sample.y - cy;

                if let Some((range, scale)) = cutoff {
                    if scale.km_distance(dx, dy) > range {
                        continue;
                    }
                }

                let d = (dx * dx + dy * dy).sqrt();
                if d == 0.0 {
                    // sample sits on the cell center: value is taken verbatim
                    self.num[i] = sample.value;
                    self.den[i] = EXACT_HIT;
                } else {
                    let w = d.powf(exp);
                    self.num[i] += sample.value / w;
                    self.den[i] += 1.0 / w;
                }
            }
        }
    }

    /// Resolve accumulators into positioned cell values.
    ///
    /// Exact-hit cells keep their sample's value; untouched cells resolve
    /// to 0; everything else is `num/den`. Values clamp to `[0, max]`.
    pub fn resolve(&self, max: f64) -> Vec<InterpolatedCell> {
        let r = self.cell_size as f64;
        let mut cells = Vec::with_capacity(self.cols * self.rows);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let i = self.idx(row, col);
                let den = if self.den[i] < 0.0 { 1.0 } else { self.den[i] };
                let value = if den == 0.0 {
                    0.0
                } else {
                    self.num[i] / den
                };

                cells.push(InterpolatedCell {
                    x: (col as f64 * r).round() as i32,
                    y: (row as f64 * r).round() as i32,
                    value: value.clamp(0.0, max),
                });
            }
        }

        tracing::debug!(
            cols = self.cols,
            rows = self.rows,
            cells = cells.len(),
            "resolved interpolation grid"
        );

        cells
    }
}
