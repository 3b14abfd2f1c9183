//! Numerical core of the IDW overlay.
//!
//! Pipeline stages, in order:
//! - Grid interpolation (inverse distance weighting over a cell grid)
//! - Cell stamping (density field in the alpha channel)
//! - Gradient colorization (alpha byte -> RGBA via lookup table)

pub mod buffer;
pub mod colorize;
pub mod interpolate;
pub mod png;
pub mod stamp;

pub use buffer::RasterBuffer;
pub use interpolate::{CellGrid, GeoScale, GridDims, InterpolatedCell, InterpolationParams};
pub use stamp::Stamp;
