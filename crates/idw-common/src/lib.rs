//! Common types shared across the idw-overlay crates.

pub mod error;
pub mod gradient;
pub mod sample;

pub use error::{IdwError, IdwResult};
pub use gradient::{Color, ColorStop, GradientLut, GradientSpec};
pub use sample::{GeoSample, Sample};
