//! Per-layer binding of the IDW render pipeline to a host viewport.
//!
//! The host supplies projection and sizing through the [`Viewport`] trait
//! and drives scheduling by calling [`IdwLayer::on_frame`] at its frame
//! boundary; the layer owns everything else (samples, options, grid,
//! raster).

pub mod config;
pub mod layer;
pub mod viewport;

pub use config::IdwOptions;
pub use layer::{IdwLayer, ZoomTransform};
pub use viewport::{FixedViewport, Viewport};
