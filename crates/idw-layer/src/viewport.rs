//! The host-facing viewport seam.

/// Interface the host map system implements for a layer.
///
/// The layer calls `project` once per sample per pass and `geo_span` only
/// when range limiting is active. Scheduling is inverted: the host owns the
/// frame loop and reports animation state; the layer never blocks or spins.
pub trait Viewport {
    /// Geographic-to-pixel projection for the current view.
    fn project(&self, lat: f64, lng: f64) -> (f64, f64);

    /// Viewport dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Absolute (longitude span, latitude span) of the visible area in
    /// degrees.
    fn geo_span(&self) -> (f64, f64);

    /// Whether the host is mid pan/zoom animation. Redraws are deferred
    /// while this is true.
    fn is_animating(&self) -> bool {
        false
    }
}

/// A fixed equirectangular viewport, for tests and demos.
///
/// Maps a lat/lng box linearly onto the pixel rectangle; no wrap-around
/// handling.
#[derive(Debug, Clone)]
pub struct FixedViewport {
    width: u32,
    height: u32,
    min_lng: f64,
    max_lng: f64,
    min_lat: f64,
    max_lat: f64,
    animating: bool,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32, min_lng: f64, max_lng: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            width,
            height,
            min_lng,
            max_lng,
            min_lat,
            max_lat,
            animating: false,
        }
    }

    /// Flip the animation flag the host would normally manage.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Change the pixel dimensions, as a host resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Viewport for FixedViewport {
    fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let x = (lng - self.min_lng) / (self.max_lng - self.min_lng) * self.width as f64;
        let y = (self.max_lat - lat) / (self.max_lat - self.min_lat) * self.height as f64;
        (x, y)
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn geo_span(&self) -> (f64, f64) {
        (
            (self.max_lng - self.min_lng).abs(),
            (self.max_lat - self.min_lat).abs(),
        )
    }

    fn is_animating(&self) -> bool {
        self.animating
    }
}
