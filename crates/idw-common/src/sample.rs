//! Sample point types.

use serde::{Deserialize, Serialize};

/// A geographically located sample as supplied by the caller.
///
/// `value` is optional; a sample without one counts as 1.0, which turns the
/// interpolated surface into a pure presence-density map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoSample {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Measured value at this location
    #[serde(default)]
    pub value: Option<f64>,
}

impl GeoSample {
    pub fn new(lat: f64, lng: f64, value: f64) -> Self {
        Self {
            lat,
            lng,
            value: Some(value),
        }
    }

    /// A sample carrying the default value of 1.0.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            value: None,
        }
    }

    /// The effective value used during interpolation.
    pub fn effective_value(&self) -> f64 {
        self.value.unwrap_or(1.0)
    }
}

/// A sample projected into screen-pixel space for one interpolation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// X position in pixels
    pub x: f64,
    /// Y position in pixels
    pub y: f64,
    /// Sample value
    pub value: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_value_defaults_to_one() {
        assert_eq!(GeoSample::at(47.0, 8.0).effective_value(), 1.0);
        assert_eq!(GeoSample::new(47.0, 8.0, 3.5).effective_value(), 3.5);
    }

    #[test]
    fn test_geo_sample_json_value_optional() {
        let s: GeoSample = serde_json::from_str(r#"{"lat": 46.5, "lng": 7.25}"#).unwrap();
        assert!(s.value.is_none());

        let s: GeoSample =
            serde_json::from_str(r#"{"lat": 46.5, "lng": 7.25, "value": 12.0}"#).unwrap();
        assert_eq!(s.value, Some(12.0));
    }
}
