//! Layer configuration.

use idw_common::{GradientSpec, IdwError, IdwResult};
use serde::{Deserialize, Serialize};

/// Options for an IDW overlay layer.
///
/// Immutable once handed to the layer; changes go through
/// `IdwLayer::set_options`, which re-validates. Validation rejects bad
/// values outright rather than clamping them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdwOptions {
    /// Pixel side length of one grid cell.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// Power exponent of the distance weight.
    #[serde(default = "default_exp")]
    pub exp: f64,

    /// Normalization ceiling: resolved values clamp to `[0, max]` and
    /// stamp opacity is `value / max`.
    #[serde(default = "default_max")]
    pub max: f64,

    /// Effective sample radius in km; 0 disables range limiting.
    #[serde(default)]
    pub range: f64,

    /// Output opacity of the colorized overlay, in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Color gradient for density mapping.
    #[serde(default)]
    pub gradient: GradientSpec,
}

fn default_cell_size() -> u32 {
    25
}
fn default_exp() -> f64 {
    2.0
}
fn default_max() -> f64 {
    1.0
}
fn default_opacity() -> f64 {
    0.5
}

impl Default for IdwOptions {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            exp: default_exp(),
            max: default_max(),
            range: 0.0,
            opacity: default_opacity(),
            gradient: GradientSpec::default(),
        }
    }
}

impl IdwOptions {
    /// Parse options from a JSON string and validate them.
    pub fn from_json(json: &str) -> IdwResult<Self> {
        let options: IdwOptions = serde_json::from_str(json)
            .map_err(|e| IdwError::invalid("options", e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Validate all option values.
    pub fn validate(&self) -> IdwResult<()> {
        if self.cell_size == 0 {
            return Err(IdwError::invalid("cell_size", "must be positive"));
        }
        if !self.exp.is_finite() {
            return Err(IdwError::invalid("exp", "must be finite"));
        }
        if !self.max.is_finite() || self.max <= 0.0 {
            return Err(IdwError::invalid("max", "must be a positive number"));
        }
        if !self.range.is_finite() || self.range < 0.0 {
            return Err(IdwError::invalid("range", "must be zero or positive"));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(IdwError::invalid("opacity", "must lie in [0, 1]"));
        }
        self.gradient.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = IdwOptions::default();
        options.validate().unwrap();
        assert_eq!(options.cell_size, 25);
        assert_eq!(options.exp, 2.0);
        assert_eq!(options.max, 1.0);
        assert_eq!(options.range, 0.0);
        assert_eq!(options.opacity, 0.5);
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let options = IdwOptions {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(IdwError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_max() {
        for max in [0.0, -1.0, f64::NAN] {
            let options = IdwOptions {
                max,
                ..Default::default()
            };
            assert!(options.validate().is_err(), "max = {}", max);
        }
    }

    #[test]
    fn test_rejects_out_of_range_opacity() {
        for opacity in [-0.1, 1.1, f64::INFINITY] {
            let options = IdwOptions {
                opacity,
                ..Default::default()
            };
            assert!(options.validate().is_err(), "opacity = {}", opacity);
        }
    }

    #[test]
    fn test_rejects_negative_range() {
        let options = IdwOptions {
            range: -4.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_from_json_with_partial_fields() {
        let options = IdwOptions::from_json(r#"{"cell_size": 10, "max": 100.0}"#).unwrap();
        assert_eq!(options.cell_size, 10);
        assert_eq!(options.max, 100.0);
        assert_eq!(options.exp, 2.0, "unspecified fields take defaults");
    }

    #[test]
    fn test_from_json_rejects_bad_gradient() {
        let json = r##"{"gradient": {"stops": [{"position": 0.0, "color": "#000000"}]}}"##;
        assert!(matches!(
            IdwOptions::from_json(json),
            Err(IdwError::MalformedGradient(_))
        ));
    }
}
