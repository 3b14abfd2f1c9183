//! Gradient definitions for colorizing density rasters.
//!
//! A [`GradientSpec`] is the user-facing, serializable form: an ordered list
//! of color stops at positions in `[0, 1]`. Rendering never touches the
//! stops directly; the spec is materialized once into a [`GradientLut`] of
//! exactly 256 RGBA entries, indexed by a density byte.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IdwError, IdwResult};

/// Number of entries in a materialized gradient lookup table.
pub const LUT_SIZE: usize = 256;

/// Color representation supporting multiple input formats.
///
/// Untagged deserialization sends every JSON string through the `Hex`
/// variant, so its conversion also accepts named colors (no `#` prefix).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hex string ("#RRGGBB" or "#RRGGBBAA") or named color
    Hex(String),

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Named color
    Named(String),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    pub fn transparent() -> Self {
        Color::Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert to an RGBA tuple, or an error for unparseable input.
    pub fn to_rgba(&self) -> IdwResult<(u8, u8, u8, u8)> {
        match self {
            Color::Hex(s) if s.starts_with('#') => parse_hex_color(s),
            Color::Hex(s) => named_color(s),
            Color::Array(arr) => {
                if arr.len() != 3 && arr.len() != 4 {
                    return Err(IdwError::MalformedGradient(format!(
                        "color array must have 3 or 4 components, got {}",
                        arr.len()
                    )));
                }
                let a = arr.get(3).copied().unwrap_or(255);
                Ok((arr[0], arr[1], arr[2], a))
            }
            Color::Named(name) => named_color(name),
            Color::Rgba { r, g, b, a } => Ok((*r, *g, *b, *a)),
        }
    }
}

fn parse_hex_color(s: &str) -> IdwResult<(u8, u8, u8, u8)> {
    let hex = s.trim_start_matches('#');
    // byte-indexed slicing below; non-ASCII input must fail, not panic
    if !hex.is_ascii() {
        return Err(IdwError::MalformedGradient(format!(
            "invalid hex color: {}",
            s
        )));
    }
    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| IdwError::MalformedGradient(format!("invalid hex color: {}", s)))
    };

    match hex.len() {
        6 => Ok((component(0..2)?, component(2..4)?, component(4..6)?, 255)),
        8 => Ok((
            component(0..2)?,
            component(2..4)?,
            component(4..6)?,
            component(6..8)?,
        )),
        _ => Err(IdwError::MalformedGradient(format!(
            "invalid hex color: {}",
            s
        ))),
    }
}

fn named_color(name: &str) -> IdwResult<(u8, u8, u8, u8)> {
    let rgba = match name.to_lowercase().as_str() {
        "transparent" => (0, 0, 0, 0),
        "black" => (0, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "red" => (255, 0, 0, 255),
        "green" => (0, 128, 0, 255),
        "lime" => (0, 255, 0, 255),
        "blue" => (0, 0, 255, 255),
        "yellow" => (255, 255, 0, 255),
        "cyan" => (0, 255, 255, 255),
        "magenta" => (255, 0, 255, 255),
        "orange" => (255, 165, 0, 255),
        "purple" => (128, 0, 128, 255),
        "maroon" => (128, 0, 0, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        _ => {
            return Err(IdwError::MalformedGradient(format!(
                "unknown color name: {}",
                name
            )))
        }
    };
    Ok(rgba)
}

/// A color stop in a gradient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorStop {
    /// Stop position in [0, 1]
    pub position: f64,

    /// The color at this stop
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// An ordered gradient definition over `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Color stops in ascending position order
    pub stops: Vec<ColorStop>,
}

impl GradientSpec {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    /// Parse a gradient from a JSON string.
    pub fn from_json(json: &str) -> IdwResult<Self> {
        let spec: GradientSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load a gradient from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> IdwResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IdwError::MalformedGradient(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Validate stop count, positions, and colors.
    pub fn validate(&self) -> IdwResult<()> {
        if self.stops.len() < 2 {
            return Err(IdwError::MalformedGradient(
                "gradient must have at least 2 color stops".to_string(),
            ));
        }

        for stop in &self.stops {
            if !stop.position.is_finite() || stop.position < 0.0 || stop.position > 1.0 {
                return Err(IdwError::MalformedGradient(format!(
                    "stop position {} outside [0, 1]",
                    stop.position
                )));
            }
            stop.color.to_rgba()?;
        }

        for pair in self.stops.windows(2) {
            if pair[1].position <= pair[0].position {
                return Err(IdwError::MalformedGradient(
                    "stop positions must be strictly ascending".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Materialize the gradient into a 256-entry lookup table.
    ///
    /// Entry `i` is the gradient sampled at `i / 255`, with piecewise-linear
    /// interpolation between stops. Positions below the first stop take the
    /// first stop's color; above the last, the last stop's color.
    pub fn build_lut(&self) -> IdwResult<GradientLut> {
        self.validate()?;

        let rgba: Vec<(u8, u8, u8, u8)> = self
            .stops
            .iter()
            .map(|s| s.color.to_rgba())
            .collect::<IdwResult<_>>()?;

        let mut entries = [[0u8; 4]; LUT_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            let (r, g, b, a) = sample_stops(&self.stops, &rgba, t);
            *entry = [r, g, b, a];
        }

        Ok(GradientLut { entries })
    }
}

impl Default for GradientSpec {
    /// The standard 11-stop blue-to-magenta scale.
    fn default() -> Self {
        let hex = |p: f64, s: &str| ColorStop::new(p, Color::Hex(s.to_string()));
        let named = |p: f64, s: &str| ColorStop::new(p, Color::Named(s.to_string()));

        GradientSpec::new(vec![
            hex(0.0, "#000066"),
            named(0.1, "blue"),
            named(0.2, "cyan"),
            named(0.3, "lime"),
            named(0.4, "yellow"),
            named(0.5, "orange"),
            named(0.6, "red"),
            named(0.7, "maroon"),
            hex(0.8, "#660066"),
            hex(0.9, "#990099"),
            hex(1.0, "#ff66ff"),
        ])
    }
}

/// Sample the stop list at position `t` in [0, 1].
fn sample_stops(
    stops: &[ColorStop],
    rgba: &[(u8, u8, u8, u8)],
    t: f64,
) -> (u8, u8, u8, u8) {
    if t <= stops[0].position {
        return rgba[0];
    }
    if t >= stops[stops.len() - 1].position {
        return rgba[rgba.len() - 1];
    }

    for i in 1..stops.len() {
        if t <= stops[i].position {
            let span = stops[i].position - stops[i - 1].position;
            let f = (t - stops[i - 1].position) / span;
            return lerp_rgba(rgba[i - 1], rgba[i], f);
        }
    }

    rgba[rgba.len() - 1]
}

fn lerp_rgba(a: (u8, u8, u8, u8), b: (u8, u8, u8, u8), t: f64) -> (u8, u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let lerp_u8 =
        |x: u8, y: u8| -> u8 { ((x as f64) * (1.0 - t) + (y as f64) * t).round() as u8 };
    (
        lerp_u8(a.0, b.0),
        lerp_u8(a.1, b.1),
        lerp_u8(a.2, b.2),
        lerp_u8(a.3, b.3),
    )
}

/// A materialized 256-entry gradient lookup table.
#[derive(Debug, Clone)]
pub struct GradientLut {
    entries: [[u8; 4]; LUT_SIZE],
}

impl GradientLut {
    /// RGBA entry for a density byte.
    #[inline]
    pub fn get(&self, index: u8) -> [u8; 4] {
        self.entries[index as usize]
    }
}
