//! Potential-to-color mapping for the scalp map
//!
//! Signed potentials map onto two 3-stop piecewise-linear gradients
//! sharing green at zero: positive values run green, yellow, red and
//! negative values run green, cyan, blue, so the mapping is continuous
//! across the zero crossing.

use crate::window::AmplitudeRange;

/// An RGBA color, channels in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Fully transparent black
    pub const CLEAR: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

pub const GREEN: Rgba = Rgba::from_rgb(0.0, 1.0, 0.0);
pub const YELLOW: Rgba = Rgba::from_rgb(1.0, 1.0, 0.0);
pub const RED: Rgba = Rgba::from_rgb(1.0, 0.0, 0.0);
pub const CYAN: Rgba = Rgba::from_rgb(0.0, 1.0, 1.0);
pub const BLUE: Rgba = Rgba::from_rgb(0.0, 0.0, 1.0);

/// Gradient stops for potentials at or above zero
pub const POSITIVE_STOPS: [Rgba; 3] = [GREEN, YELLOW, RED];
/// Gradient stops for potentials below zero
pub const NEGATIVE_STOPS: [Rgba; 3] = [GREEN, CYAN, BLUE];

/// Samples a piecewise-linear gradient at a stop percentage
///
/// `percentage` is clamped to 0..=100; the result blends the two
/// bracketing stops channel-wise.
pub fn intermediate(stops: &[Rgba], percentage: f64) -> Rgba {
    let fraction = percentage.clamp(0.0, 100.0) / 100.0;

    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::CLEAR;
    };

    if fraction <= 0.0 {
        return *first;
    }
    if fraction >= 1.0 {
        return *last;
    }

    let approx_index = fraction * (stops.len() - 1) as f64;
    let lower = stops[approx_index.floor() as usize];
    let upper = stops[approx_index.ceil() as usize];
    let blend = approx_index - approx_index.floor();

    Rgba {
        r: lower.r + (upper.r - lower.r) * blend,
        g: lower.g + (upper.g - lower.g) * blend,
        b: lower.b + (upper.b - lower.b) * blend,
        a: lower.a + (upper.a - lower.a) * blend,
    }
}

/// Maps a signed potential onto the diverging gradient for a reference
/// range
///
/// Values at or above zero sample the positive branch scaled by the
/// range maximum; negative values sample the negative branch scaled by
/// the range minimum. A zero-width branch yields the shared zero stop
/// instead of dividing by zero.
pub fn color_for(value: f64, range: AmplitudeRange) -> Rgba {
    if value >= 0.0 {
        if range.max == 0.0 {
            return GREEN;
        }

        intermediate(&POSITIVE_STOPS, (value / range.max) * 100.0)
    } else {
        if range.min == 0.0 {
            return GREEN;
        }

        intermediate(&NEGATIVE_STOPS, (value / range.min) * 100.0)
    }
}
