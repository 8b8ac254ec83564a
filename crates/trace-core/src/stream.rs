//! Per-electrode sample streams

use serde::{Deserialize, Serialize};

use crate::electrode::Electrode;

/// One electrode's full time series of potential samples
///
/// The electrode is the stream's business key: two streams describe the
/// same channel iff their electrode identities are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub electrode: Electrode,
    /// Potential at each time step, in millivolts
    pub samples: Vec<f64>,
}

impl Stream {
    pub fn new(electrode: Electrode, samples: Vec<f64>) -> Self {
        Self { electrode, samples }
    }

    /// The (min, max) potential over this stream, `None` when empty
    pub fn potential_range(&self) -> Option<(f64, f64)> {
        self.samples.iter().fold(None, |range, &sample| {
            let (min, max) = range.unwrap_or((sample, sample));
            Some((min.min(sample), max.max(sample)))
        })
    }

    /// Parses pasted text into a sample array
    ///
    /// Tokens are separated by any whitespace or newlines; every token
    /// must be a valid float. Returns `None` if any token fails or the
    /// input holds no samples at all.
    pub fn samples_from_text(text: &str) -> Option<Vec<f64>> {
        let mut samples = Vec::new();

        for token in text.split_whitespace() {
            samples.push(token.parse::<f64>().ok()?);
        }

        if samples.is_empty() {
            return None;
        }

        Some(samples)
    }
}

/// One sample of one stream resolved onto the time axis
///
/// Ephemeral: produced on demand for a given window, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub electrode: Electrode,
    /// Seconds from the start of the recording
    pub timestamp: f64,
    pub potential: f64,
}
