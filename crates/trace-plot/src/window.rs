//! Signal windowing for the stacked plot
//!
//! Pure functions deriving renderable point sequences and axis extents
//! from a sliding sample window over one or more streams. Nothing here
//! retains state between calls; the caller decides when to recompute
//! and passes the window and layout records in explicitly.

use trace_core::{SamplePoint, Stream};

use crate::scalp::{Point, Size};

/// A sliding view into the sample axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    /// First sample index inside the window
    pub start: usize,
    /// Number of samples the window covers
    pub size: usize,
    /// Index decimation: keep every `stride`-th sample by position,
    /// not by time delta
    pub stride: usize,
}

impl SampleWindow {
    pub fn new(start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            stride: 1,
        }
    }

    pub fn with_stride(start: usize, size: usize, stride: usize) -> Self {
        Self {
            start,
            size,
            stride,
        }
    }

    /// One past the last sample index the window covers
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    fn clamped_end(&self, sample_count: usize) -> usize {
        self.end().min(sample_count)
    }

    fn step(&self) -> usize {
        self.stride.max(1)
    }
}

/// Stacked-plot canvas layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub size: Size,
    /// Fraction of the height kept clear, split evenly above and below
    pub vertical_padding: f64,
    /// Number of equal rows the drawable height divides into
    pub row_count: usize,
}

/// Inclusive amplitude extent of a sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeRange {
    pub min: f64,
    pub max: f64,
}

impl AmplitudeRange {
    /// The larger magnitude of the two bounds; the vertical scale of a
    /// plot row
    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}

fn reduce(samples: impl Iterator<Item = f64>) -> Option<AmplitudeRange> {
    samples.fold(None, |range: Option<AmplitudeRange>, sample| {
        let range = range.unwrap_or(AmplitudeRange {
            min: sample,
            max: sample,
        });

        Some(AmplitudeRange {
            min: range.min.min(sample),
            max: range.max.max(sample),
        })
    })
}

/// The amplitude extent over every sample of every stream
pub fn global_amplitude_range(streams: &[Stream]) -> Option<AmplitudeRange> {
    reduce(
        streams
            .iter()
            .flat_map(|stream| stream.samples.iter().copied()),
    )
}

/// The amplitude extent over the decimated samples inside the window
///
/// Distinct from [`global_amplitude_range`]: callers pick per-window
/// auto-scaling or fixed global scaling by choosing which range they
/// feed into [`trace_path`] and the color mapping.
pub fn windowed_amplitude_range(
    streams: &[Stream],
    window: SampleWindow,
) -> Option<AmplitudeRange> {
    reduce(streams.iter().flat_map(|stream| {
        let end = window.clamped_end(stream.samples.len());

        (window.start..end)
            .step_by(window.step())
            .map(|index| stream.samples[index])
    }))
}

/// The window's time extent in seconds, for axis labelling
pub fn time_range(window: SampleWindow, sample_rate: f64) -> (f64, f64) {
    (
        window.start as f64 / sample_rate,
        window.end() as f64 / sample_rate,
    )
}

/// The decimated, time-resolved points of each stream inside the window
///
/// Per stream, indices run from the window start to its end clamped to
/// the stream length, stepping by the stride. Timestamps ascend within
/// each stream and streams keep their caller-supplied order.
pub fn sample_points(
    streams: &[Stream],
    sample_rate: f64,
    window: SampleWindow,
) -> Vec<SamplePoint> {
    let mut points = Vec::new();

    for stream in streams {
        let end = window.clamped_end(stream.samples.len());

        for index in (window.start..end).step_by(window.step()) {
            points.push(SamplePoint {
                electrode: stream.electrode,
                timestamp: index as f64 / sample_rate,
                potential: stream.samples[index],
            });
        }
    }

    points
}

/// Lays one stream out as a polyline in its stacked-plot row
///
/// The stream occupies row `row_index` of `layout.row_count` equal
/// rows; zero potential sits on the row's vertical midpoint and the
/// potential scales against the range's largest magnitude, inverted
/// because screen y grows downward. x advances linearly with sample
/// position across the window. Degenerate vertical scales fall back to
/// the row midpoint instead of emitting non-finite coordinates.
pub fn trace_path(
    stream: &Stream,
    layout: PlotLayout,
    row_index: usize,
    amplitude: AmplitudeRange,
    window: SampleWindow,
) -> Vec<Point> {
    if layout.row_count == 0 {
        return Vec::new();
    }

    let drawable_height = layout.size.height * (1.0 - layout.vertical_padding);
    let top = (layout.size.height - drawable_height) / 2.0;
    let row_height = drawable_height / layout.row_count as f64;
    let row_midpoint = top + row_height * (row_index as f64 + 0.5);
    let max_abs = amplitude.max_abs();

    let end = window.clamped_end(stream.samples.len());
    let x_denominator = window.size.saturating_sub(1).max(1) as f64;

    let mut path = Vec::new();

    for index in (window.start..end).step_by(window.step()) {
        let local_index = (index - window.start) as f64;
        let x = layout.size.width * (local_index / x_denominator);

        let offset = stream.samples[index] / max_abs * (row_height / 2.0);
        let y = if offset.is_finite() {
            row_midpoint - offset
        } else {
            row_midpoint
        };

        path.push(Point { x, y });
    }

    path
}

/// The x position of an event marker inside the plotting window
pub fn event_marker_x(sample_index: usize, window: SampleWindow, plot_width: f64) -> f64 {
    if window.size == 0 {
        return 0.0;
    }

    plot_width * ((sample_index as f64 - window.start as f64 + 1.0) / window.size as f64)
}

/// The x extent of the epoch highlight anchored at an event
///
/// Overlapping epochs from different events are drawn independently;
/// no merging happens here or anywhere else.
pub fn epoch_span_x(
    sample_index: usize,
    epoch_length: usize,
    window: SampleWindow,
    plot_width: f64,
) -> (f64, f64) {
    (
        event_marker_x(sample_index, window, plot_width),
        event_marker_x(sample_index + epoch_length, window, plot_width),
    )
}

/// Whether an event's epoch overlaps the plotting window at all
pub fn epoch_visible(sample_index: usize, epoch_length: usize, window: SampleWindow) -> bool {
    if window.size == 0 || epoch_length == 0 {
        return false;
    }

    let epoch_last = sample_index + epoch_length - 1;
    let window_last = window.start + window.size - 1;

    sample_index <= window_last && epoch_last >= window.start
}
