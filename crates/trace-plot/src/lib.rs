//! Trace Plot - Rendering primitives for Trace EEG documents
//!
//! Framework-independent computation behind the two visualisations:
//! the animated scalp map (electrode geometry and potential-to-color
//! mapping) and the stacked multi-trace plot (signal windowing, row
//! layout, decimated polylines). Plain data in, plain data out: the
//! host GUI owns all state, timers and drawing.

pub mod color;
pub mod scalp;
pub mod window;

pub use color::{color_for, Rgba};
pub use scalp::{Point, Polar, SectorBounds, SectorShape, Size};
pub use window::{AmplitudeRange, PlotLayout, SampleWindow};
