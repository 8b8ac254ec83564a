//! Trace Core - Document model for multi-channel EEG recordings
//!
//! Electrode identity and label grammar, per-electrode sample streams,
//! labelled events, aggregate queries over a document's stream set, and
//! JSON persistence of the whole document. Everything in this crate is
//! plain data and pure functions; rendering and interaction live in
//! `trace-plot` and in the host application.

pub mod collection;
pub mod document;
pub mod electrode;
pub mod stream;

pub use document::{DocumentContents, DocumentError, DocumentResult, Event};
pub use electrode::{Electrode, GeneralArea, Prefix};
pub use stream::{SamplePoint, Stream};
