//! Trace document contents and JSON persistence
//!
//! The on-disk format is JSON. Two revisions exist: the current one
//! stores streams and events as arrays of records; the earlier one
//! compresses streams into a symbol-keyed map and events into a
//! type-keyed index map. Both revisions are read; only the current one
//! is written.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::electrode::Electrode;
use crate::stream::Stream;

/// Errors that can occur when reading or writing a trace document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The payload matched neither document revision
    #[error("Unrecognised document format: {0}")]
    UnrecognisedFormat(serde_json::Error),

    /// Streams disagree on sample count
    #[error("Streams disagree on sample count: expected {expected}, found {found}")]
    MismatchedLengths { expected: usize, found: usize },

    /// Failed to serialize the document
    #[error("Failed to encode document: {0}")]
    Encode(serde_json::Error),
}

/// Result type for document persistence
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A labelled marker anchored at one sample of the recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "sampleIndex")]
    pub sample_index: usize,
    /// Event type label; many events may share one label
    #[serde(rename = "type")]
    pub kind: String,
}

impl Event {
    pub fn new(sample_index: usize, kind: impl Into<String>) -> Self {
        Self {
            sample_index,
            kind: kind.into(),
        }
    }
}

/// The contents of a trace document: streams, events and recording
/// metadata
///
/// Collections are replaced wholesale on import and deletion rather
/// than mutated in place; derived quantities (sample count, duration,
/// potential range) are always computed from the current stream set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContents {
    /// The name of the subject the recording was sourced from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Free-form information relating to the subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Sample rate of the recording, in Hz
    pub sample_rate: f64,
    /// Length of the epoch window anchored at each event, in samples
    #[serde(default = "default_epoch_length")]
    pub epoch_length: usize,
    #[serde(default)]
    pub events: Vec<Event>,
    /// Known event type labels, including ones with no events yet
    #[serde(default)]
    pub event_types: Vec<String>,
    pub streams: Vec<Stream>,
}

fn default_epoch_length() -> usize {
    DocumentContents::DEFAULT_EPOCH_LENGTH
}

impl DocumentContents {
    pub const DEFAULT_SAMPLE_RATE: f64 = 200.0;
    pub const DEFAULT_EPOCH_LENGTH: usize = 100;

    pub fn new(streams: Vec<Stream>, sample_rate: f64) -> Self {
        Self {
            subject: None,
            info: None,
            sample_rate,
            epoch_length: Self::DEFAULT_EPOCH_LENGTH,
            events: Vec::new(),
            event_types: Vec::new(),
            streams,
        }
    }

    /// Decodes a document from JSON, trying the current revision first
    /// and falling back to the legacy compressed revision
    pub fn from_json(data: &[u8]) -> DocumentResult<Self> {
        let contents = match serde_json::from_slice::<DocumentContents>(data) {
            Ok(contents) => contents,
            Err(err) => match serde_json::from_slice::<CompressedContents>(data) {
                Ok(compressed) => {
                    log::debug!("reading legacy document revision ({err})");
                    compressed.uncompressed()
                }
                Err(_) => return Err(DocumentError::UnrecognisedFormat(err)),
            },
        };

        contents.validate_lengths()?;

        Ok(contents)
    }

    /// Encodes the document as the current JSON revision
    pub fn to_json(&self) -> DocumentResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(DocumentError::Encode)
    }

    fn validate_lengths(&self) -> DocumentResult<()> {
        if let Some((first, rest)) = self.streams.split_first() {
            let expected = first.samples.len();

            for stream in rest {
                if stream.samples.len() != expected {
                    return Err(DocumentError::MismatchedLengths {
                        expected,
                        found: stream.samples.len(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The number of samples per stream, `None` when there are no
    /// streams
    pub fn sample_count(&self) -> Option<usize> {
        self.streams.first().map(|stream| stream.samples.len())
    }

    /// The number of samples as text, with plural handling
    pub fn formatted_sample_count(&self) -> Option<String> {
        self.sample_count()
            .map(|count| format!("{count} sample{}", if count == 1 { "" } else { "s" }))
    }

    /// Duration of the recording in seconds
    pub fn duration(&self) -> Option<f64> {
        self.sample_count()
            .map(|count| count as f64 / self.sample_rate)
    }

    /// Converts a sample index to a time value in seconds
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate
    }

    /// The (min, max) potential over every sample of every stream
    pub fn potential_range(&self) -> Option<(f64, f64)> {
        self.streams
            .iter()
            .flat_map(|stream| stream.samples.iter().copied())
            .fold(None, |range, sample| {
                let (min, max) = range.unwrap_or((sample, sample));
                Some((min.min(sample), max.max(sample)))
            })
    }

    /// The half-open sample window highlighted for an event
    pub fn epoch(&self, event: &Event) -> Range<usize> {
        event.sample_index..event.sample_index + self.epoch_length
    }
}

impl Default for DocumentContents {
    fn default() -> Self {
        Self::new(Vec::new(), Self::DEFAULT_SAMPLE_RATE)
    }
}

/// The earlier on-disk revision
///
/// Streams are compressed to a map keyed by electrode symbol, events to
/// a map keyed by event type. Read-only: documents are always written
/// back in the current revision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompressedContents {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    info: Option<String>,
    sample_rate: f64,
    #[serde(default)]
    events: Option<BTreeMap<String, Vec<usize>>>,
    streams: BTreeMap<String, Vec<f64>>,
}

impl CompressedContents {
    fn uncompressed(self) -> DocumentContents {
        let mut streams = Vec::with_capacity(self.streams.len());

        for (symbol, samples) in self.streams {
            match Electrode::parse(&symbol) {
                Some(electrode) => streams.push(Stream::new(electrode, samples)),
                None => {
                    log::warn!("skipping stream with unrecognised electrode symbol {symbol:?}")
                }
            }
        }

        let mut events = Vec::new();
        let mut event_types = Vec::new();

        // BTreeMap iteration keeps event types sorted by name
        for (kind, sample_indices) in self.events.unwrap_or_default() {
            for sample_index in sample_indices {
                events.push(Event::new(sample_index, kind.clone()));
            }

            event_types.push(kind);
        }

        DocumentContents {
            subject: self.subject,
            info: self.info,
            sample_rate: self.sample_rate,
            epoch_length: DocumentContents::DEFAULT_EPOCH_LENGTH,
            events,
            event_types,
            streams,
        }
    }
}
