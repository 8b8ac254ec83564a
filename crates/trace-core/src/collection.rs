//! Aggregate queries over a document's stream set
//!
//! Display ordering, prefix grouping, and the all-or-nothing CSV import
//! that turns a header of electrode symbols plus rows of samples into
//! one stream per column.

use crate::electrode::{Electrode, Prefix};
use crate::stream::Stream;

/// Streams in display order: by prefix name alphabetically, then by
/// suffix ascending
///
/// Alphabetical-by-name keeps the ordering independent of the enum
/// declaration order: central, frontal, mastoid, occipital, parietal,
/// prefrontal, temporal.
pub fn sorted_for_display(streams: &[Stream]) -> Vec<Stream> {
    let mut sorted = streams.to_vec();
    sorted.sort_by(|a, b| {
        (a.electrode.prefix.name(), a.electrode.suffix)
            .cmp(&(b.electrode.prefix.name(), b.electrode.suffix))
    });
    sorted
}

/// Streams grouped by prefix, groups and members in display order
pub fn grouped_by_prefix(streams: &[Stream]) -> Vec<(Prefix, Vec<Stream>)> {
    let mut groups: Vec<(Prefix, Vec<Stream>)> = Vec::new();

    for stream in sorted_for_display(streams) {
        match groups.last_mut() {
            Some((prefix, members)) if *prefix == stream.electrode.prefix => {
                members.push(stream)
            }
            _ => groups.push((stream.electrode.prefix, vec![stream])),
        }
    }

    groups
}

/// Imports streams from CSV text, one stream per column
///
/// The first non-blank line is the header; each cell, trimmed, must
/// parse as an electrode symbol. Every following line contributes one
/// sample per column. Sample cells are stripped of every character that
/// is not an ASCII digit, `.` or `-` before float parsing, so units and
/// other stray annotations survive. Any unparseable header or cell
/// aborts the whole import.
pub fn streams_from_csv(csv: &str) -> Option<Vec<Stream>> {
    let mut lines = csv.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next()?;

    let mut streams = header
        .split(',')
        .map(|cell| Electrode::parse(cell.trim()).map(|electrode| Stream::new(electrode, Vec::new())))
        .collect::<Option<Vec<Stream>>>()?;

    for line in lines {
        let cells: Vec<&str> = line.split(',').collect();

        if cells.len() < streams.len() {
            log::warn!(
                "CSV row has {} cells, expected {}; aborting import",
                cells.len(),
                streams.len()
            );
            return None;
        }

        for (stream, cell) in streams.iter_mut().zip(cells) {
            let cleaned: String = cell
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();

            stream.samples.push(cleaned.parse::<f64>().ok()?);
        }
    }

    Some(streams)
}
