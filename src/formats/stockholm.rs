//! Stockholm alignment reader
//!
//! # Stockholm Format
//!
//! ```text
//! # STOCKHOLM 1.0
//! #=GS seq1 DE first sequence
//! seq1  ACGU.ACGU
//! seq2  ACGUUACGU
//! #=GC SS_cons <<<<.>>>>
//! //
//! ```
//!
//! - Markup lines start with `#`; only `#=GS <id> DE <text>` is used, as the
//!   record description
//! - `.` marks an insert-state gap and is read as `-`
//! - A sequence may be split over several blocks
//! - `//` ends the alignment

use crate::core::{AlignmentParseError, AlignmentParseErrorKind, EntropyResult};
use crate::core::io::LineIterator;
use crate::core::table::{AlignedSequence, GAP};
use crate::formats::{finish_records, next_line};
use std::collections::HashMap;
use std::io::BufRead;

const FORMAT: &str = "stockholm";

/// Insert-state gap symbol
const DOT_GAP: u8 = b'.';

fn residues_of(chunk: &str) -> impl Iterator<Item = u8> + '_ {
    chunk.bytes().map(|b| if b == DOT_GAP { GAP } else { b })
}

pub const HEADER: &str = "# STOCKHOLM 1.0";
pub const TERMINATOR: &str = "//";

/// Parse a Stockholm stream
pub fn parse_stockholm_reader<R: BufRead>(reader: R) -> EntropyResult<Vec<AlignedSequence>> {
    let mut lines = LineIterator::new(reader);
    let mut seen_header = false;
    let mut terminated = false;
    // Residues keyed by sequence name, in order of first appearance
    let mut names: Vec<String> = Vec::new();
    let mut residues: HashMap<String, Vec<u8>> = HashMap::new();
    let mut descriptions: HashMap<String, Vec<String>> = HashMap::new();

    while let Some((line_number, line)) = next_line(&mut lines, FORMAT)? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if terminated {
            let kind = if trimmed == HEADER {
                AlignmentParseErrorKind::MultipleAlignments
            } else {
                AlignmentParseErrorKind::InvalidLine
            };
            return Err(AlignmentParseError::at_line(FORMAT, kind, "data after '//'", line_number).into());
        }

        if !seen_header {
            if trimmed != HEADER {
                return Err(AlignmentParseError::at_line(
                    FORMAT,
                    AlignmentParseErrorKind::InvalidHeader,
                    "expected '# STOCKHOLM 1.0'",
                    line_number,
                )
                .into());
            }
            seen_header = true;
            continue;
        }

        if trimmed == TERMINATOR {
            terminated = true;
            continue;
        }

        if let Some(markup) = trimmed.strip_prefix("#=GS") {
            let mut fields = markup.split_whitespace();
            if let (Some(name), Some("DE")) = (fields.next(), fields.next()) {
                let text = fields.collect::<Vec<_>>().join(" ");
                descriptions.entry(name.to_string()).or_default().push(text);
            }
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let (name, chunk) = match (parts.next(), parts.next()) {
            (Some(name), Some(chunk)) if !chunk.trim().is_empty() => (name, chunk.trim()),
            _ => {
                return Err(AlignmentParseError::at_line(
                    FORMAT,
                    AlignmentParseErrorKind::InvalidLine,
                    "could not split line into identifier and sequence",
                    line_number,
                )
                .into());
            }
        };

        match residues.get_mut(name) {
            Some(seq) => seq.extend(residues_of(chunk)),
            None => {
                names.push(name.to_string());
                residues.insert(name.to_string(), residues_of(chunk).collect());
            }
        }
    }

    if !seen_header {
        return Err(AlignmentParseError::new(FORMAT, AlignmentParseErrorKind::Empty, "no records found").into());
    }
    if !terminated {
        return Err(AlignmentParseError::new(
            FORMAT,
            AlignmentParseErrorKind::InvalidLine,
            "missing '//' terminator",
        )
        .into());
    }

    let records = names
        .into_iter()
        .map(|name| {
            let seq = residues.remove(&name).unwrap_or_default();
            let id = match descriptions.remove(&name) {
                Some(lines) => lines.join("\n"),
                None => name,
            };
            AlignedSequence::new(id, seq)
        })
        .collect();

    finish_records(records, FORMAT)
}
