//! Aligned FASTA reader
//!
//! Each record is a `>` header followed by sequence lines. The record
//! identifier is the whole header text, i.e. the description.

use crate::core::{AlignmentParseError, AlignmentParseErrorKind, EntropyResult};
use crate::core::io::LineIterator;
use crate::core::table::AlignedSequence;
use crate::formats::{finish_records, next_line, squeeze};
use std::io::BufRead;

const FORMAT: &str = "fasta";

/// Parse an aligned FASTA stream
pub fn parse_fasta_reader<R: BufRead>(reader: R) -> EntropyResult<Vec<AlignedSequence>> {
    let mut lines = LineIterator::new(reader);
    let mut records: Vec<AlignedSequence> = Vec::new();

    while let Some((line_number, line)) = next_line(&mut lines, FORMAT)? {
        if let Some(header) = line.strip_prefix('>') {
            records.push(AlignedSequence::new(header.trim_end(), Vec::new()));
            continue;
        }

        match records.last_mut() {
            Some(record) => record.residues.extend(squeeze(line)),
            None if line.trim().is_empty() => {}
            None => {
                return Err(AlignmentParseError::at_line(
                    FORMAT,
                    AlignmentParseErrorKind::InvalidLine,
                    "sequence data before the first '>' header",
                    line_number,
                )
                .into());
            }
        }
    }

    finish_records(records, FORMAT)
}
