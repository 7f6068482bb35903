//! Strict PHYLIP alignment reader
//!
//! The first line holds the number of taxa and the alignment length. The
//! first block gives each taxon's name in a fixed 10-character field
//! followed by its first residues; later blocks (interleaved layout)
//! continue the sequences in the same order without names.

use crate::core::{AlignmentParseError, AlignmentParseErrorKind, EntropyResult};
use crate::core::io::LineIterator;
use crate::core::table::AlignedSequence;
use crate::formats::{finish_records, next_line, squeeze};
use memchr::memchr;
use std::io::BufRead;

const FORMAT: &str = "phylip";

/// Width of the name field in strict PHYLIP
pub const NAME_WIDTH: usize = 10;

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let taxa = parts.next()?.parse().ok()?;
    let length = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((taxa, length))
}

/// Split a first-block line into the name field and the residue chunk
fn split_name(line: &str) -> (&str, &str) {
    match line.char_indices().nth(NAME_WIDTH) {
        Some((idx, _)) => (line[..idx].trim(), &line[idx..]),
        None => (line.trim(), ""),
    }
}

fn append_chunk(record: &mut AlignedSequence, chunk: &str, line_number: usize) -> EntropyResult<()> {
    if memchr(b'.', chunk.as_bytes()).is_some() {
        return Err(AlignmentParseError::at_line(
            FORMAT,
            AlignmentParseErrorKind::InvalidLine,
            "dots are not allowed in PHYLIP sequences",
            line_number,
        )
        .into());
    }
    record.residues.extend(squeeze(chunk));
    Ok(())
}

/// Parse a strict PHYLIP stream
pub fn parse_phylip_reader<R: BufRead>(reader: R) -> EntropyResult<Vec<AlignedSequence>> {
    let mut lines = LineIterator::new(reader);
    let mut header: Option<(usize, usize)> = None;
    let mut records: Vec<AlignedSequence> = Vec::new();
    // Number of sequence lines read so far
    let mut seq_lines = 0usize;

    while let Some((line_number, line)) = next_line(&mut lines, FORMAT)? {
        if line.trim().is_empty() {
            continue;
        }

        let (taxa, length) = match header {
            Some(h) => h,
            None => {
                let h = parse_header(line).ok_or_else(|| {
                    AlignmentParseError::at_line(
                        FORMAT,
                        AlignmentParseErrorKind::InvalidHeader,
                        "first line should hold two integers: taxa and length",
                        line_number,
                    )
                })?;
                if h.0 == 0 {
                    return Err(AlignmentParseError::at_line(
                        FORMAT,
                        AlignmentParseErrorKind::Empty,
                        "header declares no taxa",
                        line_number,
                    )
                    .into());
                }
                header = Some(h);
                continue;
            }
        };

        let complete = seq_lines % taxa == 0
            && !records.is_empty()
            && records.iter().all(|r| r.residues.len() >= length);
        if complete {
            let kind = if parse_header(line).is_some() {
                AlignmentParseErrorKind::MultipleAlignments
            } else {
                AlignmentParseErrorKind::InvalidLine
            };
            return Err(AlignmentParseError::at_line(
                FORMAT,
                kind,
                "data after the end of the alignment",
                line_number,
            )
            .into());
        }

        if seq_lines < taxa {
            let (name, chunk) = split_name(line);
            let mut record = AlignedSequence::new(name, Vec::new());
            append_chunk(&mut record, chunk, line_number)?;
            records.push(record);
        } else {
            append_chunk(&mut records[seq_lines % taxa], line, line_number)?;
        }
        seq_lines += 1;
    }

    let (taxa, length) = header
        .ok_or_else(|| AlignmentParseError::new(FORMAT, AlignmentParseErrorKind::Empty, "no records found"))?;

    if records.len() != taxa || seq_lines % taxa != 0 {
        return Err(AlignmentParseError::new(
            FORMAT,
            AlignmentParseErrorKind::RecordMismatch,
            format!("expected {} taxa in every block, found {} sequence lines", taxa, seq_lines),
        )
        .into());
    }
    if let Some(bad) = records.iter().find(|r| r.residues.len() != length) {
        return Err(AlignmentParseError::new(
            FORMAT,
            AlignmentParseErrorKind::UnequalLength,
            format!(
                "sequence '{}' has length {}, header declares {}",
                bad.id,
                bad.residues.len(),
                length
            ),
        )
        .into());
    }

    finish_records(records, FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntropyError;

    fn parse_kind(data: &str) -> AlignmentParseErrorKind {
        match parse_phylip_reader(data.as_bytes()).unwrap_err() {
            EntropyError::Format(e) => e.kind,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_block() {
        let data = " 3 6\nAlpha     AC-GTA\nBeta      ACCGTA\nGamma     AC GTTA\n";
        let records = parse_phylip_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "Alpha");
        assert_eq!(records[0].residues, b"AC-GTA");
        assert_eq!(records[2].residues, b"ACGTTA");
    }

    #[test]
    fn test_interleaved_blocks() {
        let data = "2 8\nseqA      ACGT\nseqB      AC-T\n\nGGCC\nGG-C\n";
        let records = parse_phylip_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].residues, b"ACGTGGCC");
        assert_eq!(records[1].residues, b"AC-TGG-C");
    }

    #[test]
    fn test_name_uses_full_width() {
        let data = "1 4\nVeryLongNaACGT\n";
        let records = parse_phylip_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].id, "VeryLongNa");
        assert_eq!(records[0].residues, b"ACGT");
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(parse_kind("2 5\na         ACGT\nb         ACGT\n"), AlignmentParseErrorKind::UnequalLength);
    }

    #[test]
    fn test_dots_rejected() {
        assert_eq!(parse_kind("1 4\na         AC.T\n"), AlignmentParseErrorKind::InvalidLine);
    }

    #[test]
    fn test_bad_header() {
        assert_eq!(parse_kind("two 4\n"), AlignmentParseErrorKind::InvalidHeader);
    }

    #[test]
    fn test_missing_taxon() {
        assert_eq!(parse_kind("3 2\na         AC\nb         AC\n"), AlignmentParseErrorKind::RecordMismatch);
    }

    #[test]
    fn test_second_dataset_rejected() {
        let data = "1 2\na         AC\n1 2\nb         AC\n";
        assert_eq!(parse_kind(data), AlignmentParseErrorKind::MultipleAlignments);
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_kind(""), AlignmentParseErrorKind::Empty);
        assert_eq!(parse_kind("0 0\n"), AlignmentParseErrorKind::Empty);
    }
}
