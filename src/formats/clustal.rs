//! Clustal alignment reader
//!
//! # Clustal Format
//!
//! ```text
//! CLUSTAL W (1.83) multiple sequence alignment
//!
//! seq1      ACGT-ACGT 8
//! seq2      ACGTTACGT 9
//!           **** ****
//!
//! seq1      AC
//! seq2      AC
//! ```
//!
//! - Header line names the producing program
//! - Blocks of `identifier chunk [count]` lines separated by blank lines
//! - Lines starting with whitespace are conservation lines and are skipped

use crate::core::{AlignmentParseError, AlignmentParseErrorKind, EntropyResult};
use crate::core::io::LineIterator;
use crate::core::table::AlignedSequence;
use crate::formats::{finish_records, next_line};
use memchr::memchr2;
use std::io::BufRead;

const FORMAT: &str = "clustal";

/// Programs whose output uses the Clustal layout
pub const KNOWN_HEADERS: &[&str] = &["CLUSTAL", "MUSCLE", "PROBCONS", "MSAPROBS", "Kalign", "Biopython"];

fn is_header(line: &str) -> bool {
    KNOWN_HEADERS.iter().any(|h| line.starts_with(h))
}

/// Split `identifier chunk [count]` into identifier and chunk
fn split_data_line(line: &str, line_number: usize) -> EntropyResult<(&str, &str)> {
    let invalid = |message: &str| {
        AlignmentParseError::at_line(FORMAT, AlignmentParseErrorKind::InvalidLine, message, line_number)
    };

    let id_end = memchr2(b' ', b'\t', line.as_bytes()).ok_or_else(|| invalid("expected identifier and sequence"))?;
    let id = &line[..id_end];
    let mut rest = line[id_end..].split_whitespace();
    let chunk = rest.next().ok_or_else(|| invalid("expected identifier and sequence"))?;

    if let Some(count) = rest.next() {
        if count.parse::<u64>().is_err() {
            return Err(invalid("trailing field is not a residue count").into());
        }
    }
    if rest.next().is_some() {
        return Err(invalid("too many fields").into());
    }
    Ok((id, chunk))
}

/// Parse a Clustal stream
pub fn parse_clustal_reader<R: BufRead>(reader: R) -> EntropyResult<Vec<AlignedSequence>> {
    let mut lines = LineIterator::new(reader);
    let mut records: Vec<AlignedSequence> = Vec::new();
    let mut seen_header = false;
    // Index of the next expected row within the current block
    let mut row = 0usize;
    let mut first_block_done = false;

    while let Some((line_number, line)) = next_line(&mut lines, FORMAT)? {
        if !seen_header {
            if line.trim().is_empty() {
                continue;
            }
            if !is_header(line) {
                return Err(AlignmentParseError::at_line(
                    FORMAT,
                    AlignmentParseErrorKind::InvalidHeader,
                    "expected a CLUSTAL header line",
                    line_number,
                )
                .into());
            }
            seen_header = true;
            continue;
        }

        if line.trim().is_empty() {
            if row > 0 {
                close_block(&records, row, first_block_done, line_number)?;
                first_block_done = true;
                row = 0;
            }
            continue;
        }

        if is_header(line) {
            return Err(AlignmentParseError::at_line(
                FORMAT,
                AlignmentParseErrorKind::MultipleAlignments,
                "found a second alignment; expected exactly one",
                line_number,
            )
            .into());
        }

        if line.starts_with(char::is_whitespace) {
            continue;
        }

        let (id, chunk) = split_data_line(line, line_number)?;
        if !first_block_done {
            records.push(AlignedSequence::new(id, chunk.as_bytes()));
        } else {
            let record = records.get_mut(row).filter(|r| r.id == id).ok_or_else(|| {
                AlignmentParseError::at_line(
                    FORMAT,
                    AlignmentParseErrorKind::RecordMismatch,
                    format!("identifier '{}' out of order or not in the first block", id),
                    line_number,
                )
            })?;
            record.residues.extend_from_slice(chunk.as_bytes());
        }
        row += 1;
    }

    if !seen_header {
        return Err(AlignmentParseError::new(FORMAT, AlignmentParseErrorKind::Empty, "no records found").into());
    }
    if row > 0 {
        close_block(&records, row, first_block_done, lines.line_number())?;
    }

    finish_records(records, FORMAT)
}

/// Every block after the first must list all identifiers
fn close_block(
    records: &[AlignedSequence],
    rows_in_block: usize,
    first_block_done: bool,
    line_number: usize,
) -> EntropyResult<()> {
    if first_block_done && rows_in_block != records.len() {
        return Err(AlignmentParseError::at_line(
            FORMAT,
            AlignmentParseErrorKind::RecordMismatch,
            format!("block has {} sequences, expected {}", rows_in_block, records.len()),
            line_number,
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntropyError;

    const TWO_BLOCKS: &str = "\
CLUSTAL W (1.83) multiple sequence alignment


seq1      ACGT-ACGT 8
seq2      ACGTTACGT 9
          **** ****

seq1      AC 10
seq2      A- 10
          *
";

    fn parse_kind(data: &str) -> AlignmentParseErrorKind {
        match parse_clustal_reader(data.as_bytes()).unwrap_err() {
            EntropyError::Format(e) => e.kind,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_two_blocks() {
        let records = parse_clustal_reader(TWO_BLOCKS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].residues, b"ACGT-ACGTAC");
        assert_eq!(records[1].residues, b"ACGTTACGTA-");
    }

    #[test]
    fn test_muscle_header_without_counts() {
        let data = "MUSCLE (3.8) multiple sequence alignment\n\na  AC\nb  GT\n";
        let records = parse_clustal_reader(data.as_bytes()).unwrap();
        assert_eq!(records[1].id, "b");
        assert_eq!(records[1].residues, b"GT");
    }

    #[test]
    fn test_biopython_header() {
        let data = "Biopython multiple sequence alignment\n\nref      AC-T\nalt      ACGT\n";
        let records = parse_clustal_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].residues, b"AC-T");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(parse_kind("seq1 ACGT\n"), AlignmentParseErrorKind::InvalidHeader);
    }

    #[test]
    fn test_out_of_order_block() {
        let data = "CLUSTAL\n\na  AC\nb  GT\n\nb  AC\na  GT\n";
        assert_eq!(parse_kind(data), AlignmentParseErrorKind::RecordMismatch);
    }

    #[test]
    fn test_short_block() {
        let data = "CLUSTAL\n\na  AC\nb  GT\n\na  AC\n";
        assert_eq!(parse_kind(data), AlignmentParseErrorKind::RecordMismatch);
    }

    #[test]
    fn test_second_alignment_rejected() {
        let data = "CLUSTAL\n\na  AC\nb  GT\n\nCLUSTAL\n\na  AC\n";
        assert_eq!(parse_kind(data), AlignmentParseErrorKind::MultipleAlignments);
    }

    #[test]
    fn test_bad_count_field() {
        let data = "CLUSTAL\n\na  AC x\n";
        assert_eq!(parse_kind(data), AlignmentParseErrorKind::InvalidLine);
    }

    #[test]
    fn test_header_only() {
        assert_eq!(parse_kind("CLUSTAL W\n\n"), AlignmentParseErrorKind::Empty);
        assert_eq!(parse_kind(""), AlignmentParseErrorKind::Empty);
    }
}
