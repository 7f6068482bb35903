//! File format adapters
//!
//! Alignment readers (FASTA, Clustal, PHYLIP, Stockholm) and the
//! variableStep Wiggle track writer.

pub mod clustal;
pub mod fasta;
pub mod phylip;
pub mod stockholm;
pub mod wig;

pub use wig::{
    convert_alignment, default_chromosome, default_output_path, format_value, write_track, ConversionStats,
    TrackOptions,
};

use crate::core::{AlignmentParseError, AlignmentParseErrorKind, EntropyResult};
use crate::core::io::{LineIterator, SmartReader};
use crate::core::table::{AlignedSequence, AlignmentTable};
use log::debug;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;

/// Supported alignment file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentFormat {
    #[default]
    Clustal,
    Phylip,
    Stockholm,
    Fasta,
}

impl AlignmentFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AlignmentFormat::Clustal => "clustal",
            AlignmentFormat::Phylip => "phylip",
            AlignmentFormat::Stockholm => "stockholm",
            AlignmentFormat::Fasta => "fasta",
        }
    }

    /// Parse records from an already opened reader
    pub fn parse<R: BufRead>(&self, reader: R) -> EntropyResult<Vec<AlignedSequence>> {
        match self {
            AlignmentFormat::Clustal => clustal::parse_clustal_reader(reader),
            AlignmentFormat::Phylip => phylip::parse_phylip_reader(reader),
            AlignmentFormat::Stockholm => stockholm::parse_stockholm_reader(reader),
            AlignmentFormat::Fasta => fasta::parse_fasta_reader(reader),
        }
    }
}

impl std::fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignmentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clustal" => Ok(AlignmentFormat::Clustal),
            "phylip" => Ok(AlignmentFormat::Phylip),
            "stockholm" => Ok(AlignmentFormat::Stockholm),
            "fasta" => Ok(AlignmentFormat::Fasta),
            other => Err(format!("unsupported alignment format: {}", other)),
        }
    }
}

/// Read one alignment from `path` into a table
///
/// gzip and bzip2 input is decompressed transparently.
pub fn read_alignment<P: AsRef<Path>>(path: P, format: AlignmentFormat) -> EntropyResult<AlignmentTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("alignment file not found: {}", path.display()),
        )
        .into());
    }
    let reader = SmartReader::open_auto(path)?;
    let table = read_alignment_reader(reader, format)?;
    debug!(
        "Read {} alignment {:?}: {} rows x {} columns",
        format,
        path,
        table.num_rows(),
        table.num_cols()
    );
    Ok(table)
}

/// Read one alignment from a reader into a table
pub fn read_alignment_reader<R: BufRead>(reader: R, format: AlignmentFormat) -> EntropyResult<AlignmentTable> {
    let records = format.parse(reader)?;
    Ok(AlignmentTable::from_records(records)?)
}

/// Next line with its 1-based number, mapping undecodable lines to a format error
pub(crate) fn next_line<'a, R: BufRead>(
    lines: &'a mut LineIterator<R>,
    format: &'static str,
) -> EntropyResult<Option<(usize, &'a str)>> {
    let line_number = lines.line_number() + 1;
    match lines.next_line() {
        None => Ok(None),
        Some(Ok(line)) => Ok(Some((line_number, line))),
        Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => Err(AlignmentParseError::at_line(
            format,
            AlignmentParseErrorKind::InvalidEncoding,
            format!("unreadable line: {}", e),
            line_number,
        )
        .into()),
        Some(Err(e)) => Err(e.into()),
    }
}

/// Check that a parsed alignment is non-empty and rectangular
pub(crate) fn finish_records(
    records: Vec<AlignedSequence>,
    format: &'static str,
) -> EntropyResult<Vec<AlignedSequence>> {
    let first = records.first().ok_or_else(|| {
        AlignmentParseError::new(format, AlignmentParseErrorKind::Empty, "no records found")
    })?;
    let expected = first.residues.len();
    if let Some(bad) = records.iter().find(|r| r.residues.len() != expected) {
        return Err(AlignmentParseError::new(
            format,
            AlignmentParseErrorKind::UnequalLength,
            format!(
                "sequence '{}' has length {}, expected {}",
                bad.id,
                bad.residues.len(),
                expected
            ),
        )
        .into());
    }
    Ok(records)
}

/// Residues of a sequence chunk with all whitespace removed
pub(crate) fn squeeze(chunk: &str) -> impl Iterator<Item = u8> + '_ {
    chunk.bytes().filter(|b| !b.is_ascii_whitespace())
}
