//! In-memory alignment table
//!
//! Rows are sequences, columns are alignment positions. Symbols are stored
//! row-major in a single byte buffer; every table also carries the label of
//! each column in the current coordinate system.

use crate::core::error::{AlignmentParseError, AlignmentParseErrorKind, ParseResult};
use log::warn;
use std::collections::HashSet;

/// Gap symbol
pub const GAP: u8 = b'-';

/// A single parsed alignment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    /// Record description, taken verbatim from the input
    pub id: String,
    /// Aligned symbols, gaps included
    pub residues: Vec<u8>,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }
}

/// Multiple sequence alignment as a rows × columns table
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentTable {
    ids: Vec<String>,
    data: Vec<u8>,
    num_cols: usize,
    /// Column labels, 1-based
    positions: Vec<usize>,
}

impl AlignmentTable {
    /// Build a table from parsed records
    ///
    /// Every record becomes a row, in input order. Records must all have
    /// the same length.
    pub fn from_records(records: Vec<AlignedSequence>) -> ParseResult<Self> {
        let first = records.first().ok_or_else(|| {
            AlignmentParseError::new("alignment", AlignmentParseErrorKind::Empty, "no records found")
        })?;
        let num_cols = first.residues.len();

        let mut seen = HashSet::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());
        let mut data = Vec::with_capacity(records.len() * num_cols);

        for record in records {
            if record.residues.len() != num_cols {
                return Err(AlignmentParseError::new(
                    "alignment",
                    AlignmentParseErrorKind::UnequalLength,
                    format!(
                        "sequence '{}' has length {}, expected {}",
                        record.id,
                        record.residues.len(),
                        num_cols
                    ),
                ));
            }
            if !seen.insert(record.id.clone()) {
                warn!("Duplicate sequence identifier '{}' kept as a separate row", record.id);
            }
            data.extend_from_slice(&record.residues);
            ids.push(record.id);
        }

        Ok(Self {
            ids,
            data,
            num_cols,
            positions: (1..=num_cols).collect(),
        })
    }

    pub fn num_rows(&self) -> usize {
        self.ids.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Row identifiers in row order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Column labels in the current coordinate system
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn row(&self, row_idx: usize) -> &[u8] {
        let start = row_idx * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Indices of every row whose identifier equals `id`
    pub fn rows_with_id(&self, id: &str) -> Vec<usize> {
        self.ids
            .iter()
            .enumerate()
            .filter(|(_, row_id)| row_id.as_str() == id)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Symbols of one column, top to bottom
    pub fn column(&self, col_idx: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.num_rows()).map(move |r| self.data[r * self.num_cols + col_idx])
    }

    pub fn gap_count(&self, col_idx: usize) -> usize {
        self.column(col_idx).filter(|&b| b == GAP).count()
    }

    /// New table holding only the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * self.num_cols);
        for &r in rows {
            data.extend_from_slice(self.row(r));
        }
        Self {
            ids: rows.iter().map(|&r| self.ids[r].clone()).collect(),
            data,
            num_cols: self.num_cols,
            positions: self.positions.clone(),
        }
    }

    /// New table holding only the given column indices
    ///
    /// Column labels travel with their columns.
    pub fn select_columns(&self, cols: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.num_rows() * cols.len());
        for row in self.data.chunks_exact(self.num_cols.max(1)).take(self.num_rows()) {
            data.extend(cols.iter().map(|&c| row[c]));
        }
        Self {
            ids: self.ids.clone(),
            data,
            num_cols: cols.len(),
            positions: cols.iter().map(|&c| self.positions[c]).collect(),
        }
    }

    /// Renumber columns 1..=num_cols in their current order
    pub fn reindex(mut self) -> Self {
        self.positions = (1..=self.num_cols).collect();
        self
    }
}
