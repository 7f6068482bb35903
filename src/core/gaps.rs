//! Gap-based column filtering
//!
//! A column survives when its gap count is at most
//! `round(max_gap_fraction × rows)`, rounded half to even, with the row
//! count taken from the table being filtered.

use crate::core::error::{EntropyError, EntropyResult};
use crate::core::table::AlignmentTable;
use log::debug;

/// Maximum tolerated fraction of gaps in a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapThreshold(f64);

impl GapThreshold {
    /// Only columns without any gap survive
    pub const NO_GAPS: GapThreshold = GapThreshold(0.0);

    pub fn new(fraction: f64) -> EntropyResult<Self> {
        if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
            Ok(Self(fraction))
        } else {
            Err(EntropyError::InvalidGapFraction(fraction))
        }
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Integer gap cutoff for a table with `num_rows` rows
    #[inline]
    pub fn cutoff(&self, num_rows: usize) -> usize {
        (self.0 * num_rows as f64).round_ties_even() as usize
    }
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self::NO_GAPS
    }
}

/// Indices of the columns that pass `threshold`, in column order
pub fn surviving_columns(table: &AlignmentTable, threshold: GapThreshold) -> Vec<usize> {
    let cutoff = threshold.cutoff(table.num_rows());
    (0..table.num_cols())
        .filter(|&c| table.gap_count(c) <= cutoff)
        .collect()
}

/// Drop every column with more gaps than `threshold` allows
pub fn filter(table: &AlignmentTable, threshold: GapThreshold) -> AlignmentTable {
    let keep = surviving_columns(table, threshold);
    debug!(
        "Gap filter (fraction={}, cutoff={}): {} of {} columns kept",
        threshold.fraction(),
        threshold.cutoff(table.num_rows()),
        keep.len(),
        table.num_cols()
    );
    table.select_columns(&keep)
}

/// Restrict the alignment to columns where the reference has no gap
///
/// Returns the narrowed table, renumbered 1..=L', together with the labels
/// the surviving columns carried before renumbering.
pub fn filter_to_reference(
    table: &AlignmentTable,
    reference_id: &str,
) -> EntropyResult<(AlignmentTable, Vec<usize>)> {
    let rows = table.rows_with_id(reference_id);
    if rows.is_empty() {
        return Err(EntropyError::MissingReference(reference_id.to_string()));
    }

    let reference = table.select_rows(&rows);
    let keep = surviving_columns(&reference, GapThreshold::NO_GAPS);
    let original: Vec<usize> = keep.iter().map(|&c| table.positions()[c]).collect();

    debug!(
        "Reference '{}': {} of {} columns are ungapped",
        reference_id,
        keep.len(),
        table.num_cols()
    );

    Ok((table.select_columns(&keep).reindex(), original))
}
