//! Alignment-to-profile pipeline
//!
//! reference filter + renumber (optional) → global gap filter → entropy →
//! window smoothing (optional). Each stage produces a new value; the input
//! table is never modified.

use crate::core::entropy::{self, EntropyProfile};
use crate::core::error::EntropyResult;
use crate::core::gaps::{self, GapThreshold};
use crate::core::smooth;
use crate::core::table::AlignmentTable;
use log::{debug, info};

/// Validated pipeline settings
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Row whose ungapped positions define the output coordinates
    pub reference: Option<String>,
    /// Global gap threshold, applied after the reference filter
    pub max_gaps: GapThreshold,
    /// Odd smoothing window; 0 or 1 disables smoothing
    pub window_size: usize,
}

impl PipelineConfig {
    /// Build a config, rejecting even windows and out-of-range gap fractions
    pub fn new(
        reference: Option<String>,
        max_gap_fraction: f64,
        window_size: usize,
    ) -> EntropyResult<Self> {
        smooth::validate_window(window_size)?;
        Ok(Self {
            reference: reference.filter(|r| !r.is_empty()),
            max_gaps: GapThreshold::new(max_gap_fraction)?,
            window_size,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference: None,
            max_gaps: GapThreshold::NO_GAPS,
            window_size: 1,
        }
    }
}

/// Column counts at each stage of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows: usize,
    pub input_columns: usize,
    /// Columns left after the reference filter, when one was applied
    pub reference_columns: Option<usize>,
    pub filtered_columns: usize,
    pub smoothed: bool,
}

/// Run the full pipeline over `table`
pub fn run_pipeline(
    table: &AlignmentTable,
    config: &PipelineConfig,
) -> EntropyResult<(EntropyProfile, PipelineStats)> {
    smooth::validate_window(config.window_size)?;

    let mut stats = PipelineStats {
        rows: table.num_rows(),
        input_columns: table.num_cols(),
        ..Default::default()
    };

    let referenced = match &config.reference {
        Some(reference) => {
            let (narrow, _) = gaps::filter_to_reference(table, reference)?;
            stats.reference_columns = Some(narrow.num_cols());
            Some(narrow)
        }
        None => None,
    };
    let current = referenced.as_ref().unwrap_or(table);

    let filtered = gaps::filter(current, config.max_gaps);
    stats.filtered_columns = filtered.num_cols();

    let mut profile = entropy::profile(&filtered);

    if config.window_size > 1 {
        smooth::smooth(&mut profile, config.window_size)?;
        stats.smoothed = true;
    }

    debug!("Pipeline stats: {:?}", stats);
    info!(
        "Entropy profile: {} rows, {} of {} columns reported",
        stats.rows, stats.filtered_columns, stats.input_columns
    );

    Ok((profile, stats))
}
