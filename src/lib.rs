//! msa-entropy - Positional variability tracks from sequence alignments
//!
//! Turns a multiple sequence alignment into a per-position Shannon entropy
//! profile and writes it as a variableStep Wiggle track.
//!
//! # Pipeline
//!
//! - Optional reference filter: keep columns where the reference row has no
//!   gap, then renumber them 1..L' so positions follow the reference
//! - Global gap filter with a `round(fraction × rows)` cutoff
//! - Shannon entropy per surviving column
//! - Optional cascading window smoothing
//!
//! # Example
//!
//! ```no_run
//! use msa_entropy::formats::{convert_alignment, AlignmentFormat, TrackOptions};
//! use msa_entropy::PipelineConfig;
//!
//! let config = PipelineConfig::new(Some("MN908947.3".to_string()), 0.1, 5)?;
//! let options = TrackOptions::new("NC_045512.2", 0);
//! let stats = convert_alignment("sarscov2.fasta", AlignmentFormat::Fasta, "sarscov2.wig", &config, &options)?;
//! println!("{} positions written", stats.written);
//! # Ok::<(), msa_entropy::EntropyError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    AlignedSequence, AlignmentParseError, AlignmentParseErrorKind, AlignmentTable, EntropyError,
    EntropyProfile, EntropyResult, GapThreshold, PipelineConfig, PipelineStats, ProfilePoint,
    run_pipeline,
};
pub use formats::{convert_alignment, AlignmentFormat, TrackOptions};
