//! Core alignment analysis
//!
//! This module contains the alignment table, gap filtering, entropy
//! profiling and window smoothing, plus shared I/O and error types.

pub mod entropy;
mod error;
pub mod gaps;
pub mod io;
pub mod pipeline;
pub mod smooth;
pub mod table;

pub use entropy::{profile, shannon_entropy, EntropyProfile, ProfilePoint};
pub use error::{
    AlignmentParseError, AlignmentParseErrorKind, EntropyError, EntropyResult, ParseResult,
};
pub use gaps::{filter, filter_to_reference, surviving_columns, GapThreshold};
pub use io::{detect_compression, CompressionFormat, IoStrategy, LineIterator, SmartReader};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineStats};
pub use smooth::{exact_sum, smooth, validate_window};
pub use table::{AlignedSequence, AlignmentTable, GAP};
