//! Wiggle track writer
//!
//! Writes an entropy profile as a single variableStep track:
//!
//! ```text
//! variableStep chrom=chr1
//! 1 0.0
//! 2 1.0
//! ```

use crate::core::entropy::EntropyProfile;
use crate::core::io::CompressionFormat;
use crate::core::EntropyResult;
use crate::core::pipeline::{run_pipeline, PipelineConfig};
use crate::core::smooth::validate_window;
use crate::formats::{read_alignment, AlignmentFormat};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Declaration keyword of the emitted track
pub const VARIABLE_STEP: &str = "variableStep";

/// Output buffer size (128KB)
const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Header label and coordinate shift of the emitted track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOptions {
    pub chromosome: String,
    /// Added to every position before it is written
    pub start_offset: i64,
}

impl TrackOptions {
    pub fn new(chromosome: impl Into<String>, start_offset: i64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start_offset,
        }
    }
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub rows: usize,
    pub input_columns: usize,
    pub reference_columns: Option<usize>,
    /// Data lines written
    pub written: usize,
    pub smoothed: bool,
}

/// Format an entropy value for the track
///
/// Integral values keep one decimal (`1.0`); everything else uses the
/// shortest decimal that round-trips, never exponent notation.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Write `profile` as a variableStep track
pub fn write_track<W: Write>(
    writer: &mut W,
    profile: &EntropyProfile,
    options: &TrackOptions,
) -> io::Result<usize> {
    writeln!(writer, "{} chrom={}", VARIABLE_STEP, options.chromosome)?;
    for point in profile {
        let position = point.position as i64 + options.start_offset;
        writeln!(writer, "{} {}", position, format_value(point.entropy))?;
    }
    Ok(profile.len())
}

/// `<input stem>.wig` in the current directory
///
/// A trailing `.gz`/`.bz2` is dropped before the stem is taken.
pub fn default_output_path(input: &Path) -> PathBuf {
    let extension = input.extension().and_then(|e| e.to_str());
    let compressed = extension.is_some()
        && [CompressionFormat::Gzip, CompressionFormat::Bzip2]
            .iter()
            .any(|c| c.extension() == extension);
    let base = if compressed {
        input.file_stem().map(Path::new).unwrap_or(input)
    } else {
        input
    };
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{}.wig", stem))
}

/// Track label used when none is given: the reference, else the input stem
pub fn default_chromosome(reference: Option<&str>, input: &Path) -> String {
    match reference {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => default_output_path(input)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Convert an alignment file into an entropy track
///
/// The window size is checked before the input is opened, and the output
/// file is only created once the whole profile has been computed.
///
/// # Arguments
/// * `input` - Alignment file path (plain, gzip or bzip2)
/// * `format` - Declared alignment format
/// * `output` - Track file path, overwritten if it exists
/// * `config` - Filtering and smoothing settings
/// * `options` - Track label and position offset
///
/// # Returns
/// Conversion statistics
pub fn convert_alignment<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    format: AlignmentFormat,
    output: Q,
    config: &PipelineConfig,
    options: &TrackOptions,
) -> EntropyResult<ConversionStats> {
    validate_window(config.window_size)?;
    let table = read_alignment(input.as_ref(), format)?;
    let (profile, pipeline_stats) = run_pipeline(&table, config)?;

    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, File::create(output.as_ref())?);
    let written = write_track(&mut writer, &profile, options)?;
    writer.flush()?;

    info!("Wrote {} positions to {:?}", written, output.as_ref());

    Ok(ConversionStats {
        rows: pipeline_stats.rows,
        input_columns: pipeline_stats.input_columns,
        reference_columns: pipeline_stats.reference_columns,
        written,
        smoothed: pipeline_stats.smoothed,
    })
}
