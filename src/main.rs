//! msa-entropy CLI entry point
//!
//! Writes a per-position Shannon entropy track for a multiple sequence alignment.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use msa_entropy::formats::{self, default_chromosome, default_output_path, AlignmentFormat, TrackOptions};
use msa_entropy::PipelineConfig;
use std::path::PathBuf;
use std::time::Instant;

/// Alignment file format (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FileTypeArg {
    #[default]
    Clustal,
    Phylip,
    Stockholm,
    Fasta,
}

impl From<FileTypeArg> for AlignmentFormat {
    fn from(arg: FileTypeArg) -> Self {
        match arg {
            FileTypeArg::Clustal => AlignmentFormat::Clustal,
            FileTypeArg::Phylip => AlignmentFormat::Phylip,
            FileTypeArg::Stockholm => AlignmentFormat::Stockholm,
            FileTypeArg::Fasta => AlignmentFormat::Fasta,
        }
    }
}

#[derive(Parser)]
#[command(name = "msa-entropy")]
#[command(about = "Per-position Shannon entropy track from a multiple sequence alignment")]
#[command(version)]
#[command(author = "msa-entropy Contributors")]
struct Cli {
    /// Alignment file (plain, gzip or bzip2)
    input_filename: PathBuf,
    /// Alignment format
    #[arg(value_enum, ignore_case = true, default_value = "clustal")]
    filetype: FileTypeArg,
    /// Output track file (default: <input stem>.wig in the current directory)
    #[arg(default_value = "")]
    output_filename: String,
    /// Sequence whose ungapped positions define the reported coordinates
    studied_genome_accession: Option<String>,
    /// Drop columns with a larger fraction of gaps than this
    #[arg(default_value_t = 0.0)]
    max_fraction_gaps: f64,
    /// Odd smoothing window size (0 or 1 disables smoothing)
    #[arg(default_value_t = 1)]
    window_size: usize,
    /// Chromosome written into the track header (default: reference accession or input stem)
    chromosome: Option<String>,
    /// Offset added to every reported position
    #[arg(allow_negative_numbers = true)]
    wig_start_index: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let reference = cli.studied_genome_accession.filter(|s| !s.is_empty());
    let config = PipelineConfig::new(reference.clone(), cli.max_fraction_gaps, cli.window_size)?;

    let output_path = if cli.output_filename.is_empty() {
        default_output_path(&cli.input_filename)
    } else {
        PathBuf::from(&cli.output_filename)
    };
    let chromosome = cli
        .chromosome
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_chromosome(reference.as_deref(), &cli.input_filename));
    let options = TrackOptions::new(chromosome, cli.wig_start_index.unwrap_or(0));
    let format: AlignmentFormat = cli.filetype.into();

    eprintln!(
        "Computing entropy track: {:?} ({}) -> {:?}",
        cli.input_filename, format, output_path
    );
    if let Some(reference) = &config.reference {
        eprintln!("Reference sequence: {}", reference);
    }

    let stats = formats::convert_alignment(&cli.input_filename, format, &output_path, &config, &options)
        .with_context(|| format!("Failed to build entropy track from {:?}", cli.input_filename))?;

    eprintln!("\n=== Entropy Statistics ===");
    eprintln!("Sequences:       {}", stats.rows);
    eprintln!("Columns:         {}", stats.input_columns);
    if let Some(columns) = stats.reference_columns {
        eprintln!("Reference cols:  {}", columns);
    }
    eprintln!("Positions:       {}", stats.written);
    eprintln!("Window size:     {}", config.window_size);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
