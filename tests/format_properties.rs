//! Property-based tests for the alignment readers
//!
//! Alignments are rendered in each supported layout, with random block
//! widths, and must read back as the same records.

use msa_entropy::formats::{read_alignment, read_alignment_reader, AlignmentFormat};
use msa_entropy::{AlignmentParseErrorKind, AlignmentTable, EntropyError};
use proptest::prelude::*;
use std::io::Write;
use tempfile::Builder;

#[derive(Debug, Clone)]
struct Alignment {
    ids: Vec<String>,
    rows: Vec<Vec<u8>>,
}

/// Generate an alignment with unique identifiers of at most 10 characters
fn arb_alignment() -> impl Strategy<Value = Alignment> {
    (1usize..6, 1usize..80).prop_flat_map(|(n, cols)| {
        (
            prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,5}", n),
            prop::collection::vec(
                prop::collection::vec(prop::sample::select(b"ACGTN-".to_vec()), cols),
                n,
            ),
        )
            .prop_map(|(names, rows)| Alignment {
                ids: names.iter().enumerate().map(|(i, s)| format!("{}{}", s, i)).collect(),
                rows,
            })
    })
}

fn chunks(row: &[u8], width: usize) -> Vec<String> {
    row.chunks(width)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect()
}

fn render_fasta(aln: &Alignment, width: usize) -> String {
    let mut out = String::new();
    for (id, row) in aln.ids.iter().zip(&aln.rows) {
        out.push_str(&format!(">{}\n", id));
        for chunk in chunks(row, width) {
            out.push_str(&chunk);
            out.push('\n');
        }
    }
    out
}

fn render_clustal(aln: &Alignment, width: usize) -> String {
    let mut out = String::from("CLUSTAL W (1.83) multiple sequence alignment\n\n\n");
    let blocks: Vec<Vec<String>> = aln.rows.iter().map(|r| chunks(r, width)).collect();
    for b in 0..blocks[0].len() {
        for (id, row_blocks) in aln.ids.iter().zip(&blocks) {
            out.push_str(&format!("{:<16}{}\n", id, row_blocks[b]));
        }
        out.push_str(&format!("{:<16}{}\n\n", "", "*".repeat(blocks[0][b].len())));
    }
    out
}

fn render_phylip(aln: &Alignment, width: usize) -> String {
    let mut out = format!(" {} {}\n", aln.rows.len(), aln.rows[0].len());
    let blocks: Vec<Vec<String>> = aln.rows.iter().map(|r| chunks(r, width)).collect();
    for b in 0..blocks[0].len() {
        for (id, row_blocks) in aln.ids.iter().zip(&blocks) {
            if b == 0 {
                out.push_str(&format!("{:<10}{}\n", id, row_blocks[b]));
            } else {
                out.push_str(&format!("{}\n", row_blocks[b]));
            }
        }
        out.push('\n');
    }
    out
}

fn render_stockholm(aln: &Alignment, width: usize) -> String {
    let mut out = String::from("# STOCKHOLM 1.0\n#=GF ID test\n\n");
    let blocks: Vec<Vec<String>> = aln.rows.iter().map(|r| chunks(r, width)).collect();
    for b in 0..blocks[0].len() {
        for (id, row_blocks) in aln.ids.iter().zip(&blocks) {
            out.push_str(&format!("{:<12} {}\n", id, row_blocks[b]));
        }
        out.push('\n');
    }
    out.push_str("//\n");
    out
}

fn check(table: &AlignmentTable, aln: &Alignment) -> Result<(), TestCaseError> {
    prop_assert_eq!(table.ids().to_vec(), aln.ids.clone());
    prop_assert_eq!(table.num_cols(), aln.rows[0].len());
    for (r, row) in aln.rows.iter().enumerate() {
        prop_assert_eq!(table.row(r), row.as_slice());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: wrapped FASTA reads back as the original rows
    #[test]
    fn prop_fasta_reads_back(aln in arb_alignment(), width in 1usize..70) {
        let text = render_fasta(&aln, width);
        let table = read_alignment_reader(text.as_bytes(), AlignmentFormat::Fasta).unwrap();
        check(&table, &aln)?;
    }

    /// Property: multi-block Clustal reads back as the original rows
    #[test]
    fn prop_clustal_reads_back(aln in arb_alignment(), width in 1usize..70) {
        let text = render_clustal(&aln, width);
        let table = read_alignment_reader(text.as_bytes(), AlignmentFormat::Clustal).unwrap();
        check(&table, &aln)?;
    }

    /// Property: interleaved strict PHYLIP reads back as the original rows
    #[test]
    fn prop_phylip_reads_back(aln in arb_alignment(), width in 1usize..70) {
        let text = render_phylip(&aln, width);
        let table = read_alignment_reader(text.as_bytes(), AlignmentFormat::Phylip).unwrap();
        check(&table, &aln)?;
    }

    /// Property: multi-block Stockholm reads back as the original rows
    #[test]
    fn prop_stockholm_reads_back(aln in arb_alignment(), width in 1usize..70) {
        let text = render_stockholm(&aln, width);
        let table = read_alignment_reader(text.as_bytes(), AlignmentFormat::Stockholm).unwrap();
        check(&table, &aln)?;
    }

    /// Property: a row cut short is reported as unequal length
    #[test]
    fn prop_fasta_short_row_rejected(aln in arb_alignment()) {
        prop_assume!(aln.rows.len() > 1);
        let mut short = aln.clone();
        short.rows[1].pop();
        let text = render_fasta(&short, 60);
        match read_alignment_reader(text.as_bytes(), AlignmentFormat::Fasta) {
            Err(EntropyError::Format(e)) => prop_assert!(e.is_kind(AlignmentParseErrorKind::UnequalLength)),
            other => prop_assert!(false, "unexpected result: {:?}", other.map(|t| t.num_cols())),
        }
    }
}

#[test]
fn test_compressed_files_match_plain() {
    let aln = Alignment {
        ids: vec!["ref".to_string(), "other".to_string()],
        rows: vec![b"ACGT-ACGT".to_vec(), b"ACCTAAC-T".to_vec()],
    };
    let text = render_clustal(&aln, 4);

    let mut plain = Builder::new().suffix(".aln").tempfile().unwrap();
    plain.write_all(text.as_bytes()).unwrap();
    plain.flush().unwrap();
    let expected = read_alignment(plain.path(), AlignmentFormat::Clustal).unwrap();

    let mut gz = Builder::new().suffix(".aln.gz").tempfile().unwrap();
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    gz.write_all(&encoder.finish().unwrap()).unwrap();
    gz.flush().unwrap();
    assert_eq!(read_alignment(gz.path(), AlignmentFormat::Clustal).unwrap(), expected);

    let mut bz = Builder::new().suffix(".aln.bz2").tempfile().unwrap();
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    bz.write_all(&encoder.finish().unwrap()).unwrap();
    bz.flush().unwrap();
    assert_eq!(read_alignment(bz.path(), AlignmentFormat::Clustal).unwrap(), expected);
}

#[test]
fn test_wrong_format_is_reported() {
    let text = ">a\nACGT\n>b\nACGT\n";
    match read_alignment_reader(text.as_bytes(), AlignmentFormat::Clustal) {
        Err(EntropyError::Format(e)) => assert!(e.is_kind(AlignmentParseErrorKind::InvalidHeader)),
        other => panic!("unexpected result: {:?}", other.map(|t| t.num_rows())),
    }
}
