//! Position-wise Shannon entropy
//!
//! `H = -Σ p(s)·log2 p(s)` over the symbols observed in a column. The gap
//! symbol counts as an ordinary symbol here.

use crate::core::table::AlignmentTable;
use log::debug;

/// One entry of an entropy profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Column label in the coordinate system the profile was built in
    pub position: usize,
    pub entropy: f64,
}

/// Ordered (position, entropy) pairs, one per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntropyProfile {
    points: Vec<ProfilePoint>,
}

impl EntropyProfile {
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        Self { points }
    }

    /// Profile from positions 1..=N with the given values
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &entropy)| ProfilePoint { position: i + 1, entropy })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [ProfilePoint] {
        &mut self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.entropy).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfilePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a EntropyProfile {
    type Item = &'a ProfilePoint;
    type IntoIter = std::slice::Iter<'a, ProfilePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Shannon entropy (bits) of a multiset of symbols
///
/// Terms are summed in ascending symbol order. Returns 0.0 for an empty
/// or fully conserved column.
pub fn shannon_entropy<I>(symbols: I) -> f64
where
    I: IntoIterator<Item = u8>,
{
    let mut counts = [0usize; 256];
    let mut total = 0usize;
    for s in symbols {
        counts[s as usize] += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let n = total as f64;
    let sum: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum();

    // A single symbol gives -(1·log2 1) = -0.0
    if sum == 0.0 {
        0.0
    } else {
        -sum
    }
}

/// Entropy of every column, in column order
pub fn profile(table: &AlignmentTable) -> EntropyProfile {
    let points: Vec<ProfilePoint> = table
        .positions()
        .iter()
        .enumerate()
        .map(|(c, &position)| ProfilePoint {
            position,
            entropy: shannon_entropy(table.column(c)),
        })
        .collect();
    debug!("Computed entropy for {} columns", points.len());
    EntropyProfile::new(points)
}
