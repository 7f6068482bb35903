//! Sliding-window smoothing of an entropy profile
//!
//! Windows are applied left to right over the values as currently stored:
//! the mean of window `i..i+w` overwrites index `i + w/2` before window
//! `i+1` is read. Later windows therefore see values already smoothed by
//! earlier ones. Position labels are never touched.

use crate::core::entropy::EntropyProfile;
use crate::core::error::{EntropyError, EntropyResult};
use log::{debug, warn};

/// Check that a smoothing window is usable
///
/// Windows of 0 and 1 disable smoothing; wider windows must be odd.
pub fn validate_window(window_size: usize) -> EntropyResult<()> {
    if window_size <= 1 || window_size % 2 == 1 {
        Ok(())
    } else {
        Err(EntropyError::InvalidWindow(window_size))
    }
}

/// Smooth `profile` in place with a cascading window mean
pub fn smooth(profile: &mut EntropyProfile, window_size: usize) -> EntropyResult<()> {
    validate_window(window_size)?;
    if window_size <= 1 {
        return Ok(());
    }

    let len = profile.len();
    if window_size > len {
        warn!(
            "Window size {} exceeds profile length {}; profile left unsmoothed",
            window_size, len
        );
        return Ok(());
    }

    let middle = (window_size - 1) / 2;
    let points = profile.points_mut();
    let mut window = Vec::with_capacity(window_size);

    for i in 0..=(len - window_size) {
        window.clear();
        window.extend(points[i..i + window_size].iter().map(|p| p.entropy));
        points[i + middle].entropy = exact_sum(&window) / window_size as f64;
    }

    debug!("Smoothed {} values with window {}", len, window_size);
    Ok(())
}

/// Correctly rounded sum of `values`
///
/// Keeps a list of non-overlapping partial sums (Shewchuk) so the result
/// is the exact sum rounded once.
pub fn exact_sum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();

    for &value in values {
        let mut x = value;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let mut n = partials.len();
    if n == 0 {
        return 0.0;
    }

    n -= 1;
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        let yr = hi - x;
        lo = y - yr;
        if lo != 0.0 {
            break;
        }
    }

    // Round half to even across the remaining partials
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        let yr = x - hi;
        if y == yr {
            hi = x;
        }
    }

    hi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validation() {
        assert!(validate_window(1).is_ok());
        assert!(validate_window(3).is_ok());
        assert!(matches!(validate_window(2), Err(EntropyError::InvalidWindow(2))));
        assert!(matches!(validate_window(4), Err(EntropyError::InvalidWindow(4))));
        assert!(validate_window(0).is_ok());
    }

    #[test]
    fn test_window_one_is_identity() {
        let mut p = EntropyProfile::from_values(&[0.3, 1.7, 0.2]);
        let before = p.clone();
        smooth(&mut p, 1).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn test_window_zero_is_identity() {
        let mut p = EntropyProfile::from_values(&[0.3, 1.7, 0.2]);
        let before = p.clone();
        smooth(&mut p, 0).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn test_even_window_rejected() {
        let mut p = EntropyProfile::from_values(&[0.0, 1.0, 2.0, 3.0]);
        assert!(matches!(smooth(&mut p, 2), Err(EntropyError::InvalidWindow(2))));
    }

    #[test]
    fn test_cascade_window_three() {
        let mut p = EntropyProfile::from_values(&[0.0, 3.0, 0.0, 3.0, 0.0]);
        smooth(&mut p, 3).unwrap();

        let v = p.values();
        let second = (1.0 + 0.0 + 3.0) / 3.0;
        let third = exact_sum(&[second, 3.0, 0.0]) / 3.0;
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 1.0);
        assert_eq!(v[2], second);
        assert_eq!(v[3], third);
        assert_eq!(v[4], 0.0);
        // An independent moving average would give 2.0 here
        assert_ne!(v[2], 2.0);
    }

    #[test]
    fn test_cascade_window_five() {
        let mut p = EntropyProfile::from_values(&[1.0, 1.0, 4.0, 1.0, 1.0, 4.0]);
        smooth(&mut p, 5).unwrap();
        let v = p.values();
        // i = 0: mean(1,1,4,1,1) = 1.6 at index 2
        assert_eq!(v[2], 1.6);
        // i = 1: mean(1,1.6,1,1,4) at index 3
        assert_eq!(v[3], exact_sum(&[1.0, 1.6, 1.0, 1.0, 4.0]) / 5.0);
        assert_eq!(&v[..2], &[1.0, 1.0]);
        assert_eq!(&v[4..], &[1.0, 4.0]);
    }

    #[test]
    fn test_positions_untouched() {
        let mut p = EntropyProfile::from_values(&[0.0, 3.0, 0.0]);
        smooth(&mut p, 3).unwrap();
        let positions: Vec<usize> = p.iter().map(|pt| pt.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_window_wider_than_profile() {
        let mut p = EntropyProfile::from_values(&[0.0, 3.0]);
        smooth(&mut p, 3).unwrap();
        assert_eq!(p.values(), vec![0.0, 3.0]);
    }

    #[test]
    fn test_exact_sum() {
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[0.1; 10]), 1.0);
        assert_eq!(exact_sum(&[1e100, 1.0, -1e100]), 1.0);
        assert_eq!(exact_sum(&[0.5, 0.25]), 0.75);
    }
}
