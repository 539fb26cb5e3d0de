//! Pure calculation functions for row geometry.
//!
//! All functions here are pure and testable without any rendering surface.

/// Sum of aspect ratios in a row.
pub fn row_total_ratio(ratios: &[f64]) -> f64 {
    ratios.iter().sum()
}

/// Fraction of the row width each item occupies: `ratio / total`.
///
/// Items in one row share a common height, so width is proportional to the
/// aspect ratio. A degenerate all-zero row splits evenly.
///
/// ```
/// # use artwall::layout::width_fractions;
/// assert_eq!(width_fractions(&[1.0, 3.0]), vec![0.25, 0.75]);
/// ```
pub fn width_fractions(ratios: &[f64]) -> Vec<f64> {
    let total = row_total_ratio(ratios);
    if total <= 0.0 {
        let even = 1.0 / ratios.len().max(1) as f64;
        return vec![even; ratios.len()];
    }
    ratios.iter().map(|r| r / total).collect()
}

/// [`width_fractions`] as CSS percentages.
pub fn width_percents(ratios: &[f64]) -> Vec<f64> {
    width_fractions(ratios)
        .into_iter()
        .map(|f| f * 100.0)
        .collect()
}

/// Number of overview rows for a given total aspect ratio and screen shape.
///
/// `K = round(sqrt(total_ratio / screen_ratio))`, never below 1. A
/// non-positive screen ratio is treated as square.
///
/// ```
/// # use artwall::layout::mosaic_row_count;
/// // Twenty 1.6-ratio works on a 16:10 screen → sqrt(20) ≈ 4.47 → 4 rows
/// assert_eq!(mosaic_row_count(32.0, 1.6), 4);
/// assert_eq!(mosaic_row_count(0.0, 1.6), 1);
/// ```
pub fn mosaic_row_count(total_ratio: f64, screen_ratio: f64) -> usize {
    let screen = if screen_ratio > 0.0 && screen_ratio.is_finite() {
        screen_ratio
    } else {
        1.0
    };
    let k = (total_ratio.max(0.0) / screen).sqrt().round();
    if k.is_finite() { (k as usize).max(1) } else { 1 }
}
