//! Overview mosaic partitioner.
//!
//! The overview shows every work at once as a wall of rows that together fill
//! the screen. Rows share the screen height equally and each item's flex share
//! is its aspect ratio, so rows of similar total ratio come out similarly
//! filled.

use super::calculations::{mosaic_row_count, row_total_ratio};
use crate::types::ArtItem;

/// The partitioned overview wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic<'a> {
    /// Exactly `row_count` rows; trailing rows may be empty for tiny inputs.
    pub rows: Vec<Vec<&'a ArtItem>>,
    /// Accumulated-ratio budget per row (`total / K`).
    pub target_row_ratio: f64,
}

impl<'a> Mosaic<'a> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Flex share of each item in a row, equal to its ratio.
    pub fn flex_shares(&self, row: usize) -> Vec<f64> {
        self.rows
            .get(row)
            .map(|items| items.iter().map(|i| i.ratio()).collect())
            .unwrap_or_default()
    }

    pub fn row_ratio(&self, row: usize) -> f64 {
        row_total_ratio(&self.flex_shares(row))
    }

    pub fn items(&self) -> impl Iterator<Item = &'a ArtItem> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Partition `items` into `K = max(1, round(sqrt(total / screen_ratio)))` rows.
///
/// Items fill the current row until its accumulated ratio exceeds the per-row
/// budget; the next item then starts a new row. At most `K - 1` advances are
/// made, so the last row absorbs any remainder.
pub fn partition_mosaic<'a>(items: &[&'a ArtItem], screen_ratio: f64) -> Mosaic<'a> {
    let total: f64 = items.iter().map(|i| i.ratio()).sum();
    let k = mosaic_row_count(total, screen_ratio);
    let target = total / k as f64;

    let mut rows: Vec<Vec<&'a ArtItem>> = vec![Vec::new(); k];
    let mut current = 0;
    let mut width = 0.0;

    for &item in items {
        if width > target && current < k - 1 {
            current += 1;
            width = 0.0;
        }
        rows[current].push(item);
        width += item.ratio();
    }

    tracing::debug!(items = items.len(), rows = k, target, "partitioned overview mosaic");
    Mosaic {
        rows,
        target_row_ratio: target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{art, ids, refs};

    fn uniform(n: usize, ratio: f64) -> Vec<ArtItem> {
        (0..n).map(|i| art(&format!("m{i:02}"), ratio)).collect()
    }

    #[test]
    fn empty_input_still_has_one_row() {
        let mosaic = partition_mosaic(&[], 1.6);
        assert_eq!(mosaic.row_count(), 1);
        assert!(mosaic.rows[0].is_empty());
    }

    #[test]
    fn row_count_follows_square_root_rule() {
        // total 32, screen 2.0 → sqrt(16) = 4
        let items = uniform(20, 1.6);
        let mosaic = partition_mosaic(&refs(&items), 2.0);
        assert_eq!(mosaic.row_count(), 4);
        assert!((mosaic.target_row_ratio - 8.0).abs() < 1e-9);
    }

    #[test]
    fn every_item_appears_once_in_order() {
        let items: Vec<ArtItem> = [0.7, 1.5, 2.2, 1.0, 0.8, 1.33, 1.9, 0.66, 1.2]
            .iter()
            .enumerate()
            .map(|(n, &r)| art(&format!("o{n}"), r))
            .collect();
        let mosaic = partition_mosaic(&refs(&items), 16.0 / 9.0);
        let seen: Vec<String> = mosaic.items().map(|i| i.id.clone()).collect();
        assert_eq!(seen, ids(&items));
    }

    #[test]
    fn flex_shares_sum_to_row_ratio() {
        let items: Vec<ArtItem> = [0.7, 1.5, 2.2, 1.0, 0.8, 1.33]
            .iter()
            .enumerate()
            .map(|(n, &r)| art(&format!("f{n}"), r))
            .collect();
        let mosaic = partition_mosaic(&refs(&items), 1.0);
        for row in 0..mosaic.row_count() {
            let shares: f64 = mosaic.flex_shares(row).iter().sum();
            let expected: f64 = mosaic.rows[row].iter().map(|i| i.ratio()).sum();
            assert!((shares - expected).abs() < 1e-12);
            assert!((mosaic.row_ratio(row) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn advance_happens_only_after_budget_exceeded() {
        // total 4.0, screen 1.0 → K = 2, target 2.0
        let items = uniform(4, 1.0);
        let mosaic = partition_mosaic(&refs(&items), 1.0);
        assert_eq!(mosaic.row_count(), 2);
        // Width reaches exactly 2.0 after two items; it must exceed, so a third joins.
        assert_eq!(mosaic.rows[0].len(), 3);
        assert_eq!(mosaic.rows[1].len(), 1);
    }

    #[test]
    fn last_row_absorbs_remainder() {
        // total 9 on screen 1 → K = 3, target 3; wide items overflow quickly
        let items = uniform(3, 3.0);
        let mosaic = partition_mosaic(&refs(&items), 1.0);
        assert_eq!(mosaic.row_count(), 3);
        assert_eq!(mosaic.items().count(), 3);
        assert!(mosaic.rows.iter().all(|r| r.len() <= 2));
    }

    #[test]
    fn flex_shares_of_missing_row_are_empty() {
        let mosaic = partition_mosaic(&[], 1.0);
        assert!(mosaic.flex_shares(7).is_empty());
    }
}
