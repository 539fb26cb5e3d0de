//! Grid: the masonry row plan with per-cell loading and entrance data.

use crate::environment::ViewportClass;
use crate::layout::{Row, RowKind};
use crate::motion::stagger_delay;
use crate::responsive::{LoadPolicy, sizes_hint};
use crate::types::ArtItem;

#[derive(Debug, Clone, PartialEq)]
pub struct GridView<'a> {
    pub class: ViewportClass,
    pub rows: Vec<Row<'a>>,
    /// Rows `0..priority_rows` load eagerly.
    pub priority_rows: usize,
    pub lazy_margin_px: u32,
}

/// One image slot of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    pub item: &'a ArtItem,
    pub kind: RowKind,
    pub priority: bool,
    /// Entrance delay in seconds; only priority rows stagger.
    pub delay: f64,
    /// Share of the row width, in `0..=1`.
    pub width_fraction: f64,
    pub policy: LoadPolicy,
    pub sizes: &'static str,
}

impl<'a> GridView<'a> {
    pub fn items(&self) -> Vec<&'a ArtItem> {
        self.rows.iter().flat_map(|r| r.items.iter().copied()).collect()
    }

    pub fn is_priority_row(&self, row: usize) -> bool {
        row < self.priority_rows
    }

    pub fn cells(&self, row: usize) -> Vec<GridCell<'a>> {
        let Some(r) = self.rows.get(row) else {
            return Vec::new();
        };
        let priority = self.is_priority_row(row);
        r.items
            .iter()
            .zip(r.width_fractions())
            .enumerate()
            .map(|(index, (&item, width_fraction))| GridCell {
                item,
                kind: r.kind,
                priority,
                delay: if priority { stagger_delay(index, true) } else { 0.0 },
                width_fraction,
                policy: LoadPolicy::for_priority(priority, self.lazy_margin_px),
                sizes: sizes_hint(r.kind),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RowRules, plan_rows};
    use crate::random::ScriptedChance;
    use crate::test_helpers::{art, refs};

    fn view(items: &[ArtItem]) -> GridView<'_> {
        let rows = plan_rows(
            &refs(items),
            ViewportClass::Desktop,
            &RowRules::default(),
            &mut ScriptedChance::never(),
        );
        GridView {
            class: ViewportClass::Desktop,
            rows,
            priority_rows: 2,
            lazy_margin_px: 200,
        }
    }

    #[test]
    fn first_two_rows_are_eager() {
        let items: Vec<ArtItem> = (0..4).map(|i| art(&format!("h{i}"), 2.0)).collect();
        let grid = view(&items);
        assert_eq!(grid.rows.len(), 4);
        assert_eq!(grid.cells(1)[0].policy, LoadPolicy::Eager);
        assert_eq!(grid.cells(2)[0].policy, LoadPolicy::Lazy { margin_px: 200 });
        assert_eq!(grid.cells(0)[0].sizes, "(max-width: 768px) 100vw, 90vw");
    }

    #[test]
    fn stagger_within_priority_rows_only() {
        // never-draws: portrait pairs are forced, so rows are pairs
        let items: Vec<ArtItem> = (0..6).map(|i| art(&format!("p{i}"), 0.7)).collect();
        let grid = view(&items);
        assert!((grid.cells(0)[1].delay - 0.08).abs() < 1e-12);
        assert_eq!(grid.cells(2)[1].delay, 0.0);
    }

    #[test]
    fn cell_widths_follow_ratios() {
        let items = [art("p", 0.5), art("l", 1.5)];
        let grid = view(&items);
        let cells = grid.cells(0);
        assert!((cells[0].width_fraction - 0.25).abs() < 1e-12);
        assert!((cells[1].width_fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn items_flatten_rows_in_order() {
        let items: Vec<ArtItem> = (0..5).map(|i| art(&format!("i{i}"), 0.7)).collect();
        let grid = view(&items);
        let ids: Vec<&str> = grid.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i0", "i1", "i2", "i3", "i4"]);
        assert!(grid.cells(99).is_empty());
    }
}
