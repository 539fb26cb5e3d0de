//! Masonry row planner for the grid mode.
//!
//! Groups an ordered sequence of works into hero, pair and triplet rows in a
//! single forward pass. Each row is later laid out at a common height, so an
//! item's width is `ratio / row_total`.
//!
//! ## Desktop
//!
//! | Current item | Neighbours | Row |
//! |---|---|---|
//! | ratio > hero | any | hero |
//! | ratio < portrait | any next | pair (forced), or a lone "pair" if last |
//! | otherwise | next two < companion, triplet draw hits | triplet |
//! | otherwise | next < companion | pair |
//! | otherwise | any | hero |
//!
//! ## Mobile
//!
//! Heroes as above. Otherwise a qualifying next item pairs on a
//! `mobile_pair_chance` draw. When the current item ends up a hero right after
//! a single-item row of the same category, the first later item of another
//! category is swapped into its place. The scan only looks forward; when
//! nothing qualifies the repeat stays.

use super::calculations::{row_total_ratio, width_fractions};
use crate::config::LayoutConfig;
use crate::environment::ViewportClass;
use crate::random::Chance;
use crate::types::ArtItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Hero,
    Pair,
    Triplet,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Hero => "hero",
            RowKind::Pair => "pair",
            RowKind::Triplet => "triplet",
        }
    }
}

/// One planned row, borrowing its items from the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub kind: RowKind,
    pub items: Vec<&'a ArtItem>,
}

impl<'a> Row<'a> {
    fn new(kind: RowKind, items: Vec<&'a ArtItem>) -> Self {
        Self { kind, items }
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.ratio()).collect()
    }

    pub fn total_ratio(&self) -> f64 {
        row_total_ratio(&self.ratios())
    }

    /// Width fraction of each item, in row order.
    pub fn width_fractions(&self) -> Vec<f64> {
        width_fractions(&self.ratios())
    }
}

/// Thresholds the planner branches on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRules {
    pub hero_ratio: f64,
    pub portrait_ratio: f64,
    pub companion_ratio: f64,
    pub triplet_chance: f64,
    pub mobile_pair_chance: f64,
}

impl Default for RowRules {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for RowRules {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            hero_ratio: layout.hero_ratio,
            portrait_ratio: layout.portrait_ratio,
            companion_ratio: layout.companion_ratio,
            triplet_chance: layout.triplet_chance,
            mobile_pair_chance: layout.mobile_pair_chance,
        }
    }
}

/// Partition `items` into rows for the given viewport class.
///
/// Every input item lands in exactly one row. On desktop the concatenated
/// rows reproduce the input order exactly; on mobile the category swap may
/// move an item earlier.
pub fn plan_rows<'a>(
    items: &[&'a ArtItem],
    class: ViewportClass,
    rules: &RowRules,
    chance: &mut impl Chance,
) -> Vec<Row<'a>> {
    let rows = match class {
        ViewportClass::Desktop => plan_desktop(items, rules, chance),
        ViewportClass::Mobile => plan_mobile(items.to_vec(), rules, chance),
    };
    tracing::debug!(
        items = items.len(),
        rows = rows.len(),
        ?class,
        "planned grid rows"
    );
    rows
}

fn plan_desktop<'a>(
    items: &[&'a ArtItem],
    rules: &RowRules,
    chance: &mut impl Chance,
) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    let mut i = 0;

    while i < items.len() {
        let current = items[i];
        let remaining = items.len() - i;
        let companion = |offset: usize| items[i + offset].ratio() < rules.companion_ratio;

        if current.ratio() > rules.hero_ratio {
            rows.push(Row::new(RowKind::Hero, vec![current]));
            i += 1;
        } else if current.ratio() < rules.portrait_ratio {
            if remaining >= 2 {
                rows.push(Row::new(RowKind::Pair, vec![current, items[i + 1]]));
                i += 2;
            } else {
                // Trailing portrait: styled as a pair, never a hero.
                rows.push(Row::new(RowKind::Pair, vec![current]));
                i += 1;
            }
        } else if remaining >= 3
            && companion(1)
            && companion(2)
            && chance.hits(rules.triplet_chance)
        {
            rows.push(Row::new(
                RowKind::Triplet,
                vec![current, items[i + 1], items[i + 2]],
            ));
            i += 3;
        } else if remaining >= 2 && companion(1) {
            rows.push(Row::new(RowKind::Pair, vec![current, items[i + 1]]));
            i += 2;
        } else {
            rows.push(Row::new(RowKind::Hero, vec![current]));
            i += 1;
        }
    }

    rows
}

fn plan_mobile<'a>(
    mut items: Vec<&'a ArtItem>,
    rules: &RowRules,
    chance: &mut impl Chance,
) -> Vec<Row<'a>> {
    let mut rows: Vec<Row<'a>> = Vec::new();
    let mut i = 0;

    while i < items.len() {
        if items[i].ratio() > rules.hero_ratio {
            rows.push(Row::new(RowKind::Hero, vec![items[i]]));
            i += 1;
            continue;
        }

        let next_qualifies =
            items.len() - i >= 2 && items[i + 1].ratio() < rules.companion_ratio;
        if next_qualifies && chance.hits(rules.mobile_pair_chance) {
            rows.push(Row::new(RowKind::Pair, vec![items[i], items[i + 1]]));
            i += 2;
            continue;
        }

        let current: &'a ArtItem = items[i];
        let repeats_category = rows.last().is_some_and(|last| {
            last.items.len() == 1 && last.items[0].category == current.category
        });
        if repeats_category {
            let swap_with = items[i + 1..]
                .iter()
                .position(|c| c.category != current.category);
            if let Some(offset) = swap_with {
                tracing::debug!(
                    from = i + 1 + offset,
                    to = i,
                    "swapping to avoid consecutive same-category heroes"
                );
                items.swap(i, i + 1 + offset);
            }
        }
        rows.push(Row::new(RowKind::Hero, vec![items[i]]));
        i += 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedChance;
    use crate::test_helpers::{art, art_in, ids, refs, row_ids};

    fn desktop<'a>(items: &[&'a ArtItem], chance: &mut ScriptedChance) -> Vec<Row<'a>> {
        plan_rows(items, ViewportClass::Desktop, &RowRules::default(), chance)
    }

    fn mobile<'a>(items: &[&'a ArtItem], chance: &mut ScriptedChance) -> Vec<Row<'a>> {
        plan_rows(items, ViewportClass::Mobile, &RowRules::default(), chance)
    }

    fn flatten(rows: &[Row<'_>]) -> Vec<String> {
        rows.iter()
            .flat_map(|r| r.items.iter().map(|i| i.id.clone()))
            .collect()
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    /// A varied inventory covering every branch threshold.
    fn mixed() -> Vec<ArtItem> {
        [2.4, 0.7, 1.2, 1.33, 1.0, 1.6, 0.8, 1.9, 1.4, 1.1, 0.66, 1.25, 1.7, 0.75]
            .iter()
            .enumerate()
            .map(|(n, &ratio)| art_in(&format!("w{n:02}"), ["A", "B", "C"][n % 3], ratio))
            .collect()
    }

    // =========================================================================
    // Edge cases
    // =========================================================================

    #[test]
    fn empty_input_has_no_rows() {
        assert!(desktop(&[], &mut ScriptedChance::always()).is_empty());
        assert!(mobile(&[], &mut ScriptedChance::always()).is_empty());
    }

    #[test]
    fn single_item_is_one_row() {
        let item = art("solo", 1.2);
        let rows = desktop(&[&item], &mut ScriptedChance::always());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Hero);

        let rows = mobile(&[&item], &mut ScriptedChance::always());
        assert_eq!(rows.len(), 1);
    }

    // =========================================================================
    // Desktop rules
    // =========================================================================

    #[test]
    fn wide_item_is_always_hero() {
        let items = [art("pano", 2.1), art("a", 1.2), art("b", 1.2)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::always());
        assert_eq!(rows[0].kind, RowKind::Hero);
        assert_eq!(row_ids(&rows[0]), vec!["pano"]);
    }

    #[test]
    fn portrait_forces_pair_even_with_wide_neighbour() {
        let items = [art("tall", 0.7), art("pano", 2.5)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::never());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Pair);
        assert_eq!(row_ids(&rows[0]), vec!["tall", "pano"]);
    }

    #[test]
    fn trailing_portrait_is_lone_pair() {
        let items = [art("pano", 2.5), art("tall", 0.7)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::never());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].kind, RowKind::Pair);
        assert_eq!(row_ids(&rows[1]), vec!["tall"]);
    }

    #[test]
    fn triplet_when_draw_hits() {
        let items = [art("a", 1.2), art("b", 1.3), art("c", 1.1)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::new(vec![0.69]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Triplet);
    }

    #[test]
    fn pair_when_triplet_draw_misses() {
        let items = [art("a", 1.2), art("b", 1.3), art("c", 1.1)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::new(vec![0.7]));
        assert_eq!(rows[0].kind, RowKind::Pair);
        assert_eq!(row_ids(&rows[0]), vec!["a", "b"]);
        assert_eq!(rows[1].kind, RowKind::Hero);
    }

    #[test]
    fn no_triplet_when_third_is_wide() {
        let items = [art("a", 1.2), art("b", 1.3), art("c", 1.6)];
        let mut chance = ScriptedChance::always();
        let rows = desktop(&refs(&items), &mut chance);
        assert_eq!(rows[0].kind, RowKind::Pair);
        assert_eq!(row_ids(&rows[1]), vec!["c"]);
    }

    #[test]
    fn hero_when_next_is_not_companion() {
        let items = [art("a", 1.2), art("b", 1.6)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::always());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.kind == RowKind::Hero));
    }

    #[test]
    fn desktop_preserves_input_order() {
        let items = mixed();
        for script in [vec![0.0], vec![0.999], vec![0.1, 0.8, 0.5]] {
            let rows = desktop(&refs(&items), &mut ScriptedChance::new(script));
            assert_eq!(flatten(&rows), ids(&items));
        }
    }

    #[test]
    fn desktop_never_leaves_portrait_alone_unless_last() {
        let items = mixed();
        let last_id = items.last().unwrap().id.clone();
        for script in [vec![0.0], vec![0.999], vec![0.3, 0.9]] {
            let rows = desktop(&refs(&items), &mut ScriptedChance::new(script));
            for row in &rows {
                if row.items.len() == 1 && row.items[0].ratio() < 1.0 {
                    assert_eq!(row.items[0].id, last_id);
                }
            }
        }
    }

    #[test]
    fn desktop_rows_hold_one_to_three_items() {
        let items = mixed();
        let rows = desktop(&refs(&items), &mut ScriptedChance::always());
        assert!(rows.iter().all(|r| (1..=3).contains(&r.items.len())));
        assert!(rows.iter().all(|r| match r.kind {
            RowKind::Hero => r.items.len() == 1,
            RowKind::Pair => r.items.len() <= 2,
            RowKind::Triplet => r.items.len() == 3,
        }));
    }

    // =========================================================================
    // Mobile rules
    // =========================================================================

    #[test]
    fn mobile_pairs_on_hit() {
        let items = [art("a", 1.6), art("b", 0.8)];
        let rows = mobile(&refs(&items), &mut ScriptedChance::new(vec![0.59]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Pair);
    }

    #[test]
    fn mobile_hero_on_miss() {
        let items = [art("a", 1.6), art("b", 0.8)];
        let rows = mobile(&refs(&items), &mut ScriptedChance::new(vec![0.6]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, RowKind::Hero);
    }

    #[test]
    fn mobile_never_triplets() {
        let items = mixed();
        let rows = mobile(&refs(&items), &mut ScriptedChance::always());
        assert!(rows.iter().all(|r| r.kind != RowKind::Triplet));
    }

    #[test]
    fn mobile_swaps_to_avoid_same_category_heroes() {
        let items = [
            art_in("a1", "A", 1.6),
            art_in("a2", "A", 1.6),
            art_in("a3", "A", 1.6),
            art_in("b1", "B", 1.6),
        ];
        let rows = mobile(&refs(&items), &mut ScriptedChance::never());
        let order = flatten(&rows);
        assert_eq!(order, vec!["a1", "b1", "a3", "a2"]);
    }

    #[test]
    fn mobile_swap_leaves_conflict_when_nothing_ahead() {
        let items = [art_in("b1", "B", 1.6), art_in("a1", "A", 1.6), art_in("a2", "A", 1.6)];
        let rows = mobile(&refs(&items), &mut ScriptedChance::never());
        assert_eq!(flatten(&rows), vec!["b1", "a1", "a2"]);
    }

    #[test]
    fn mobile_swap_ignores_pair_rows() {
        let items = [
            art_in("a1", "A", 1.2),
            art_in("a2", "A", 1.2),
            art_in("a3", "A", 1.6),
            art_in("b1", "B", 1.6),
        ];
        // First draw pairs a1+a2, second draw misses for a3.
        let rows = mobile(&refs(&items), &mut ScriptedChance::new(vec![0.0, 0.9, 0.9]));
        assert_eq!(row_ids(&rows[0]), vec!["a1", "a2"]);
        assert_eq!(row_ids(&rows[1]), vec!["a3"]);
    }

    #[test]
    fn mobile_conserves_items() {
        let items = mixed();
        for script in [vec![0.0], vec![0.999], vec![0.2, 0.7, 0.65]] {
            let rows = mobile(&refs(&items), &mut ScriptedChance::new(script));
            assert_eq!(sorted(flatten(&rows)), sorted(ids(&items)));
        }
    }

    // =========================================================================
    // Shared invariants
    // =========================================================================

    #[test]
    fn wide_items_are_singleton_heroes_in_both_classes() {
        let items = mixed();
        for class in [ViewportClass::Desktop, ViewportClass::Mobile] {
            let rows = plan_rows(
                &refs(&items),
                class,
                &RowRules::default(),
                &mut ScriptedChance::new(vec![0.1, 0.9]),
            );
            for row in &rows {
                for item in &row.items {
                    if item.ratio() > 1.8 {
                        assert_eq!(row.kind, RowKind::Hero);
                        assert_eq!(row.items.len(), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn seeded_rng_plans_conserve_items() {
        let items = mixed();
        for seed in 0..20 {
            let mut rng = crate::random::rng_from_seed(Some(seed));
            let rows = plan_rows(
                &refs(&items),
                ViewportClass::Desktop,
                &RowRules::default(),
                &mut rng,
            );
            assert_eq!(flatten(&rows), ids(&items));
        }
    }

    #[test]
    fn width_fractions_follow_ratio() {
        let items = [art("a", 0.5), art("b", 1.5)];
        let rows = desktop(&refs(&items), &mut ScriptedChance::never());
        assert_eq!(rows[0].width_fractions(), vec![0.25, 0.75]);
        assert_eq!(rows[0].total_ratio(), 2.0);
    }
}
