//! Planning stage: inventory + config + environment → `plan.json`.
//!
//! Every random and viewport-dependent decision of a session is made here,
//! once, and recorded by item id. The generator consumes the plan without
//! drawing any further randomness, so a build is reproducible from
//! `plan.json` alone.
//!
//! The static site cannot know the visitor's viewport class ahead of time, so
//! the grid is planned for both classes and the stylesheet switches between
//! them at the breakpoint.

use crate::config::SiteConfig;
use crate::environment::{Environment, ViewportClass};
use crate::inventory::{Inventory, shuffle};
use crate::layout::{Mosaic, Row, RowKind, partition_mosaic};
use crate::loading::LoadingGate;
use crate::modes::{ModeContext, ModeView, build_grid};
use crate::random::Chance;
use crate::responsive::{Tier, select_tier_with};
use crate::types::{ArtItem, ViewMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PLAN_FILE: &str = "plan.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Seed the session was planned with, when deterministic.
    pub seed: Option<u64>,
    pub reference: ReferenceViewport,
    /// Explicit `src` tier for the reference viewport.
    pub fallback_tier: Tier,
    pub display_order: Vec<String>,
    /// Items the loading gate waits on.
    pub preload: Vec<String>,
    pub grid: GridPlans,
    pub reel: Vec<String>,
    pub deck: Vec<String>,
    pub playground: Vec<String>,
    pub overview: OverviewPlan,
    pub config: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceViewport {
    pub width: u32,
    pub height: u32,
    pub dpr: f64,
    pub screen_ratio: f64,
    pub mobile: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPlans {
    pub mobile: Vec<RowPlan>,
    pub desktop: Vec<RowPlan>,
}

impl GridPlans {
    pub fn for_class(&self, class: ViewportClass) -> &[RowPlan] {
        match class {
            ViewportClass::Mobile => &self.mobile,
            ViewportClass::Desktop => &self.desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPlan {
    pub kind: RowKind,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPlan {
    pub target_row_ratio: f64,
    pub rows: Vec<Vec<String>>,
}

fn ids<'a>(items: impl IntoIterator<Item = &'a ArtItem>) -> Vec<String> {
    items.into_iter().map(|i| i.id.clone()).collect()
}

impl From<&Row<'_>> for RowPlan {
    fn from(row: &Row<'_>) -> Self {
        Self {
            kind: row.kind,
            items: ids(row.items.iter().copied()),
        }
    }
}

impl From<&Mosaic<'_>> for OverviewPlan {
    fn from(mosaic: &Mosaic<'_>) -> Self {
        Self {
            target_row_ratio: mosaic.target_row_ratio,
            rows: mosaic.rows.iter().map(|r| ids(r.iter().copied())).collect(),
        }
    }
}

/// Plan a session.
pub fn plan(
    inventory: &Inventory,
    config: &SiteConfig,
    env: &impl Environment,
    chance: &mut impl Chance,
    seed: Option<u64>,
) -> Plan {
    let display_order = shuffle(&inventory.refs(), chance);
    let ctx = ModeContext {
        inventory,
        display_order: &display_order,
        config,
        env,
    };

    let mobile = build_grid(&ctx, ViewportClass::Mobile, chance);
    let desktop = build_grid(&ctx, ViewportClass::Desktop, chance);

    let reel = ids(ModeView::build(ViewMode::Reel, &ctx, chance).items());
    let deck = ids(ModeView::build(ViewMode::Deck, &ctx, chance).items());
    let playground = ids(ModeView::build(ViewMode::Playground, &ctx, chance).items());
    let overview = OverviewPlan::from(&partition_mosaic(
        &shuffle(&inventory.refs(), chance),
        env.screen_ratio(),
    ));

    let gate = LoadingGate::for_order(&display_order, &config.loading);
    let class = ctx.viewport_class();
    let fallback_tier = select_tier_with(
        env.viewport_width(),
        env.device_pixel_ratio(),
        config.layout.mobile_breakpoint,
        config.images.high_dpr,
    );

    let plan = Plan {
        seed,
        reference: ReferenceViewport {
            width: env.viewport_width(),
            height: env.viewport_height(),
            dpr: env.device_pixel_ratio(),
            screen_ratio: env.screen_ratio(),
            mobile: class.is_mobile(),
        },
        fallback_tier,
        display_order: ids(display_order.iter().copied()),
        preload: gate.preloads().iter().map(|p| p.id.clone()).collect(),
        grid: GridPlans {
            mobile: mobile.rows.iter().map(RowPlan::from).collect(),
            desktop: desktop.rows.iter().map(RowPlan::from).collect(),
        },
        reel,
        deck,
        playground,
        overview,
        config: config.clone(),
    };
    tracing::info!(
        items = inventory.len(),
        desktop_rows = plan.grid.desktop.len(),
        mobile_rows = plan.grid.mobile.len(),
        overview_rows = plan.overview.rows.len(),
        "planned session"
    );
    plan
}

pub fn write_plan(plan: &Plan, temp_dir: &Path) -> Result<std::path::PathBuf, std::io::Error> {
    std::fs::create_dir_all(temp_dir)?;
    let path = temp_dir.join(PLAN_FILE);
    let json = serde_json::to_string_pretty(plan).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::random::{ScriptedChance, rng_from_seed};
    use crate::test_helpers::{art, art_in};
    use tempfile::TempDir;

    fn inventory() -> Inventory {
        let mut items = Vec::new();
        for n in 0..10 {
            items.push(art_in(&format!("env{n}"), "Enveloppe", 0.7));
            items.push(art_in(&format!("pay{n}"), "Paysage", 1.45));
        }
        items.push(art("wide", 2.4));
        Inventory::new(items).unwrap()
    }

    fn all_ids(rows: &[RowPlan]) -> Vec<String> {
        let mut ids: Vec<String> = rows.iter().flat_map(|r| r.items.clone()).collect();
        ids.sort();
        ids
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn grid_plans_conserve_items() {
        let inv = inventory();
        let env = StaticEnvironment::new(1440, 900, 1.0);
        let plan = plan(&inv, &SiteConfig::default(), &env, &mut rng_from_seed(Some(1)), Some(1));
        let want = sorted(plan.display_order.clone());
        assert_eq!(want.len(), 21);
        assert_eq!(all_ids(&plan.grid.desktop), want);
        assert_eq!(all_ids(&plan.grid.mobile), want);
        assert_eq!(sorted(plan.deck.clone()), want);
        assert_eq!(sorted(plan.playground.clone()), want);
        let overview: Vec<String> = plan.overview.rows.iter().flatten().cloned().collect();
        assert_eq!(sorted(overview), want);
    }

    #[test]
    fn reel_is_display_order_and_preload_its_head() {
        let inv = inventory();
        let env = StaticEnvironment::new(1440, 900, 1.0);
        let plan = plan(&inv, &SiteConfig::default(), &env, &mut rng_from_seed(Some(5)), None);
        assert_eq!(plan.reel, plan.display_order);
        assert_eq!(plan.preload, plan.display_order[..6].to_vec());
    }

    #[test]
    fn same_seed_same_plan() {
        let inv = inventory();
        let env = StaticEnvironment::new(1440, 900, 1.0);
        let config = SiteConfig::default();
        let a = plan(&inv, &config, &env, &mut rng_from_seed(Some(9)), Some(9));
        let b = plan(&inv, &config, &env, &mut rng_from_seed(Some(9)), Some(9));
        assert_eq!(a, b);
    }

    #[test]
    fn reference_viewport_drives_tier_and_overview() {
        let inv = inventory();
        let retina = StaticEnvironment::new(1440, 900, 2.0);
        let plan_desktop = plan(
            &inv,
            &SiteConfig::default(),
            &retina,
            &mut ScriptedChance::never(),
            None,
        );
        assert_eq!(plan_desktop.fallback_tier, Tier::Original);
        assert!(!plan_desktop.reference.mobile);

        let phone = StaticEnvironment::new(390, 844, 1.0);
        let plan_phone = plan(
            &inv,
            &SiteConfig::default(),
            &phone,
            &mut ScriptedChance::never(),
            None,
        );
        assert_eq!(plan_phone.fallback_tier, Tier::W580);
        assert!(plan_phone.reference.mobile);
        // A tall screen needs more mosaic rows than a wide one.
        assert!(plan_phone.overview.rows.len() > plan_desktop.overview.rows.len());
    }

    #[test]
    fn mobile_plan_keeps_the_wide_item_alone() {
        let inv = inventory();
        let env = StaticEnvironment::new(1440, 900, 1.0);
        let plan = plan(&inv, &SiteConfig::default(), &env, &mut rng_from_seed(Some(2)), None);
        let row = plan
            .grid
            .mobile
            .iter()
            .find(|r| r.items.iter().any(|id| id == "wide"))
            .unwrap();
        assert_eq!(row.kind, RowKind::Hero);
        assert_eq!(row.items.len(), 1);
    }

    #[test]
    fn plan_round_trips_through_disk() {
        let inv = inventory();
        let env = StaticEnvironment::new(1440, 900, 1.0);
        let plan = plan(&inv, &SiteConfig::default(), &env, &mut rng_from_seed(Some(4)), Some(4));
        let tmp = TempDir::new().unwrap();
        let path = write_plan(&plan, &tmp.path().join("nested")).unwrap();
        let back: Plan = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back.display_order, plan.display_order);
        assert_eq!(back.grid, plan.grid);
        assert_eq!(back.overview.rows, plan.overview.rows);
        assert_eq!(back.fallback_tier, plan.fallback_tier);
    }
}
