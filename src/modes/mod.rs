//! Per-mode view models.
//!
//! | Mode | Source sequence | View model |
//! |---|---|---|
//! | Reel | display order | [`reel::ReelCard`] strip |
//! | Grid | display order | [`grid::GridView`] row plan |
//! | Deck | display order, reshuffled | [`deck::DeckCycler`] |
//! | Playground | full inventory, orientation first | [`playground::Playground`] |
//! | Overview | full inventory, reshuffled | [`Mosaic`] |
//!
//! [`ModeView::build`] is the single selector; nothing else branches on
//! [`ViewMode`].

pub mod deck;
pub mod grid;
pub mod playground;
pub mod reel;

use crate::config::SiteConfig;
use crate::environment::{Environment, ViewportClass};
use crate::inventory::{Inventory, shuffle};
use crate::layout::{Mosaic, RowRules, partition_mosaic, plan_rows};
use crate::random::Chance;
use crate::types::{ArtItem, ViewMode};

pub use deck::{CardStyle, DeckCycler};
pub use grid::{GridCell, GridView};
pub use playground::Playground;
pub use reel::{ReelCard, reel_cards};

#[derive(Debug, Clone)]
pub enum ModeView<'a> {
    Reel(Vec<ReelCard<'a>>),
    Grid(GridView<'a>),
    Deck(DeckCycler<'a>),
    Playground(Playground<'a>),
    Overview(Mosaic<'a>),
}

/// Inputs shared by every mode.
pub struct ModeContext<'a, 'c, E: Environment> {
    pub inventory: &'a Inventory,
    /// The session's shuffled display order.
    pub display_order: &'c [&'a ArtItem],
    pub config: &'c SiteConfig,
    pub env: &'c E,
}

impl<'a, E: Environment> ModeContext<'a, '_, E> {
    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::from_width(self.env.viewport_width(), self.config.layout.mobile_breakpoint)
    }
}

impl<'a> ModeView<'a> {
    pub fn build<E: Environment>(
        mode: ViewMode,
        ctx: &ModeContext<'a, '_, E>,
        chance: &mut impl Chance,
    ) -> Self {
        let config = ctx.config;
        match mode {
            ViewMode::Reel => ModeView::Reel(reel_cards(
                ctx.display_order,
                config.images.reel_priority,
                &config.modes,
            )),
            ViewMode::Grid => ModeView::Grid(build_grid(ctx, ctx.viewport_class(), chance)),
            ViewMode::Deck => {
                ModeView::Deck(DeckCycler::new(shuffle(ctx.display_order, chance), &config.deck))
            }
            ViewMode::Playground => {
                ModeView::Playground(Playground::new(&ctx.inventory.refs(), ctx.env.screen_ratio()))
            }
            ViewMode::Overview => {
                let order = shuffle(&ctx.inventory.refs(), chance);
                ModeView::Overview(partition_mosaic(&order, ctx.env.screen_ratio()))
            }
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ModeView::Reel(_) => ViewMode::Reel,
            ModeView::Grid(_) => ViewMode::Grid,
            ModeView::Deck(_) => ViewMode::Deck,
            ModeView::Playground(_) => ViewMode::Playground,
            ModeView::Overview(_) => ViewMode::Overview,
        }
    }

    /// Every item the view shows, in presentation order.
    pub fn items(&self) -> Vec<&'a ArtItem> {
        match self {
            ModeView::Reel(cards) => cards.iter().map(|c| c.item).collect(),
            ModeView::Grid(grid) => grid.items(),
            ModeView::Deck(deck) => deck.cards().collect(),
            ModeView::Playground(pg) => pg.items().to_vec(),
            ModeView::Overview(mosaic) => mosaic.items().collect(),
        }
    }
}

/// Row plan of the display order for one viewport class.
pub fn build_grid<'a, E: Environment>(
    ctx: &ModeContext<'a, '_, E>,
    class: ViewportClass,
    chance: &mut impl Chance,
) -> GridView<'a> {
    let rules = RowRules::from(&ctx.config.layout);
    GridView {
        class,
        rows: plan_rows(ctx.display_order, class, &rules, chance),
        priority_rows: ctx.config.layout.priority_rows,
        lazy_margin_px: ctx.config.images.lazy_margin_px,
    }
}
