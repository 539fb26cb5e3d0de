//! HTML site generation.
//!
//! Stage 3 of the artwall pipeline. Takes the session plan and the inventory
//! and renders one static page per viewing mode.
//!
//! ## Generated Pages
//!
//! - **Reel** (`/index.html`): horizontal scroll-snap strip, the default mode.
//!   Carries the loading gate.
//! - **Grid** (`/grid.html`): masonry rows, planned for both viewport classes.
//! - **Deck** (`/deck.html`): stacked cards, cycled by tap, swipe or arrows.
//! - **Canvas** (`/playground.html`): one work at a time on a palette backdrop.
//! - **Overview** (`/overview.html`): every work on one screen.
//!
//! Grid and overview cells open a detail overlay. Each overlay is a CSS
//! `:target` panel (`#detail-<id>`), so opening and closing work without
//! script; the script only adds the gesture layer.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── grid.html
//! ├── deck.html
//! ├── playground.html
//! ├── overview.html
//! └── style-1a2b3c4d.css      # Content-addressed stylesheet
//! ```
//!
//! Images are never copied; every `src`/`srcset` points at the asset host
//! URLs from the inventory.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors, motion and breakpoint injected from config)
//! - `static/gallery.js`: Load flags, loading gate, deck cycling, canvas paging

use crate::config::{self, SiteConfig};
use crate::environment::StaticEnvironment;
use crate::inventory::{Inventory, InventoryError, load_inventory};
use crate::layout::width_percents;
use crate::loading::{PLACEHOLDER_OPACITY, PRELOAD_TIER, placeholder_color};
use crate::modes::deck::{FADE_STEP, LIFT_STEP, SCALE_STEP};
use crate::modes::playground::SWIPE_POWER;
use crate::modes::reel::REEL_PLACEHOLDER_OPACITY;
use crate::modes::{DeckCycler, Playground, reel_cards};
use crate::motion::{self, Durations, stagger_delay};
use crate::overlay::{DRAG_RESISTANCE_X, DRAG_RESISTANCE_Y, RUBBER_BAND};
use crate::plan::{Plan, RowPlan};
use crate::responsive::{
    CARD_LADDER, FULL_LADDER, LoadPolicy, MOSAIC_LADDER, SLIDE_LADDER, Tier, sizes_hint, srcset,
};
use crate::types::{ArtItem, ViewMode};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
    #[error("plan references unknown item: {0}")]
    UnknownItem(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

const REEL_SIZES: &str = "(max-width: 768px) 85vw, 40vw";
const DECK_SIZES: &str = "(max-width: 768px) 85vw, 450px";
const SLIDE_SIZES: &str = "100vw";
const MOSAIC_SIZES: &str = "15vw";

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub mode: ViewMode,
    pub file: String,
    pub items: usize,
}

/// What stage 3 wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<PageReport>,
    pub stylesheet: String,
}

/// Read `plan.json` and the inventory, then render the site.
pub fn generate_from_files(
    plan_path: &Path,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let plan: Plan = serde_json::from_str(&fs::read_to_string(plan_path)?)?;
    let inventory = load_inventory(content_dir)?;
    generate(&plan, &inventory, output_dir)
}

pub fn generate(
    plan: &Plan,
    inventory: &Inventory,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let site = Site::new(plan, inventory);

    let css = build_css(&plan.config);
    let stylesheet = stylesheet_name(&css);
    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(&stylesheet), &css)?;

    let mut pages = Vec::new();
    for mode in ViewMode::ALL {
        let (markup, items) = match mode {
            ViewMode::Reel => {
                let order = site.resolve(&plan.reel)?;
                (render_reel(&site, &order, &stylesheet)?, order.len())
            }
            ViewMode::Grid => (render_grid(&site, &stylesheet)?, plan.display_order.len()),
            ViewMode::Deck => {
                let order = site.resolve(&plan.deck)?;
                (render_deck(&site, &order, &stylesheet), order.len())
            }
            ViewMode::Playground => {
                let order = site.resolve(&plan.playground)?;
                (render_playground(&site, &order, &stylesheet), order.len())
            }
            ViewMode::Overview => (render_overview(&site, &stylesheet)?, inventory.len()),
        };
        fs::write(output_dir.join(mode.page()), markup.into_string())?;
        tracing::info!(page = mode.page(), items, "generated page");
        pages.push(PageReport {
            mode,
            file: mode.page().to_string(),
            items,
        });
    }

    Ok(GenerateReport { pages, stylesheet })
}

/// Plan plus an id index into the inventory.
struct Site<'a> {
    plan: &'a Plan,
    config: &'a SiteConfig,
    items: HashMap<&'a str, &'a ArtItem>,
}

impl<'a> Site<'a> {
    fn new(plan: &'a Plan, inventory: &'a Inventory) -> Self {
        Self {
            plan,
            config: &plan.config,
            items: inventory
                .items()
                .iter()
                .map(|i| (i.id.as_str(), i))
                .collect(),
        }
    }

    fn resolve(&self, ids: &[String]) -> Result<Vec<&'a ArtItem>, GenerateError> {
        ids.iter()
            .map(|id| {
                self.items
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| GenerateError::UnknownItem(id.clone()))
            })
            .collect()
    }
}

/// Base styles plus config-derived custom properties and breakpoint rules.
fn build_css(config: &SiteConfig) -> String {
    let env = StaticEnvironment::from(&config.viewport);
    let durations = Durations::for_env(&env);
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        motion::generate_motion_css(&durations),
        breakpoint_css(config.layout.mobile_breakpoint),
        CSS_STATIC
    )
}

/// Rules that depend on the configured mobile breakpoint.
fn breakpoint_css(breakpoint: u32) -> String {
    let below = breakpoint.saturating_sub(1);
    format!(
        r#"@media (max-width: {below}px) {{
    .grid-desktop {{ display: none; }}
    .reel-card.rotatable img, .deck-card.rotatable img {{
        transform: rotate(90deg) scale(var(--rotate-scale, 1.3));
    }}
    .deck-arrow {{ display: none; }}
}}
@media (min-width: {breakpoint}px) {{
    .grid-mobile {{ display: none; }}
}}"#
    )
}

/// `style-<first 8 hex digits of sha256>.css`
fn stylesheet_name(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("style-{}.css", &digest[..8])
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(mode: ViewMode, stylesheet: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "artwall · " (mode.label()) }
                link rel="stylesheet" href=(stylesheet);
            }
            body data-mode=(mode.label().to_lowercase()) {
                (content)
                (mode_nav(mode))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the mode navigation strip, marking the current mode
pub fn mode_nav(current: ViewMode) -> Markup {
    html! {
        nav.mode-nav aria-label="Viewing mode" {
            @for mode in ViewMode::ALL {
                @let is_current = mode == current;
                a.mode-link.current[is_current]
                    href=(mode.page())
                    aria-label=(mode.label())
                    aria-current=[is_current.then_some("page")] {
                    span.mode-icon aria-hidden="true" { (mode.icon()) }
                    span.mode-label { (mode.label()) }
                }
            }
        }
    }
}

/// Coloured block shown under an image until it loads
fn placeholder(color: &str, opacity: f64) -> Markup {
    html! {
        div.placeholder style={ "background-color: " (color) "; opacity: " (opacity) ";" } {}
    }
}

/// Placeholder tinted by the item's accent colour
fn accent_placeholder(item: &ArtItem) -> Markup {
    placeholder(placeholder_color(&item.meta.accent_color), PLACEHOLDER_OPACITY)
}

/// An `<img>` with srcset, sizes and the loading attributes of `policy`.
///
/// Lazy images carry their sources in `data-src`/`data-srcset`; the script
/// swaps them in once the image comes within `data-margin` pixels.
fn art_image(
    item: &ArtItem,
    tiers: &[Tier],
    sizes: &str,
    src: Tier,
    policy: LoadPolicy,
) -> Markup {
    let margin = match policy {
        LoadPolicy::Lazy { margin_px } => Some(margin_px),
        LoadPolicy::Eager => None,
    };
    let eager = margin.is_none();
    let set = srcset(&item.urls, tiers);
    let url = item.urls.get(src);
    html! {
        img srcset=[eager.then_some(&set)]
            data-srcset=[(!eager).then_some(&set)]
            sizes=(sizes)
            src=[eager.then_some(url)]
            data-src=[(!eager).then_some(url)]
            alt=(item.category)
            loading=(policy.loading_attr())
            fetchpriority=[policy.fetch_priority()]
            decoding="async"
            draggable="false"
            data-id=(item.id)
            data-margin=[margin];
    }
}

fn detail_anchor(item: &ArtItem) -> String {
    format!("#detail-{}", item.id)
}

/// One `:target` overlay per item, showing the original
fn detail_overlays(items: &[&ArtItem], site: &Site<'_>) -> Markup {
    let overlay = &site.config.overlay;
    html! {
        @for item in items {
            div.detail id={ "detail-" (item.id) }
                data-close-distance=(overlay.close_distance)
                data-release-distance=(overlay.release_distance)
                data-release-velocity=(overlay.release_velocity)
                data-min-scale=(overlay.min_scale)
                data-max-scale=(overlay.max_scale)
                data-pan-scale=(overlay.pan_scale)
                data-rubber-band=(RUBBER_BAND)
                data-resistance-x=(DRAG_RESISTANCE_X)
                data-resistance-y=(DRAG_RESISTANCE_Y) {
                a.detail-backdrop href="#" aria-label="Close" {}
                figure.detail-frame {
                    (accent_placeholder(item))
                    img src=(item.urls.get(Tier::Original))
                        alt=(item.category)
                        loading="lazy"
                        decoding="async"
                        draggable="false"
                        data-id=(item.id);
                }
            }
        }
    }
}

/// Startup overlay that waits for the timer and the first preloads
fn loading_gate(site: &Site<'_>) -> Result<Markup, GenerateError> {
    let preload = site.resolve(&site.plan.preload)?;
    let urls: Vec<&str> = preload.iter().map(|i| i.urls.get(PRELOAD_TIER)).collect();
    Ok(html! {
        div id="loading-gate"
            data-min-display-ms=(site.config.loading.min_display_ms)
            data-preload=(urls.join(" ")) {
            div.loading-disk {}
        }
    })
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_reel(
    site: &Site<'_>,
    order: &[&ArtItem],
    stylesheet: &str,
) -> Result<Markup, GenerateError> {
    let config = site.config;
    let cards = reel_cards(order, config.images.reel_priority, &config.modes);
    let content = html! {
        (loading_gate(site)?)
        main.reel {
            @for card in &cards {
                @let policy = LoadPolicy::for_priority(card.priority, config.images.lazy_margin_px);
                figure.reel-card.rotatable[card.rotatable] style={ "--delay: " (card.delay) "s;" } {
                    (placeholder(card.placeholder(), REEL_PLACEHOLDER_OPACITY))
                    (art_image(card.item, &CARD_LADDER, REEL_SIZES, Tier::W1450, policy))
                    div.reel-glow style={ "background-color: " (card.placeholder()) ";" } {}
                }
            }
        }
    };
    Ok(base_document(ViewMode::Reel, stylesheet, content))
}

/// Render one viewport class of the grid.
///
/// Both classes share the page and the stylesheet hides one of them, so only
/// the reference class (`eager`) loads its priority rows eagerly. The other
/// class stays lazy and never fetches while hidden.
fn render_grid_rows<'a>(
    site: &Site<'a>,
    rows: &[RowPlan],
    class_name: &str,
    eager: bool,
) -> Result<(Markup, Vec<&'a ArtItem>), GenerateError> {
    let config = site.config;
    let mut shown = Vec::new();
    let mut rendered = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        let items = site.resolve(&row.items)?;
        let ratios: Vec<f64> = items.iter().map(|i| i.ratio()).collect();
        let priority = row_index < config.layout.priority_rows;
        let policy = LoadPolicy::for_priority(priority && eager, config.images.lazy_margin_px);
        let cells = items.iter().zip(width_percents(&ratios)).enumerate();
        let markup = html! {
            div class={ "row row-" (row.kind.as_str()) } {
                @for (index, (item, percent)) in cells {
                    @let delay = if priority { stagger_delay(index, true) } else { 0.0 };
                    @let tier = site.plan.fallback_tier;
                    a.cell href=(detail_anchor(item))
                        style={
                            "width: " (format!("{percent:.4}")) "%; "
                            "--ratio: " (item.ratio()) "; "
                            "--delay: " (delay) "s;"
                        } {
                        (accent_placeholder(item))
                        (art_image(item, &FULL_LADDER, sizes_hint(row.kind), tier, policy))
                    }
                }
            }
        };
        rendered.push(markup);
        shown.extend(items);
    }
    Ok((
        html! {
            div class={ "grid " (class_name) } {
                @for row in &rendered { (row) }
            }
        },
        shown,
    ))
}

fn render_grid(site: &Site<'_>, stylesheet: &str) -> Result<Markup, GenerateError> {
    let mobile_reference = site.plan.reference.mobile;
    let grid = &site.plan.grid;
    let (desktop, shown) =
        render_grid_rows(site, &grid.desktop, "grid-desktop", !mobile_reference)?;
    let (mobile, _) = render_grid_rows(site, &grid.mobile, "grid-mobile", mobile_reference)?;
    let content = html! {
        main.grid-page {
            (desktop)
            (mobile)
        }
        (detail_overlays(&shown, site))
    };
    Ok(base_document(ViewMode::Grid, stylesheet, content))
}

fn render_deck(site: &Site<'_>, order: &[&ArtItem], stylesheet: &str) -> Markup {
    let deck_config = &site.config.deck;
    let deck = DeckCycler::new(order.to_vec(), deck_config);
    let visible = deck.visible();
    let first_visible = deck.len() - visible.len();
    let backdrop = deck.backdrop_color().unwrap_or("#fff");
    let styles: Vec<Option<String>> = (0..deck.len())
        .map(|index| {
            index
                .checked_sub(first_visible)
                .and_then(|slot| visible.get(slot))
                .map(|(_, s)| {
                    format!(
                        "transform: translateY({}px) scale({}); opacity: {}; z-index: {};",
                        s.offset_y, s.scale, s.opacity, index
                    )
                })
        })
        .collect();

    let content = html! {
        main.deck
            data-visible=(deck_config.visible)
            data-threshold=(deck_config.swipe_threshold)
            data-scale-step=(SCALE_STEP)
            data-lift-step=(LIFT_STEP)
            data-fade-step=(FADE_STEP) {
            div.deck-backdrop style={ "background-color: " (backdrop) ";" } {}
            div.deck-stack {
                @for (card, style) in deck.cards().zip(&styles) {
                    div.deck-card.hidden[style.is_none()]
                        .rotatable[site.config.modes.rotates(&card.category)]
                        data-accent=(card.meta.accent_color)
                        style=[style.as_deref()] {
                        (art_image(card, &CARD_LADDER, DECK_SIZES, Tier::W1450, LoadPolicy::Eager))
                    }
                }
            }
            button.deck-arrow.deck-prev aria-label="Previous card" { "‹" }
            button.deck-arrow.deck-next aria-label="Next card" { "›" }
        }
    };
    base_document(ViewMode::Deck, stylesheet, content)
}

fn render_playground(site: &Site<'_>, order: &[&ArtItem], stylesheet: &str) -> Markup {
    let playground = Playground::new(order, site.plan.reference.screen_ratio);
    let margin = site.config.images.lazy_margin_px;
    let content = html! {
        main.playground
            data-swipe-power=(SWIPE_POWER)
            style={ "background-color: " (playground.background()) ";" } {
            div.playground-glass {}
            @for (index, item) in playground.items().iter().enumerate() {
                @let policy = LoadPolicy::for_priority(index == 0, margin);
                div.slide.active[index == playground.index()]
                    .rotatable[site.config.modes.rotates(&item.category)]
                    data-palette=(item.meta.palette.join(" "))
                    data-accent=(item.meta.accent_color) {
                    (art_image(item, &SLIDE_LADDER, SLIDE_SIZES, Tier::W1450, policy))
                }
            }
        }
    };
    base_document(ViewMode::Playground, stylesheet, content)
}

fn render_overview(site: &Site<'_>, stylesheet: &str) -> Result<Markup, GenerateError> {
    let mut shown = Vec::new();
    let mut rows = Vec::new();
    let lazy = LoadPolicy::Lazy {
        margin_px: site.config.images.lazy_margin_px,
    };
    for row in &site.plan.overview.rows {
        let items = site.resolve(row)?;
        rows.push(html! {
            div.mosaic-row {
                @for item in &items {
                    a.mosaic-cell href=(detail_anchor(item)) style={ "flex: " (item.ratio()) ";" } {
                        (accent_placeholder(item))
                        (art_image(item, &MOSAIC_LADDER, MOSAIC_SIZES, Tier::W580, lazy))
                    }
                }
            }
        });
        shown.extend(items);
    }
    let content = html! {
        main.mosaic {
            @for row in &rows { (row) }
        }
        (detail_overlays(&shown, site))
    };
    Ok(base_document(ViewMode::Overview, stylesheet, content))
}

// ============================================================================
// Tests
// ============================================================================
