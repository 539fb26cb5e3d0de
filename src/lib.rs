//! # Artwall
//!
//! A static gallery generator that presents one art inventory across five
//! viewing modes: a horizontal reel, a masonry grid, a card deck, a
//! single-work canvas and a one-screen overview.
//!
//! # Architecture: Staged Pipeline
//!
//! ```text
//! 1. Load      content/inventory.json + config.toml  →  Inventory, SiteConfig
//! 2. Plan      inventory + reference viewport         →  plan.json
//! 3. Generate  plan.json + inventory                  →  dist/
//! ```
//!
//! Every random and viewport-dependent decision is made in the plan stage and
//! recorded by item id, so `plan.json` is human-readable and a `--seed`
//! reproduces a session exactly. The generator is a pure function of the plan.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`inventory`] | Loads and validates `inventory.json`; the Fisher–Yates shuffle |
//! | [`layout`] | Masonry row planner and overview mosaic partitioner |
//! | [`responsive`] | Resolution tiers, `srcset`/`sizes`, eager and lazy loading |
//! | [`modes`] | One view model per viewing mode, and the mode selector |
//! | [`overlay`] | Detail overlay gesture state machine |
//! | [`loading`] | Placeholder colours, load tracking and the startup gate |
//! | [`motion`] | Duration, easing and spring presets |
//! | [`plan`] | Stage 2: the session plan |
//! | [`generate`] | Stage 3: renders the pages with Maud |
//! | [`config`] | `config.toml` loading, validation, merging and CSS generation |
//! | [`environment`] | Viewport and device signals behind a trait |
//! | [`random`] | Injectable randomness |
//! | [`output`] | CLI output formatting |
//!
//! # Runtime State Machines
//!
//! The deck cycler, the canvas pager, the detail overlay and the loading gate
//! are plain library types driven by method calls. The embedded
//! `static/gallery.js` applies the same rules in the browser, with the
//! thresholds written into `data-*` attributes from the config.

pub mod config;
pub mod environment;
pub mod generate;
pub mod inventory;
pub mod layout;
pub mod loading;
pub mod modes;
pub mod motion;
pub mod output;
pub mod overlay;
pub mod plan;
pub mod random;
pub mod responsive;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
