//! Shared types used across planning, rendering and the runtime state machines.
//!
//! [`ArtItem`] is deserialized straight from `inventory.json` and is never
//! mutated afterwards. Every view holds `&ArtItem` references into the one
//! loaded inventory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One artwork in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtItem {
    /// Unique identifier, also used in element ids and overlay anchors.
    pub id: String,
    /// Series the work belongs to (e.g. `"Enveloppe"`).
    pub category: String,
    /// Path segment the asset host uses for this item.
    pub path_id: String,
    pub urls: ArtUrls,
    pub meta: ArtMeta,
}

impl ArtItem {
    /// Width / height.
    pub fn ratio(&self) -> f64 {
        self.meta.ratio
    }

    pub fn is_portrait(&self) -> bool {
        self.meta.orientation == Orientation::Portrait
    }
}

/// The four pre-rendered resolutions of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtUrls {
    pub originals: String,
    #[serde(rename = "1450")]
    pub w1450: String,
    #[serde(rename = "580")]
    pub w580: String,
    #[serde(rename = "290")]
    pub w290: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtMeta {
    pub ratio: f64,
    pub orientation: Orientation,
    #[serde(default)]
    pub palette: Vec<String>,
    pub accent_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

/// The five viewing modes, in navigation-strip order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Reel,
    Grid,
    Deck,
    Playground,
    Overview,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Reel,
        ViewMode::Grid,
        ViewMode::Deck,
        ViewMode::Playground,
        ViewMode::Overview,
    ];

    /// Accessible label shown on the navigation strip.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Reel => "Reel",
            ViewMode::Grid => "Grid",
            ViewMode::Deck => "Deck",
            ViewMode::Playground => "Canvas",
            ViewMode::Overview => "Overview",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ViewMode::Reel => "\u{1f39e}\u{fe0f}",
            ViewMode::Grid => "\u{1f371}",
            ViewMode::Deck => "\u{1f0cf}",
            ViewMode::Playground => "\u{1f3a8}",
            ViewMode::Overview => "\u{1f4a0}",
        }
    }

    /// Output page for the mode. The default mode owns `index.html`.
    pub fn page(self) -> &'static str {
        match self {
            ViewMode::Reel => "index.html",
            ViewMode::Grid => "grid.html",
            ViewMode::Deck => "deck.html",
            ViewMode::Playground => "playground.html",
            ViewMode::Overview => "overview.html",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
