//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to `inventory.json` in the content directory and is entirely optional: stock
//! defaults are overridden key by key by whatever the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! hero_ratio = 1.8          # Wider than this: always a full-width row
//! portrait_ratio = 1.0      # Narrower than this: never alone on desktop
//! companion_ratio = 1.5     # Neighbours narrower than this may share a row
//! triplet_chance = 0.7      # Desktop chance of a three-item row
//! mobile_pair_chance = 0.6  # Mobile chance of a two-item row
//! mobile_breakpoint = 768   # Viewports narrower than this are "mobile"
//! priority_rows = 2         # Grid rows fetched eagerly
//!
//! [images]
//! high_dpr = 1.5            # Pixel ratio above which the larger tier is used
//! lazy_margin_px = 200      # Lazy images start loading this close to the viewport
//! reel_priority = 3         # Reel items fetched eagerly
//!
//! [loading]
//! min_display_ms = 2500     # Loading screen minimum display time
//! preload_count = 6         # Images preloaded before the loading screen dismisses
//!
//! [deck]
//! visible = 4               # Cards shown in the stack
//! swipe_threshold = 100     # Horizontal drag (px) that cycles the deck
//!
//! [overlay]
//! close_distance = 200      # Drag distance (px) that closes mid-gesture
//! release_distance = 100    # Drag distance (px) that closes on release
//! release_velocity = 0.5    # Release velocity (px/ms) that closes regardless of distance
//! min_scale = 0.5
//! max_scale = 4.0
//! pan_scale = 1.1           # Above this zoom, drags pan instead of closing
//!
//! [modes]
//! rotate_categories = ["Enveloppe"]  # Rotated 90° on mobile
//!
//! [viewport]                # Reference environment used at build time
//! width = 1440
//! height = 900
//! dpr = 1.0
//! reduced_motion = false
//!
//! [colors]
//! background = "#f5f5f7"
//! text = "#111111"
//! text_muted = "#6b7280"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Row planner thresholds and chances.
    pub layout: LayoutConfig,
    /// Resolution tier selection and lazy loading.
    pub images: ImagesConfig,
    /// Loading screen gate.
    pub loading: LoadingConfig,
    /// Deck stack presentation.
    pub deck: DeckConfig,
    /// Detail overlay gesture thresholds.
    pub overlay: OverlayConfig,
    /// Per-mode presentation tweaks.
    pub modes: ModesConfig,
    /// Reference environment for build-time decisions.
    pub viewport: ViewportConfig,
    /// Page colors.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        for (name, chance) in [
            ("layout.triplet_chance", layout.triplet_chance),
            ("layout.mobile_pair_chance", layout.mobile_pair_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Validation(format!("{name} must be 0-1")));
            }
        }
        for (name, ratio) in [
            ("layout.hero_ratio", layout.hero_ratio),
            ("layout.portrait_ratio", layout.portrait_ratio),
            ("layout.companion_ratio", layout.companion_ratio),
        ] {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(ConfigError::Validation(format!("{name} must be positive")));
            }
        }
        if layout.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "layout.mobile_breakpoint must be non-zero".into(),
            ));
        }
        if self.deck.visible == 0 {
            return Err(ConfigError::Validation(
                "deck.visible must be at least 1".into(),
            ));
        }
        if !(self.overlay.min_scale > 0.0 && self.overlay.min_scale < self.overlay.max_scale) {
            return Err(ConfigError::Validation(
                "overlay.min_scale must be positive and below overlay.max_scale".into(),
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Validation(
                "viewport.width and viewport.height must be non-zero".into(),
            ));
        }
        if !(self.viewport.dpr.is_finite() && self.viewport.dpr > 0.0) {
            return Err(ConfigError::Validation(
                "viewport.dpr must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Row planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub hero_ratio: f64,
    pub portrait_ratio: f64,
    pub companion_ratio: f64,
    pub triplet_chance: f64,
    pub mobile_pair_chance: f64,
    pub mobile_breakpoint: u32,
    pub priority_rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hero_ratio: 1.8,
            portrait_ratio: 1.0,
            companion_ratio: 1.5,
            triplet_chance: 0.7,
            mobile_pair_chance: 0.6,
            mobile_breakpoint: 768,
            priority_rows: 2,
        }
    }
}

/// Resolution tier and lazy loading settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub high_dpr: f64,
    pub lazy_margin_px: u32,
    pub reel_priority: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            high_dpr: 1.5,
            lazy_margin_px: 200,
            reel_priority: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingConfig {
    pub min_display_ms: u64,
    pub preload_count: usize,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_display_ms: 2500,
            preload_count: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    pub visible: usize,
    pub swipe_threshold: f64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            visible: 4,
            swipe_threshold: 100.0,
        }
    }
}

/// Detail overlay gesture thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Downward drag (CSS px) that closes mid-gesture.
    pub close_distance: f64,
    /// Downward drag (CSS px) that closes on release.
    pub release_distance: f64,
    /// Downward release velocity in px/ms that closes regardless of distance.
    pub release_velocity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub pan_scale: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_distance: 200.0,
            release_distance: 100.0,
            release_velocity: 0.5,
            min_scale: 0.5,
            max_scale: 4.0,
            pan_scale: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModesConfig {
    /// Categories whose works are shown rotated by 90° on mobile viewports.
    pub rotate_categories: Vec<String>,
}

impl ModesConfig {
    pub fn rotates(&self, category: &str) -> bool {
        self.rotate_categories.iter().any(|c| c == category)
    }
}

impl Default for ModesConfig {
    fn default() -> Self {
        Self {
            rotate_categories: vec!["Enveloppe".to_string()],
        }
    }
}

/// The environment assumed when the site is generated.
///
/// Decisions that need a concrete viewport at build time (overview row count,
/// fallback `src` tier) use these values; the browser refines the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub dpr: f64,
    pub reduced_motion: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
            dpr: 1.0,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Used for the navigation strip and inactive controls.
    pub text_muted: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f5f5f7".to_string(),
            text: "#111111".to_string(),
            text_muted: "#6b7280".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` when the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given content directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), "config resolved");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# artwall configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are an error.

# ---------------------------------------------------------------------------
# Grid row planner
# ---------------------------------------------------------------------------
[layout]
# Works wider than this always get a full-width row of their own.
hero_ratio = 1.8
# On desktop, works narrower than this are always paired with their neighbour.
portrait_ratio = 1.0
# Neighbours narrower than this are candidates to share a row.
companion_ratio = 1.5
# Desktop: chance of forming a three-work row when both neighbours qualify.
triplet_chance = 0.7
# Mobile: chance of pairing with a qualifying neighbour.
mobile_pair_chance = 0.6
# Viewports narrower than this (CSS px) use the mobile plan.
mobile_breakpoint = 768
# Leading grid rows fetched eagerly with high priority.
priority_rows = 2

# ---------------------------------------------------------------------------
# Responsive images
# ---------------------------------------------------------------------------
[images]
# Device pixel ratios above this pick the next larger resolution tier.
high_dpr = 1.5
# Lazy images start loading when they come this close (CSS px) to the viewport.
lazy_margin_px = 200
# Leading reel works fetched eagerly.
reel_priority = 3

# ---------------------------------------------------------------------------
# Loading screen
# ---------------------------------------------------------------------------
[loading]
# The loading screen stays up at least this long (milliseconds).
min_display_ms = 2500
# ...and until this many leading images have loaded or failed.
preload_count = 6

# ---------------------------------------------------------------------------
# Deck
# ---------------------------------------------------------------------------
[deck]
visible = 4
# Horizontal drag distance (CSS px) that sends the top card to the back.
swipe_threshold = 100

# ---------------------------------------------------------------------------
# Detail overlay
# ---------------------------------------------------------------------------
[overlay]
# Downward drag (CSS px) that closes the overlay while dragging.
close_distance = 200
# Downward drag (CSS px) that closes the overlay on release.
release_distance = 100
# Downward release velocity in px/ms that closes regardless of distance.
release_velocity = 0.5
min_scale = 0.5
max_scale = 4.0
pan_scale = 1.1

# ---------------------------------------------------------------------------
# Modes
# ---------------------------------------------------------------------------
[modes]
# Works in these categories are shown rotated by 90 degrees on mobile.
rotate_categories = ["Enveloppe"]

# ---------------------------------------------------------------------------
# Reference viewport used for build-time decisions
# ---------------------------------------------------------------------------
[viewport]
width = 1440
height = 900
dpr = 1.0
reduced_motion = false

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#f5f5f7"
text = "#111111"
text_muted = "#6b7280"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {bg};
    --color-text: {text};
    --color-text-muted: {muted};
}}"#,
        bg = colors.background,
        text = colors.text,
        muted = colors.text_muted,
    )
}
