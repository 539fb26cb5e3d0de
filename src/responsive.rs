//! Responsive image tier selection and lazy loading.
//!
//! Every work is hosted at four fixed resolutions. The page hands the browser
//! a `srcset` candidate list so it can pick the final bytes itself, and also an
//! explicit `src` chosen here from viewport width and pixel ratio, which is
//! what non-`srcset` paths and preloads fetch.
//!
//! | Viewport | DPR ≤ 1.5 | DPR > 1.5 |
//! |---|---|---|
//! | < 768 px | 580 | 1450 |
//! | ≥ 768 px | 1450 | originals |

use crate::environment::{Environment, MOBILE_BREAKPOINT};
use crate::layout::RowKind;
use crate::types::ArtUrls;
use serde::{Deserialize, Serialize};

/// Pixel ratio above which the larger tier is chosen.
pub const HIGH_DPR: f64 = 1.5;

/// Default distance from the viewport at which lazy images start loading.
pub const LAZY_MARGIN_PX: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "290")]
    W290,
    #[serde(rename = "580")]
    W580,
    #[serde(rename = "1450")]
    W1450,
    #[serde(rename = "originals")]
    Original,
}

impl Tier {
    /// Intrinsic width advertised in `srcset`. Originals are declared as 2000w.
    pub fn width(self) -> u32 {
        match self {
            Tier::W290 => 290,
            Tier::W580 => 580,
            Tier::W1450 => 1450,
            Tier::Original => 2000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::W290 => "290",
            Tier::W580 => "580",
            Tier::W1450 => "1450",
            Tier::Original => "originals",
        }
    }
}

/// All four tiers, smallest first.
pub const FULL_LADDER: [Tier; 4] = [Tier::W290, Tier::W580, Tier::W1450, Tier::Original];
/// Reel and deck cards never need thumbnails or originals.
pub const CARD_LADDER: [Tier; 2] = [Tier::W580, Tier::W1450];
/// The overview shows dozens of works at once; originals would be wasteful.
pub const MOSAIC_LADDER: [Tier; 2] = [Tier::W290, Tier::W580];
/// Playground slides fill the screen.
pub const SLIDE_LADDER: [Tier; 3] = [Tier::W580, Tier::W1450, Tier::Original];

impl ArtUrls {
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::W290 => &self.w290,
            Tier::W580 => &self.w580,
            Tier::W1450 => &self.w1450,
            Tier::Original => &self.originals,
        }
    }
}

/// Explicit tier for a viewport width and device pixel ratio.
pub fn select_tier(width: u32, dpr: f64) -> Tier {
    select_tier_with(width, dpr, MOBILE_BREAKPOINT, HIGH_DPR)
}

/// [`select_tier`] with configurable breakpoint and pixel-ratio threshold.
pub fn select_tier_with(width: u32, dpr: f64, breakpoint: u32, high_dpr: f64) -> Tier {
    let dense = dpr > high_dpr;
    match (width < breakpoint, dense) {
        (true, true) => Tier::W1450,
        (true, false) => Tier::W580,
        (false, true) => Tier::Original,
        (false, false) => Tier::W1450,
    }
}

pub fn select_for(env: &impl Environment) -> Tier {
    select_tier(env.viewport_width(), env.device_pixel_ratio())
}

/// Render a `srcset` attribute from the given tiers.
pub fn srcset(urls: &ArtUrls, tiers: &[Tier]) -> String {
    tiers
        .iter()
        .map(|&t| format!("{} {}w", urls.get(t), t.width()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `sizes` attribute for an image in a grid row of the given kind.
pub fn sizes_hint(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Hero => "(max-width: 768px) 100vw, 90vw",
        RowKind::Pair => "(max-width: 768px) 50vw, 45vw",
        RowKind::Triplet => "(max-width: 768px) 50vw, 30vw",
    }
}

/// How an image is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "policy")]
pub enum LoadPolicy {
    /// Fetched on mount with high priority, no observation.
    Eager,
    /// Deferred until within `margin_px` of the viewport.
    Lazy { margin_px: u32 },
}

impl LoadPolicy {
    pub fn for_priority(priority: bool, margin_px: u32) -> Self {
        if priority {
            LoadPolicy::Eager
        } else {
            LoadPolicy::Lazy { margin_px }
        }
    }

    /// Value of the HTML `loading` attribute.
    pub fn loading_attr(self) -> &'static str {
        match self {
            LoadPolicy::Eager => "eager",
            LoadPolicy::Lazy { .. } => "lazy",
        }
    }

    /// Value of the HTML `fetchpriority` attribute, if any.
    pub fn fetch_priority(self) -> Option<&'static str> {
        match self {
            LoadPolicy::Eager => Some("high"),
            LoadPolicy::Lazy { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyState {
    /// An observer is attached; nothing fetched yet.
    Observing,
    /// The fetch has been issued and the observer disconnected.
    Loading,
}

/// Visibility-driven loader for a single image.
///
/// Priority images start in [`LazyState::Loading`] and never observe. Others
/// wait for a visibility signal within the margin, start exactly one fetch and
/// ignore every later signal.
#[derive(Debug, Clone)]
pub struct LazyLoader {
    policy: LoadPolicy,
    state: LazyState,
}

impl LazyLoader {
    pub fn new(policy: LoadPolicy) -> Self {
        let state = match policy {
            LoadPolicy::Eager => LazyState::Loading,
            LoadPolicy::Lazy { .. } => LazyState::Observing,
        };
        Self { policy, state }
    }

    pub fn state(&self) -> LazyState {
        self.state
    }

    pub fn is_observing(&self) -> bool {
        self.state == LazyState::Observing
    }

    /// Feed a visibility signal: `distance_px` from the element to the
    /// viewport edge, `0` or negative when intersecting.
    ///
    /// Returns `true` exactly once, when the fetch should start.
    pub fn observe(&mut self, distance_px: f64) -> bool {
        match (self.state, self.policy) {
            (LazyState::Observing, LoadPolicy::Lazy { margin_px })
                if distance_px <= margin_px as f64 =>
            {
                self.state = LazyState::Loading;
                true
            }
            _ => false,
        }
    }
}
