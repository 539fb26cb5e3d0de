//! Detail overlay gesture state machine.
//!
//! Shows one work full-screen. Vertical drags dismiss it, pinches zoom it and
//! drags on a zoomed image pan instead of dismissing. The machine only sees
//! gesture summaries (movement, velocity, accumulated pinch distance); the
//! host's gesture recogniser produces those.
//!
//! ```text
//!            open(item)
//! Closed ───────────────▶ OpenIdle ◀──────────────┐
//!   ▲                      │    │                 │ release (short/slow)
//!   │ close / backdrop     │    └── drag ──▶ Dragging
//!   │ long or fast drag    └── pinch ──▶ Zooming ─┘ release
//! ```

use crate::config::OverlayConfig;
use crate::types::ArtItem;

/// Fraction of the overshoot applied past a scale bound while pinching.
pub const RUBBER_BAND: f64 = 0.15;
/// Vertical drag resistance while dismissing.
pub const DRAG_RESISTANCE_Y: f64 = 0.8;
/// Horizontal drag resistance while dismissing.
pub const DRAG_RESISTANCE_X: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    OpenIdle,
    Dragging,
    Zooming,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
pub struct DetailOverlay<'a> {
    item: Option<&'a ArtItem>,
    state: OverlayState,
    transform: Transform,
    loaded: bool,
    rules: OverlayConfig,
}

impl<'a> DetailOverlay<'a> {
    pub fn new(rules: OverlayConfig) -> Self {
        Self {
            item: None,
            state: OverlayState::Closed,
            transform: Transform::IDENTITY,
            loaded: false,
            rules,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn item(&self) -> Option<&'a ArtItem> {
        self.item
    }

    pub fn is_open(&self) -> bool {
        self.state != OverlayState::Closed
    }

    /// Whether the full-resolution image has loaded for the current item.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Show `item`. Switching items resets the transform and the loaded flag.
    pub fn open(&mut self, item: &'a ArtItem) {
        self.item = Some(item);
        self.state = OverlayState::OpenIdle;
        self.transform = Transform::IDENTITY;
        self.loaded = false;
        tracing::debug!(id = %item.id, "overlay opened");
    }

    pub fn close(&mut self) {
        if self.state == OverlayState::Closed {
            return;
        }
        if let Some(item) = self.item {
            tracing::debug!(id = %item.id, "overlay closed");
        }
        self.item = None;
        self.state = OverlayState::Closed;
        self.transform = Transform::IDENTITY;
        self.loaded = false;
    }

    /// A tap outside the image.
    pub fn tap_backdrop(&mut self) {
        self.close();
    }

    pub fn on_image_load(&mut self) {
        if self.is_open() {
            self.loaded = true;
        }
    }

    fn zoomed(&self) -> bool {
        self.transform.scale > self.rules.pan_scale
    }

    /// An in-progress drag with total movement `(mx, my)`.
    pub fn drag(&mut self, mx: f64, my: f64) {
        if !self.is_open() {
            return;
        }
        self.state = OverlayState::Dragging;
        if self.zoomed() {
            self.transform.x = mx;
            self.transform.y = my;
            return;
        }
        self.transform.x = mx * DRAG_RESISTANCE_X;
        self.transform.y = my * DRAG_RESISTANCE_Y;
        if my > self.rules.close_distance {
            self.close();
        }
    }

    /// Drag released after total movement `(mx, my)` with vertical velocity
    /// `vy` in px/ms.
    pub fn release_drag(&mut self, mx: f64, my: f64, vy: f64) {
        if !self.is_open() {
            return;
        }
        if self.zoomed() {
            self.transform.x = mx;
            self.transform.y = my;
            self.state = OverlayState::OpenIdle;
            return;
        }
        if my > self.rules.release_distance || vy > self.rules.release_velocity {
            self.close();
        } else {
            self.transform.x = 0.0;
            self.transform.y = 0.0;
            self.state = OverlayState::OpenIdle;
        }
    }

    /// An in-progress pinch whose accumulated scale factor is `distance`.
    pub fn pinch(&mut self, distance: f64) {
        if !self.is_open() {
            return;
        }
        self.state = OverlayState::Zooming;
        self.transform.scale = rubber_band(distance, self.rules.min_scale, self.rules.max_scale);
    }

    /// Pinch released: anything below 1 snaps back to 1, larger zooms stay
    /// within bounds.
    pub fn release_pinch(&mut self) {
        if !self.is_open() {
            return;
        }
        let scale = self.transform.scale;
        self.transform.scale = if scale < 1.0 {
            1.0
        } else {
            scale.min(self.rules.max_scale)
        };
        self.state = OverlayState::OpenIdle;
    }
}

impl Default for DetailOverlay<'_> {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

/// Elastic clamp: values past a bound move at [`RUBBER_BAND`] of their overshoot.
pub fn rubber_band(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        max + (value - max) * RUBBER_BAND
    } else if value < min {
        min - (min - value) * RUBBER_BAND
    } else {
        value
    }
}
