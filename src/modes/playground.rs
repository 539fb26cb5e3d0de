//! Playground ("Canvas"): one work at a time on a tinted backdrop.
//!
//! Works whose orientation matches the screen come first. A swipe pages
//! through them with wrap-around; a tap cycles the backdrop through the
//! current work's palette.

use crate::config::ModesConfig;
use crate::types::{ArtItem, Orientation};

/// Minimum `|offset| * velocity` for a release to count as a swipe.
pub const SWIPE_POWER: f64 = 10_000.0;

/// Backdrop used when a work has neither palette nor accent colour.
pub const FALLBACK_BACKGROUND: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

/// Stable sort putting works that match the screen's orientation first.
///
/// Landscape screens (`screen_ratio > 1`) prefer landscape works, everything
/// else prefers portrait ones. Square works never match.
pub fn orientation_first<'a>(items: &[&'a ArtItem], screen_ratio: f64) -> Vec<&'a ArtItem> {
    let preferred = if screen_ratio > 1.0 {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| item.meta.orientation != preferred);
    sorted
}

#[derive(Debug, Clone)]
pub struct Playground<'a> {
    items: Vec<&'a ArtItem>,
    index: usize,
    direction: Direction,
    background: usize,
    mobile: bool,
}

impl<'a> Playground<'a> {
    /// Build from the full inventory for a screen of the given ratio.
    pub fn new(items: &[&'a ArtItem], screen_ratio: f64) -> Self {
        Self {
            items: orientation_first(items, screen_ratio),
            index: 0,
            direction: Direction::None,
            background: 0,
            mobile: screen_ratio < 1.0,
        }
    }

    pub fn items(&self) -> &[&'a ArtItem] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current(&self) -> Option<&'a ArtItem> {
        self.items.get(self.index).copied()
    }

    pub fn next(&mut self) {
        self.paginate(Direction::Forward);
    }

    pub fn prev(&mut self) {
        self.paginate(Direction::Backward);
    }

    fn paginate(&mut self, direction: Direction) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.direction = direction;
        self.index = match direction {
            Direction::Forward => (self.index + 1) % len,
            Direction::Backward => (self.index + len - 1) % len,
            Direction::None => self.index,
        };
    }

    /// Horizontal drag release. A strong leftward fling pages forward, a
    /// strong rightward one pages back, anything weaker stays put. Offset is
    /// in CSS px and velocity in px/s.
    pub fn swipe(&mut self, offset_x: f64, velocity_x: f64) -> Direction {
        let power = offset_x.abs() * velocity_x;
        let direction = if power < -SWIPE_POWER {
            Direction::Forward
        } else if power > SWIPE_POWER {
            Direction::Backward
        } else {
            Direction::None
        };
        self.paginate(direction);
        tracing::debug!(power, ?direction, index = self.index, "playground swipe");
        direction
    }

    /// Cycle the backdrop to the next palette colour of the current work.
    pub fn tap(&mut self) {
        let len = self
            .current()
            .map(|c| c.meta.palette.len())
            .unwrap_or(0)
            .max(1);
        self.background = (self.background + 1) % len;
    }

    /// Current backdrop: palette entry, else accent colour, else white.
    pub fn background(&self) -> &'a str {
        let Some(item) = self.current() else {
            return FALLBACK_BACKGROUND;
        };
        let palette = &item.meta.palette;
        if !palette.is_empty() {
            let color = &palette[self.background % palette.len()];
            if !color.is_empty() {
                return color;
            }
        }
        if item.meta.accent_color.is_empty() {
            FALLBACK_BACKGROUND
        } else {
            &item.meta.accent_color
        }
    }

    /// Whether the current work is shown rotated a quarter turn.
    pub fn rotates_current(&self, modes: &ModesConfig) -> bool {
        self.mobile && self.current().is_some_and(|c| modes.rotates(&c.category))
    }
}
