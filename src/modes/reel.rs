//! Reel: a horizontal scroll-snap strip of the display order.

use crate::config::ModesConfig;
use crate::environment::ViewportClass;
use crate::loading::DEFAULT_PLACEHOLDER;
use crate::motion::stagger_delay;
use crate::types::ArtItem;

/// Reel placeholders are fainter than the grid's.
pub const REEL_PLACEHOLDER_OPACITY: f64 = 0.1;
/// Extra scale applied to a quarter-turned work so it fills the card.
pub const ROTATED_SCALE: f64 = 1.3;

#[derive(Debug, Clone, PartialEq)]
pub struct ReelCard<'a> {
    pub item: &'a ArtItem,
    pub index: usize,
    pub priority: bool,
    /// Entrance delay in seconds.
    pub delay: f64,
    /// Belongs to a category shown quarter-turned on mobile.
    pub rotatable: bool,
}

impl<'a> ReelCard<'a> {
    pub fn rotated(&self, class: ViewportClass) -> bool {
        self.rotatable && class.is_mobile()
    }

    /// Rotation in degrees and scale for the given viewport class.
    pub fn rotation(&self, class: ViewportClass) -> (f64, f64) {
        if self.rotated(class) {
            (90.0, ROTATED_SCALE)
        } else {
            (0.0, 1.0)
        }
    }

    /// The accent colour used as-is, or the neutral default.
    pub fn placeholder(&self) -> &'a str {
        match self.item.meta.accent_color.as_str() {
            "" => DEFAULT_PLACEHOLDER,
            accent => accent,
        }
    }
}

pub fn reel_cards<'a>(
    order: &[&'a ArtItem],
    priority_count: usize,
    modes: &ModesConfig,
) -> Vec<ReelCard<'a>> {
    order
        .iter()
        .enumerate()
        .map(|(index, &item)| {
            let priority = index < priority_count;
            ReelCard {
                item,
                index,
                priority,
                delay: stagger_delay(index, priority),
                rotatable: modes.rotates(&item.category),
            }
        })
        .collect()
}
