//! Deck cycler.
//!
//! A stack of cards where only the top few are drawn. The top card is the
//! *last* element of the sequence; advancing moves it to the front, so after
//! `n` advances on an `n`-card deck the order is back where it started.

use crate::config::DeckConfig;
use crate::types::ArtItem;
use std::collections::VecDeque;

/// Scale step per card of depth.
pub const SCALE_STEP: f64 = 0.05;
/// Vertical offset in pixels per card of depth (negative lifts the card).
pub const LIFT_STEP: f64 = -15.0;
/// Opacity step per card of depth.
pub const FADE_STEP: f64 = 0.15;

/// Visual treatment of a card `depth` positions below the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub depth: usize,
    pub scale: f64,
    pub offset_y: f64,
    pub opacity: f64,
}

impl CardStyle {
    pub fn at_depth(depth: usize) -> Self {
        let d = depth as f64;
        Self {
            depth,
            scale: 1.0 - SCALE_STEP * d,
            // Keep the top card at +0 so it renders as `0px`.
            offset_y: if depth == 0 { 0.0 } else { LIFT_STEP * d },
            opacity: 1.0 - FADE_STEP * d,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeckCycler<'a> {
    cards: VecDeque<&'a ArtItem>,
    visible: usize,
    swipe_threshold: f64,
}

impl<'a> DeckCycler<'a> {
    pub fn new(cards: Vec<&'a ArtItem>, config: &DeckConfig) -> Self {
        Self {
            cards: cards.into(),
            visible: config.visible.max(1),
            swipe_threshold: config.swipe_threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Full order, bottom first, top last.
    pub fn cards(&self) -> impl Iterator<Item = &'a ArtItem> + '_ {
        self.cards.iter().copied()
    }

    pub fn top(&self) -> Option<&'a ArtItem> {
        self.cards.back().copied()
    }

    /// Move the top card to the bottom of the deck.
    pub fn advance(&mut self) {
        if let Some(card) = self.cards.pop_back() {
            self.cards.push_front(card);
        }
        if let Some(top) = self.top() {
            tracing::debug!(top = %top.id, "deck advanced");
        }
    }

    /// A tap on the top card always advances.
    pub fn tap(&mut self) {
        self.advance();
    }

    /// Horizontal drag release on the top card. Advances when `|dx|` exceeds
    /// the swipe threshold; returns whether it did.
    pub fn release_drag(&mut self, dx: f64) -> bool {
        if dx.abs() > self.swipe_threshold {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The drawn cards, deepest first and top last, each with its style.
    pub fn visible(&self) -> Vec<(&'a ArtItem, CardStyle)> {
        let shown = self.visible.min(self.cards.len());
        let start = self.cards.len() - shown;
        self.cards
            .iter()
            .skip(start)
            .enumerate()
            .map(|(i, &card)| (card, CardStyle::at_depth(shown - 1 - i)))
            .collect()
    }

    /// Backdrop tint: the top card's accent colour.
    pub fn backdrop_color(&self) -> Option<&'a str> {
        self.top().map(|c| c.meta.accent_color.as_str())
    }
}
