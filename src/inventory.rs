//! Inventory loading and display-order shuffling.
//!
//! The inventory is a JSON array of [`ArtItem`] in `<content>/inventory.json`.
//! It is validated once on load and never mutated afterwards; every display
//! order is a shuffled sequence of references into it.

use crate::random::Chance;
use crate::types::ArtItem;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub const INVENTORY_FILE: &str = "inventory.json";

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate item id: {0}")]
    DuplicateId(String),
    #[error("item {id} has invalid ratio {ratio}")]
    InvalidRatio { id: String, ratio: f64 },
    #[error("inventory is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    items: Vec<ArtItem>,
}

impl Inventory {
    /// Validate and wrap a list of items.
    pub fn new(items: Vec<ArtItem>) -> Result<Self, InventoryError> {
        if items.is_empty() {
            return Err(InventoryError::Empty);
        }
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(InventoryError::DuplicateId(item.id.clone()));
            }
            let ratio = item.ratio();
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(InventoryError::InvalidRatio {
                    id: item.id.clone(),
                    ratio,
                });
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[ArtItem] {
        &self.items
    }

    /// References in inventory order.
    pub fn refs(&self) -> Vec<&ArtItem> {
        self.items.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ArtItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Distinct categories in first-seen order, with their item counts.
    pub fn categories(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = Vec::new();
        for item in &self.items {
            match out.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, count)) => *count += 1,
                None => out.push((item.category.as_str(), 1)),
            }
        }
        out
    }
}

pub fn load_inventory(content_dir: &Path) -> Result<Inventory, InventoryError> {
    let path = content_dir.join(INVENTORY_FILE);
    let raw = std::fs::read_to_string(&path)?;
    let items: Vec<ArtItem> = serde_json::from_str(&raw)?;
    let inventory = Inventory::new(items)?;
    tracing::info!(
        path = %path.display(),
        items = inventory.len(),
        "loaded inventory"
    );
    Ok(inventory)
}

/// Fisher–Yates shuffle into a new order. The input slice is left untouched.
///
/// Hand-written instead of `SliceRandom::shuffle` because every swap draws
/// through [`Chance`], which lets tests script the resulting order.
pub fn shuffle<'a>(items: &[&'a ArtItem], chance: &mut impl Chance) -> Vec<&'a ArtItem> {
    let mut order = items.to_vec();
    for i in (1..order.len()).rev() {
        let j = chance.index_through(i);
        order.swap(i, j);
    }
    order
}
