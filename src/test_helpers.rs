//! Shared test utilities.
//!
//! Builders for [`ArtItem`] fixtures and small extractors that keep the
//! planner and renderer tests focused on behaviour.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = [art("a", 1.2), art_in("b", "Enveloppe", 0.7)];
//! let rows = plan_rows(&refs(&items), ViewportClass::Desktop, &RowRules::default(), &mut chance);
//! assert_eq!(row_ids(&rows[0]), vec!["a", "b"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::layout::Row;
use crate::types::{ArtItem, ArtMeta, ArtUrls, Orientation};

// =========================================================================
// Fixture builders
// =========================================================================

/// An item in the default `"Series"` category.
pub fn art(id: &str, ratio: f64) -> ArtItem {
    art_in(id, "Series", ratio)
}

/// An item with an explicit category. Orientation follows the ratio.
pub fn art_in(id: &str, category: &str, ratio: f64) -> ArtItem {
    let orientation = if ratio < 0.95 {
        Orientation::Portrait
    } else if ratio > 1.05 {
        Orientation::Landscape
    } else {
        Orientation::Square
    };
    ArtItem {
        id: id.to_string(),
        category: category.to_string(),
        path_id: format!("{}/{id}", category.to_lowercase()),
        urls: ArtUrls {
            originals: format!("https://cdn.test/originals/{id}.jpg"),
            w1450: format!("https://cdn.test/1450/{id}.jpg"),
            w580: format!("https://cdn.test/580/{id}.jpg"),
            w290: format!("https://cdn.test/290/{id}.jpg"),
        },
        meta: ArtMeta {
            ratio,
            orientation,
            palette: vec!["#d4c5b9".to_string(), "#1a1a1a".to_string()],
            accent_color: "Beige".to_string(),
        },
    }
}

/// Write `items` as `inventory.json` into a fresh temp content directory.
pub fn content_dir_with(items: &[ArtItem]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_inventory(tmp.path(), items);
    tmp
}

pub fn write_inventory(dir: &Path, items: &[ArtItem]) {
    let json = serde_json::to_string_pretty(items).unwrap();
    std::fs::write(dir.join("inventory.json"), json).unwrap();
}

// =========================================================================
// Extractors
// =========================================================================

pub fn refs(items: &[ArtItem]) -> Vec<&ArtItem> {
    items.iter().collect()
}

pub fn ids(items: &[ArtItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

pub fn ref_ids(items: &[&ArtItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

pub fn row_ids<'a>(row: &Row<'a>) -> Vec<&'a str> {
    row.items.iter().map(|i| i.id.as_str()).collect()
}
