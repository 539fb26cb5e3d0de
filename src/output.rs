//! CLI output formatting for all pipeline stages.
//!
//! Output is **item-centric, not file-centric**: works are listed by id under
//! a positional index, with the file each stage wrote shown as secondary
//! context. Diagnostics go through `tracing` on stderr; everything here goes
//! to stdout.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Inventory (21 works)
//! 001 Enveloppe (10 works)
//! 002 Paysage (11 works)
//!
//! Config
//!     Breakpoint: 768px
//!     Reference viewport: 1440x900 @1x
//!     Rotated on mobile: Enveloppe
//! ```
//!
//! ## Plan
//!
//! ```text
//! Grid (desktop, 8 rows)
//! 001 hero     wide
//! 002 triplet  pay3 pay7 env1
//!
//! Overview (3 rows)
//! 001 pay1 env2 env4 pay0
//!
//! Fallback tier: 1450
//! Preload: pay3 pay7 env1 wide env9 pay2
//! ```
//!
//! ## Build
//!
//! ```text
//! Reel → index.html (21 works)
//! Grid → grid.html (21 works)
//! ...
//! Stylesheet → style-1a2b3c4d.css
//!
//! Generated 5 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::config::SiteConfig;
use crate::generate::GenerateReport;
use crate::inventory::Inventory;
use crate::plan::{Plan, RowPlan};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn works(n: usize) -> String {
    if n == 1 {
        "1 work".to_string()
    } else {
        format!("{n} works")
    }
}

/// A row plan line: index, kind padded to the widest kind, then ids.
///
/// ```text
/// 001 pair     a b
/// ```
fn row_line(index: usize, row: &RowPlan) -> String {
    format!(
        "{} {:<8} {}",
        format_index(index),
        row.kind.as_str(),
        row.items.join(" ")
    )
}

// ============================================================================
// check
// ============================================================================

/// Inventory summary by category, then the effective config.
pub fn format_check_output(inventory: &Inventory, config: &SiteConfig) -> Vec<String> {
    let mut lines = vec![format!("Inventory ({})", works(inventory.len()))];
    for (i, (category, count)) in inventory.categories().iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), category, works(*count)));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    let viewport = &config.viewport;
    lines.push(format!(
        "{}Breakpoint: {}px",
        indent(1),
        config.layout.mobile_breakpoint
    ));
    lines.push(format!(
        "{}Reference viewport: {}x{} @{}x",
        indent(1),
        viewport.width,
        viewport.height,
        viewport.dpr
    ));
    if viewport.reduced_motion {
        lines.push(format!("{}Reduced motion", indent(1)));
    }
    let rotated = &config.modes.rotate_categories;
    if !rotated.is_empty() {
        lines.push(format!("{}Rotated on mobile: {}", indent(1), rotated.join(", ")));
    }
    lines
}

pub fn print_check_output(inventory: &Inventory, config: &SiteConfig) {
    for line in format_check_output(inventory, config) {
        println!("{}", line);
    }
}

// ============================================================================
// plan
// ============================================================================

/// Row plans, overview rows and the loading decisions of a plan.
pub fn format_plan_output(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();

    for (label, rows) in [("desktop", &plan.grid.desktop), ("mobile", &plan.grid.mobile)] {
        lines.push(format!("Grid ({label}, {} rows)", rows.len()));
        for (i, row) in rows.iter().enumerate() {
            lines.push(row_line(i + 1, row));
        }
        lines.push(String::new());
    }

    lines.push(format!("Overview ({} rows)", plan.overview.rows.len()));
    for (i, row) in plan.overview.rows.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), row.join(" ")));
    }
    lines.push(String::new());

    lines.push(format!("Deck top: {}", plan.deck.last().map_or("-", String::as_str)));
    lines.push(format!("Fallback tier: {}", plan.fallback_tier.label()));
    lines.push(format!("Preload: {}", plan.preload.join(" ")));
    if let Some(seed) = plan.seed {
        lines.push(format!("Seed: {seed}"));
    }
    lines
}

pub fn print_plan_output(plan: &Plan) {
    for line in format_plan_output(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| format!("{} → {} ({})", page.mode, page.file, works(page.items)))
        .collect();
    lines.push(format!("Stylesheet → {}", report.stylesheet));
    lines.push(String::new());
    lines.push(format!("Generated {} pages", report.pages.len()));
    lines
}

pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
