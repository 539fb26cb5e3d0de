//! Image load tracking and the startup loading gate.
//!
//! A failed image load is never an error. The item simply keeps its coloured
//! placeholder, and for the gate a failed preload counts as settled just like
//! a successful one.

use crate::config::LoadingConfig;
use crate::responsive::Tier;
use crate::types::ArtItem;
use std::collections::HashSet;
use std::time::Duration;

/// Placeholder opacity while the image has not loaded.
pub const PLACEHOLDER_OPACITY: f64 = 0.15;
/// Fallback placeholder colour for unknown accent names.
pub const DEFAULT_PLACEHOLDER: &str = "#e5e7eb";
/// Tier fetched by the gate's preloads.
pub const PRELOAD_TIER: Tier = Tier::W1450;

/// Map an accent colour name to a concrete placeholder colour.
pub fn placeholder_color(accent: &str) -> &'static str {
    match accent {
        "Black" => "#1a1a1a",
        "White" => "#f5f5f5",
        "Grey" | "Gray" => "#9ca3af",
        "Beige" => "#d4c5b9",
        "Pink" => "#fbbf24",
        "Cyan" => "#06b6d4",
        "Brown" => "#92400e",
        _ => DEFAULT_PLACEHOLDER,
    }
}

/// Per-item loaded flags.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    loaded: HashSet<String>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_load(&mut self, id: &str) {
        self.loaded.insert(id.to_string());
    }

    /// The placeholder stays; there is no retry.
    pub fn on_error(&mut self, id: &str) {
        tracing::debug!(id, "image failed to load, keeping placeholder");
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains(id)
    }

    pub fn placeholder_opacity(&self, id: &str) -> f64 {
        if self.is_loaded(id) { 0.0 } else { PLACEHOLDER_OPACITY }
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preload {
    pub id: String,
    pub url: String,
    pub settled: Option<Settled>,
}

/// Startup gate: dismissed only after the minimum display time has elapsed
/// and every preload has settled, in either order.
///
/// Time is fed in as elapsed durations since the gate was shown, so the gate
/// itself never sleeps.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    min_display: Duration,
    elapsed: Duration,
    preloads: Vec<Preload>,
}

impl LoadingGate {
    pub fn new(preloads: Vec<Preload>, min_display: Duration) -> Self {
        Self {
            min_display,
            elapsed: Duration::ZERO,
            preloads,
        }
    }

    /// Gate over the first `preload_count` items of the display order.
    pub fn for_order(order: &[&ArtItem], config: &LoadingConfig) -> Self {
        let preloads = order
            .iter()
            .take(config.preload_count)
            .map(|item| Preload {
                id: item.id.clone(),
                url: item.urls.get(PRELOAD_TIER).to_string(),
                settled: None,
            })
            .collect();
        Self::new(preloads, Duration::from_millis(config.min_display_ms))
    }

    pub fn preloads(&self) -> &[Preload] {
        &self.preloads
    }

    /// Advance the clock. Time never runs backwards.
    pub fn tick(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.max(elapsed);
        self.log_if_dismissed();
    }

    pub fn on_load(&mut self, id: &str) {
        self.settle(id, Settled::Loaded);
    }

    pub fn on_error(&mut self, id: &str) {
        self.settle(id, Settled::Failed);
    }

    fn settle(&mut self, id: &str, outcome: Settled) {
        if let Some(p) = self
            .preloads
            .iter_mut()
            .find(|p| p.id == id && p.settled.is_none())
        {
            p.settled = Some(outcome);
            self.log_if_dismissed();
        }
    }

    pub fn timer_elapsed(&self) -> bool {
        self.elapsed >= self.min_display
    }

    pub fn pending(&self) -> usize {
        self.preloads.iter().filter(|p| p.settled.is_none()).count()
    }

    pub fn is_dismissed(&self) -> bool {
        self.timer_elapsed() && self.pending() == 0
    }

    fn log_if_dismissed(&self) {
        if self.is_dismissed() {
            tracing::debug!(elapsed_ms = self.elapsed.as_millis() as u64, "loading gate dismissed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{art, refs};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn gate_over(n: usize) -> (Vec<ArtItem>, LoadingConfig) {
        let items = (0..n).map(|i| art(&format!("g{i}"), 1.0)).collect();
        (items, LoadingConfig::default())
    }

    // =========================================================================
    // Placeholders
    // =========================================================================

    #[test]
    fn placeholder_colour_map() {
        assert_eq!(placeholder_color("Black"), "#1a1a1a");
        assert_eq!(placeholder_color("Grey"), placeholder_color("Gray"));
        assert_eq!(placeholder_color("Pink"), "#fbbf24");
        assert_eq!(placeholder_color("Chartreuse"), DEFAULT_PLACEHOLDER);
        assert_eq!(placeholder_color(""), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn tracker_flags_on_load_only() {
        let mut tracker = LoadTracker::new();
        tracker.on_error("a");
        assert!(!tracker.is_loaded("a"));
        assert_eq!(tracker.placeholder_opacity("a"), PLACEHOLDER_OPACITY);
        tracker.on_load("a");
        assert!(tracker.is_loaded("a"));
        assert_eq!(tracker.placeholder_opacity("a"), 0.0);
        assert_eq!(tracker.loaded_count(), 1);
    }

    // =========================================================================
    // Loading gate
    // =========================================================================

    #[test]
    fn gate_preloads_first_six_at_1450() {
        let (items, config) = gate_over(10);
        let gate = LoadingGate::for_order(&refs(&items), &config);
        assert_eq!(gate.preloads().len(), 6);
        assert_eq!(gate.preloads()[0].url, "https://cdn.test/1450/g0.jpg");
        assert_eq!(gate.pending(), 6);
    }

    #[test]
    fn preloads_first_then_timer() {
        let (items, config) = gate_over(6);
        let mut gate = LoadingGate::for_order(&refs(&items), &config);
        for item in &items {
            gate.on_load(&item.id);
        }
        gate.tick(ms(1000));
        assert!(!gate.is_dismissed());
        gate.tick(ms(2500));
        assert!(gate.is_dismissed());
    }

    #[test]
    fn timer_first_then_preloads() {
        let (items, config) = gate_over(6);
        let mut gate = LoadingGate::for_order(&refs(&items), &config);
        gate.tick(ms(3000));
        assert!(gate.timer_elapsed());
        for item in &items[..5] {
            gate.on_load(&item.id);
        }
        assert!(!gate.is_dismissed());
        gate.on_load(&items[5].id);
        assert!(gate.is_dismissed());
    }

    #[test]
    fn failures_count_as_settled() {
        let (items, config) = gate_over(3);
        let mut gate = LoadingGate::for_order(&refs(&items), &config);
        gate.on_error("g0");
        gate.on_load("g1");
        gate.on_error("g2");
        gate.tick(ms(2500));
        assert!(gate.is_dismissed());
        assert_eq!(gate.preloads()[0].settled, Some(Settled::Failed));
    }

    #[test]
    fn unknown_and_repeat_signals_are_ignored() {
        let (items, config) = gate_over(2);
        let mut gate = LoadingGate::for_order(&refs(&items), &config);
        gate.on_load("nope");
        gate.on_load("g0");
        gate.on_error("g0");
        assert_eq!(gate.preloads()[0].settled, Some(Settled::Loaded));
        assert_eq!(gate.pending(), 1);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut gate = LoadingGate::new(Vec::new(), ms(2500));
        gate.tick(ms(2600));
        gate.tick(ms(10));
        assert!(gate.is_dismissed());
    }

    #[test]
    fn empty_order_waits_only_for_timer() {
        let gate = LoadingGate::for_order(&[], &LoadingConfig::default());
        assert_eq!(gate.pending(), 0);
        assert!(!gate.is_dismissed());
    }
}
