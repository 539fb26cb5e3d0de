//! Viewport and device signals.
//!
//! Layout code never reads a display surface directly. It asks an
//! [`Environment`] for the viewport size, pixel ratio and motion preference, so
//! the same planners run at build time (against the configured reference
//! viewport) and in tests (against hand-built values).

use crate::config::ViewportConfig;
use std::time::Duration;

/// Width below which a viewport is considered mobile.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Default quiet period before a resize triggers a re-plan.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn from_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

/// Read-only environmental inputs consumed by the planners.
pub trait Environment {
    fn viewport_width(&self) -> u32;
    fn viewport_height(&self) -> u32;
    fn device_pixel_ratio(&self) -> f64;
    fn prefers_reduced_motion(&self) -> bool;

    fn viewport_class(&self) -> ViewportClass {
        ViewportClass::from_width(self.viewport_width(), MOBILE_BREAKPOINT)
    }

    /// Width over height; `1.0` for a degenerate zero-height viewport.
    fn screen_ratio(&self) -> f64 {
        let height = self.viewport_height();
        if height == 0 {
            1.0
        } else {
            self.viewport_width() as f64 / height as f64
        }
    }
}

/// A fixed snapshot of the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticEnvironment {
    pub width: u32,
    pub height: u32,
    pub dpr: f64,
    pub reduced_motion: bool,
}

impl StaticEnvironment {
    pub fn new(width: u32, height: u32, dpr: f64) -> Self {
        Self {
            width,
            height,
            dpr,
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}

impl From<&ViewportConfig> for StaticEnvironment {
    fn from(viewport: &ViewportConfig) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            dpr: viewport.dpr,
            reduced_motion: viewport.reduced_motion,
        }
    }
}

impl Environment for StaticEnvironment {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn viewport_height(&self) -> u32 {
        self.height
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Collapses bursts of resize signals into a single re-plan.
///
/// Times are offsets from any fixed origin chosen by the host. Each
/// [`resized`](Self::resized) call restarts the quiet period; [`poll`](Self::poll)
/// yields the latest size once the quiet period has passed, exactly once.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(Duration, u32, u32)>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn resized(&mut self, now: Duration, width: u32, height: u32) {
        self.pending = Some((now, width, height));
    }

    pub fn poll(&mut self, now: Duration) -> Option<(u32, u32)> {
        match self.pending {
            Some((at, width, height)) if now.saturating_sub(at) >= self.quiet => {
                self.pending = None;
                tracing::debug!(width, height, "resize settled");
                Some((width, height))
            }
            _ => None,
        }
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(StaticEnvironment::new(767, 800, 1.0).viewport_class(), ViewportClass::Mobile);
        assert_eq!(StaticEnvironment::new(768, 800, 1.0).viewport_class(), ViewportClass::Desktop);
    }

    #[test]
    fn screen_ratio_handles_zero_height() {
        assert_eq!(StaticEnvironment::new(1600, 0, 1.0).screen_ratio(), 1.0);
        assert_eq!(StaticEnvironment::new(1600, 800, 1.0).screen_ratio(), 2.0);
    }

    #[test]
    fn from_viewport_config() {
        let env = StaticEnvironment::from(&ViewportConfig::default());
        assert_eq!(env.viewport_width(), 1440);
        assert_eq!(env.viewport_height(), 900);
        assert!(!env.prefers_reduced_motion());
    }

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let mut debouncer = ResizeDebouncer::default();
        debouncer.resized(ms(0), 800, 600);
        debouncer.resized(ms(60), 700, 600);
        assert_eq!(debouncer.poll(ms(120)), None);
        assert_eq!(debouncer.poll(ms(160)), Some((700, 600)));
    }

    #[test]
    fn debouncer_fires_once() {
        let mut debouncer = ResizeDebouncer::default();
        debouncer.resized(ms(0), 800, 600);
        assert!(debouncer.poll(ms(100)).is_some());
        assert_eq!(debouncer.poll(ms(500)), None);
    }
}
