//! Motion presets shared by every mode.
//!
//! Durations are in seconds and collapse to zero when the environment asks
//! for reduced motion. Easings are CSS `cubic-bezier` control points. Springs
//! describe a damped oscillator for hosts that animate with one; the static
//! site maps them onto its transitions.

use crate::environment::Environment;
use std::fmt::Write;

/// Entrance delay step for priority items.
pub const PRIORITY_STAGGER: f64 = 0.08;
/// Entrance delay step for everything else.
pub const LAZY_STAGGER: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Durations {
    pub micro: f64,
    pub fast: f64,
    pub medium: f64,
    pub slow: f64,
    pub luxe: f64,
}

impl Durations {
    pub const STANDARD: Durations = Durations {
        micro: 0.12,
        fast: 0.2,
        medium: 0.3,
        slow: 0.5,
        luxe: 0.8,
    };

    pub const REDUCED: Durations = Durations {
        micro: 0.0,
        fast: 0.0,
        medium: 0.0,
        slow: 0.0,
        luxe: 0.0,
    };

    pub fn for_env(env: &impl Environment) -> Self {
        if env.prefers_reduced_motion() {
            Self::REDUCED
        } else {
            Self::STANDARD
        }
    }
}

/// Cubic-bezier control points `(x1, y1, x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing(pub [f64; 4]);

impl Easing {
    pub const SNAP: Easing = Easing([0.4, 0.0, 0.2, 1.0]);
    pub const NATURAL: Easing = Easing([0.25, 0.1, 0.25, 1.0]);
    /// Overshoots past the target before settling.
    pub const PLAYFUL: Easing = Easing([0.34, 1.56, 0.64, 1.0]);
    pub const EXIT: Easing = Easing([0.4, 0.0, 1.0, 1.0]);
    pub const ENTRANCE: Easing = Easing([0.0, 0.0, 0.2, 1.0]);

    pub fn to_css(self) -> String {
        let [a, b, c, d] = self.0;
        format!("cubic-bezier({a}, {b}, {c}, {d})")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Spring {
    pub const RESPONSIVE: Spring = Spring {
        stiffness: 350.0,
        damping: 35.0,
        mass: 0.8,
    };
    pub const NATURAL: Spring = Spring {
        stiffness: 250.0,
        damping: 30.0,
        mass: 1.0,
    };
    pub const GENTLE: Spring = Spring {
        stiffness: 180.0,
        damping: 25.0,
        mass: 1.2,
    };
    pub const BOUNCY: Spring = Spring {
        stiffness: 300.0,
        damping: 25.0,
        mass: 0.9,
    };

    /// Damping ratio `c / (2·sqrt(k·m))`. Below 1 the spring overshoots.
    pub fn damping_ratio(self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Approximate settle time in seconds (to within 2% of the target).
    pub fn settle_time(self) -> f64 {
        let omega = (self.stiffness / self.mass).sqrt();
        4.0 / (self.damping_ratio().min(1.0) * omega)
    }
}

/// Entrance delay for the item at `index`.
pub fn stagger_delay(index: usize, priority: bool) -> f64 {
    let step = if priority { PRIORITY_STAGGER } else { LAZY_STAGGER };
    index as f64 * step
}

/// CSS custom properties for the motion presets.
pub fn generate_motion_css(durations: &Durations) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in [
        ("micro", durations.micro),
        ("fast", durations.fast),
        ("medium", durations.medium),
        ("slow", durations.slow),
        ("luxe", durations.luxe),
    ] {
        let _ = writeln!(css, "    --duration-{name}: {value}s;");
    }
    for (name, easing) in [
        ("snap", Easing::SNAP),
        ("natural", Easing::NATURAL),
        ("playful", Easing::PLAYFUL),
        ("exit", Easing::EXIT),
        ("entrance", Easing::ENTRANCE),
    ] {
        let _ = writeln!(css, "    --ease-{name}: {};", easing.to_css());
    }
    // Springs map onto a duration the stylesheet can use.
    for (name, spring) in [
        ("responsive", Spring::RESPONSIVE),
        ("natural", Spring::NATURAL),
        ("gentle", Spring::GENTLE),
        ("bouncy", Spring::BOUNCY),
    ] {
        let settle = if durations.medium == 0.0 {
            0.0
        } else {
            (spring.settle_time() * 100.0).round() / 100.0
        };
        let _ = writeln!(css, "    --spring-{name}: {settle}s;");
    }
    css.push('}');
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;

    #[test]
    fn reduced_motion_zeroes_durations() {
        let env = StaticEnvironment::new(1440, 900, 1.0).with_reduced_motion(true);
        assert_eq!(Durations::for_env(&env), Durations::REDUCED);
        let env = StaticEnvironment::new(1440, 900, 1.0);
        assert_eq!(Durations::for_env(&env).medium, 0.3);
    }

    #[test]
    fn stagger_steps() {
        assert!((stagger_delay(2, true) - 0.16).abs() < 1e-12);
        assert!((stagger_delay(10, false) - 0.4).abs() < 1e-12);
        assert_eq!(stagger_delay(0, true), 0.0);
    }

    #[test]
    fn easing_css() {
        assert_eq!(Easing::SNAP.to_css(), "cubic-bezier(0.4, 0, 0.2, 1)");
    }

    #[test]
    fn bouncy_spring_is_loosest() {
        assert!(Spring::RESPONSIVE.damping_ratio() > 1.0);
        assert!(Spring::NATURAL.damping_ratio() < 1.0);
        assert!(Spring::BOUNCY.damping_ratio() < Spring::RESPONSIVE.damping_ratio());
        assert!(Easing::PLAYFUL.0[1] > 1.0);
    }

    #[test]
    fn motion_css_lists_all_presets() {
        let css = generate_motion_css(&Durations::STANDARD);
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--duration-luxe: 0.8s;"));
        assert!(css.contains("--ease-natural: cubic-bezier(0.25, 0.1, 0.25, 1);"));
        assert!(css.contains("--spring-gentle:"));
        assert!(css.ends_with('}'));
    }

    #[test]
    fn reduced_motion_css_has_zero_springs() {
        let css = generate_motion_css(&Durations::REDUCED);
        assert!(css.contains("--duration-fast: 0s;"));
        assert!(css.contains("--spring-bouncy: 0s;"));
    }
}
