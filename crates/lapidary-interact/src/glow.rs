//! Per-frame glow derivation.
//!
//! Runs once per display refresh. Input is the active-facet count and
//! wall-clock time; output is a plain style record the renderer applies.
//! The animator never touches a view, so teardown is just dropping the
//! frame loop that calls it.

use serde::{Deserialize, Serialize};

/// Sparkle opacity floor while resting, and its headroom under full glow.
const SPARKLE_FLOOR: f32 = 0.3;
const SPARKLE_SPAN: f32 = 0.7;

/// Brightness/saturation gain per unit intensity.
const FACET_BRIGHTNESS_GAIN: f32 = 0.3;
const FACET_SATURATION_GAIN: f32 = 0.5;

/// Derived visual parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    /// Normalized glow strength in `[0, 1]`.
    pub intensity: f32,
    /// Drop-shadow / halo radius in view units, pulse included.
    pub glow_radius: f32,
    /// Opacity of the sparkle layer.
    pub sparkle_opacity: f32,
    /// Brightness multiplier of the sparkle layer.
    pub sparkle_brightness: f32,
    /// Brightness multiplier of the facet fill.
    pub facet_brightness: f32,
    /// Saturation multiplier of the facet fill.
    pub facet_saturation: f32,
}

impl GlowStyle {
    /// The resting baseline: no glow, base opacity, base brightness.
    ///
    /// Applied instantaneously whenever nothing is lit, no decay animation.
    pub const RESTING: Self = Self {
        intensity: 0.0,
        glow_radius: 0.0,
        sparkle_opacity: SPARKLE_FLOOR,
        sparkle_brightness: 1.0,
        facet_brightness: 1.0,
        facet_saturation: 1.0,
    };
}

/// Frame-clocked glow computation.
#[derive(Debug, Clone)]
pub struct GlowAnimator {
    /// Active count at which intensity saturates.
    pub max_glow: usize,
    /// Halo radius with zero intensity.
    pub base_radius: f32,
    /// Additional radius at full intensity.
    pub radius_span: f32,
    /// Pulse angular frequency in rad/s.
    pub pulse_frequency: f32,
    /// Pulse amplitude as a fraction of radius.
    pub pulse_amplitude: f32,
}

impl Default for GlowAnimator {
    fn default() -> Self {
        Self {
            max_glow: lapidary_topology::RING_FACETS,
            base_radius: 10.0,
            radius_span: 25.0,
            pulse_frequency: 5.0,
            pulse_amplitude: 0.2,
        }
    }
}

impl GlowAnimator {
    /// Derive the style for one frame.
    ///
    /// `t_secs` is wall-clock time since widget mount; the pulse term only
    /// applies while something is lit.
    pub fn style(&self, active_count: usize, t_secs: f32) -> GlowStyle {
        if active_count == 0 {
            return GlowStyle::RESTING;
        }

        let intensity = (active_count as f32 / self.max_glow as f32).min(1.0);
        let pulse = 1.0 + (t_secs * self.pulse_frequency).sin() * self.pulse_amplitude;

        GlowStyle {
            intensity,
            glow_radius: (self.base_radius + intensity * self.radius_span) * pulse,
            sparkle_opacity: SPARKLE_FLOOR + SPARKLE_SPAN * intensity,
            sparkle_brightness: 1.0 + intensity,
            facet_brightness: 1.0 + FACET_BRIGHTNESS_GAIN * intensity,
            facet_saturation: 1.0 + FACET_SATURATION_GAIN * intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_active_is_exactly_resting() {
        let animator = GlowAnimator::default();
        for t in [0.0, 0.1, 17.3, 1000.0] {
            assert_eq!(animator.style(0, t), GlowStyle::RESTING);
        }
    }

    #[test]
    fn intensity_monotonic_in_active_count() {
        let animator = GlowAnimator::default();
        let t = 0.4;
        let mut last = -1.0;
        for count in 0..=8 {
            let style = animator.style(count, t);
            assert!(style.intensity >= last, "dip at count {}", count);
            last = style.intensity;
        }
    }

    #[test]
    fn intensity_saturates_at_max_glow() {
        let animator = GlowAnimator::default();
        assert_eq!(animator.style(6, 0.0).intensity, 1.0);
        assert_eq!(animator.style(7, 0.0).intensity, 1.0);
    }

    #[test]
    fn pulse_stays_within_amplitude() {
        let animator = GlowAnimator::default();
        let unpulsed = animator.base_radius + animator.radius_span / 6.0;
        for step in 0..200 {
            let t = step as f32 * 0.05;
            let radius = animator.style(1, t).glow_radius;
            let factor = radius / unpulsed;
            assert!((0.8..=1.2).contains(&factor), "pulse factor {} at t={}", factor, t);
        }
    }

    #[test]
    fn full_glow_doubles_sparkle_brightness() {
        let style = GlowAnimator::default().style(6, 0.0);
        assert_eq!(style.sparkle_brightness, 2.0);
        assert_eq!(style.sparkle_opacity, 1.0);
    }

    #[test]
    fn style_serializes_for_renderers() {
        let style = GlowAnimator::default().style(3, 1.0);
        let json = serde_json::to_string(&style).unwrap();
        let parsed: GlowStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, style);
    }
}
