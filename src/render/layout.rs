//! Spiral layout: record ordinal → world position.
//!
//! Records are spread along a helix that makes `turns` full revolutions while
//! rising through `height_span` units centred on the origin. The radius
//! breathes with `sin(2θ)` so the spiral bulges twice per turn.

use glam::Vec3;

/// Shape of the spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralConfig {
    /// Mean distance from the Y axis
    pub base_radius: f32,
    /// Amplitude of the radius modulation
    pub radius_variance: f32,
    /// Full revolutions from first to last record
    pub turns: f32,
    /// Vertical extent, centred on y = 0
    pub height_span: f32,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            base_radius: 8.0,
            radius_variance: 2.0,
            turns: 2.0,
            height_span: 6.0,
        }
    }
}

/// Position of record `index` out of `total`.
///
/// Deterministic. Evaluated in `f64` so large collections keep distinct,
/// finite positions. An empty collection maps everything to the origin.
pub fn spiral_position(index: usize, total: usize, cfg: &SpiralConfig) -> Vec3 {
    if total == 0 {
        return Vec3::ZERO;
    }
    let t = index as f64 / total as f64;
    let angle = t * cfg.turns as f64 * std::f64::consts::TAU;
    let height = t * cfg.height_span as f64 - cfg.height_span as f64 * 0.5;
    let radius = cfg.base_radius as f64 + (2.0 * angle).sin() * cfg.radius_variance as f64;

    Vec3::new(
        (angle.cos() * radius) as f32,
        height as f32,
        (angle.sin() * radius) as f32,
    )
}
