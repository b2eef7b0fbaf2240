//! Idle animation for the record spiral.
//!
//! - Floating: each record bobs around its resting height on a sine wave,
//!   phase-shifted by its own `float_offset` so the spiral never moves in lockstep
//! - Spin: each record turns a fixed step about the Y axis per frame
//!
//! Phase comes from wall-clock seconds, so bob speed does not depend on frame rate.

use crate::render::entity::RecordEntity;

/// Float/spin tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatConfig {
    /// Angular speed of the bob (rad/s)
    pub speed: f32,
    /// Peak vertical displacement
    pub amplitude: f32,
    /// Y rotation added per frame (radians)
    pub spin_step: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            amplitude: 0.2,
            spin_step: 0.005,
        }
    }
}

/// Height of a record at time `t` (seconds since start).
pub fn float_height(original_y: f32, float_offset: f32, t: f32, cfg: &FloatConfig) -> f32 {
    original_y + (t * cfg.speed + float_offset).sin() * cfg.amplitude
}

/// Advance every record by one frame at time `t` (seconds since start).
pub fn animate_float(entities: &mut [RecordEntity], t: f32, cfg: &FloatConfig) {
    for e in entities {
        e.position.y = float_height(e.original_y, e.float_offset, t, cfg);
        e.rotation_y = (e.rotation_y + cfg.spin_step) % std::f32::consts::TAU;
    }
}
