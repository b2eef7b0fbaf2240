//! Perspective camera for the spiral view.
//!
//! Two behaviours drive the camera and never run together:
//!
//! - **Idle-follow**: while nothing is selected the camera eases towards a
//!   point proportional to the pointer, always looking at the origin.
//! - **Fly-to**: selecting a record starts a time-based ease-out-cubic move to
//!   a point in front of it, looking at the record. A newer fly-to replaces an
//!   in-flight one.

use std::time::{Duration, Instant};

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

// ── Configuration ──

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position at startup
    pub start_position: Vec3,
    /// Pointer NDC → follow target scale
    pub follow_scale: f32,
    /// Fraction of the remaining distance covered per frame while following
    pub follow_damping: f32,
    /// Distance multiplier per wheel tick away from the origin
    pub zoom_out_factor: f32,
    /// Distance multiplier per wheel tick towards the origin
    pub zoom_in_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fly-to duration
    pub fly_duration: Duration,
    /// Where the camera parks relative to a selected record
    pub viewer_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            start_position: Vec3::new(0.0, 0.0, 15.0),
            follow_scale: 5.0,
            follow_damping: 0.02,
            zoom_out_factor: 1.1,
            zoom_in_factor: 0.9,
            min_distance: 5.0,
            max_distance: 30.0,
            fly_duration: Duration::from_millis(1000),
            viewer_offset: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

/// World-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Fly-to progress, polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAnimation {
    None,
    InProgress {
        start: Vec3,
        target: Vec3,
        look_at: Vec3,
        started_at: Instant,
    },
}

/// `1 - (1 - t)^3`, with `t` clamped to [0, 1].
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

// ── Camera ──

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Viewport width / height
    pub aspect: f32,
    pub animation: CameraAnimation,
    cfg: CameraConfig,
}

impl Camera {
    pub fn new(cfg: CameraConfig) -> Self {
        Self {
            position: cfg.start_position,
            look_at: Vec3::ZERO,
            aspect: 1.0,
            animation: CameraAnimation::None,
            cfg,
        }
    }

    /// Track the viewport size. Degenerate sizes keep the last aspect.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 1.0 && height > 1.0 {
            self.aspect = width / height;
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.cfg.fov_y_deg.to_radians()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y(), self.aspect, self.cfg.near, self.cfg.far)
    }

    /// Project a world point to NDC (`x` right, `y` up).
    ///
    /// Returns the NDC position and the view depth, or `None` when the point
    /// is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        let clip = self.projection() * self.view() * world.extend(1.0);
        if clip.w <= self.cfg.near {
            return None;
        }
        Some((clip.xy() / clip.w, clip.w))
    }

    /// Ray from the eye through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let forward = (self.look_at - self.position).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);

        let half_h = (0.5 * self.fov_y()).tan();
        let half_w = half_h * self.aspect;

        let direction = (forward + right * (ndc.x * half_w) + up * (ndc.y * half_h)).normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Distance from the scene origin.
    pub fn distance(&self) -> f32 {
        self.position.length()
    }

    // ── Idle-follow ──

    /// Move a damped step towards the pointer-driven target and face the
    /// origin. `z` is left alone so zoom survives following.
    pub fn follow_pointer(&mut self, pointer: Vec2) {
        let target = pointer * self.cfg.follow_scale;
        let k = self.cfg.follow_damping;
        self.position.x += (target.x - self.position.x) * k;
        self.position.y += (target.y - self.position.y) * k;
        self.look_at = Vec3::ZERO;
    }

    // ── Zoom ──

    /// Scale the distance from the origin by one wheel tick, clamped.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => self.cfg.zoom_in_factor,
            ZoomDirection::Out => self.cfg.zoom_out_factor,
        };
        let dir = self.position.normalize_or(Vec3::Z);
        let distance = (self.distance() * factor).clamp(self.cfg.min_distance, self.cfg.max_distance);
        self.position = dir * distance;
    }

    // ── Fly-to ──

    /// Start flying to `subject + viewer_offset`, looking at `subject`.
    /// Any fly-to already in progress is replaced.
    pub fn fly_to(&mut self, subject: Vec3, now: Instant) {
        self.animation = CameraAnimation::InProgress {
            start: self.position,
            target: subject + self.cfg.viewer_offset,
            look_at: subject,
            started_at: now,
        };
    }

    pub fn cancel_animation(&mut self) {
        self.animation = CameraAnimation::None;
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.animation, CameraAnimation::InProgress { .. })
    }

    /// Advance the fly-to. Returns `true` while it is still running.
    pub fn advance(&mut self, now: Instant) -> bool {
        let CameraAnimation::InProgress {
            start,
            target,
            look_at,
            started_at,
        } = self.animation
        else {
            return false;
        };

        let duration = self.cfg.fly_duration.as_secs_f32();
        let elapsed = now.saturating_duration_since(started_at).as_secs_f32();
        let progress = if duration > 0.0 {
            (elapsed / duration).min(1.0)
        } else {
            1.0
        };

        self.look_at = look_at;
        if progress >= 1.0 {
            self.position = target;
            self.animation = CameraAnimation::None;
            return false;
        }
        self.position = start + (target - start) * ease_out_cubic(progress);
        true
    }
}
