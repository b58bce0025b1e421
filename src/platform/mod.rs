//! Platform abstraction layer
//!
//! The host supplies:
//! - Time (one delta per frame)
//! - Pointer position in world space
//! - Viewport aspect ratio (spawn ranges only)

use std::time::Instant;

use glam::Vec2;

/// Frame clock
pub trait Clock {
    /// Seconds elapsed since the previous call
    fn elapsed_seconds(&mut self) -> f32;
}

/// Pointer and viewport queries
pub trait InputSource {
    fn pointer_position(&self) -> Option<Vec2>;
    fn viewport_aspect_ratio(&self) -> f32;
}

/// Constant delta, for headless runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Clock for FixedClock {
    fn elapsed_seconds(&mut self) -> f32 {
        self.dt
    }
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Pointer circling the origin, advanced once per frame
#[derive(Debug, Clone, Copy)]
pub struct ScriptedPointer {
    pub radius: f32,
    /// Radians per frame
    pub speed: f32,
    pub aspect_ratio: f32,
    angle: f32,
}

impl ScriptedPointer {
    pub fn new(radius: f32, speed: f32, aspect_ratio: f32) -> Self {
        Self {
            radius,
            speed,
            aspect_ratio,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.speed) % std::f32::consts::TAU;
    }
}

impl InputSource for ScriptedPointer {
    fn pointer_position(&self) -> Option<Vec2> {
        Some(crate::unit_from_angle(self.angle) * self.radius)
    }

    fn viewport_aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
