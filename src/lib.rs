//! Particle Sim - a 2D particle simulation kernel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, forces, curves, collisions)
//! - `renderer`: GPU-ready instance records for an external renderer
//! - `platform`: Clock/input abstraction supplied by the host
//! - `settings`: Data-driven simulation configuration and presets

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{SimConfig, SimMode};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Number of particles spawned per batch
    pub const PARTICLE_COUNT: usize = 100;
    /// Largest frame delta accepted by a single step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Initial particle speed (world units per second)
    pub const SPAWN_SPEED: f32 = 0.2;
    /// Particle mass range
    pub const MASS_MIN: f32 = 1.0;
    pub const MASS_MAX: f32 = 2.0;
    /// Particle lifespan range (seconds)
    pub const LIFESPAN_MIN: f32 = 5.0;
    pub const LIFESPAN_MAX: f32 = 15.0;

    /// Color easing exponent
    pub const EASE_POWER: f32 = 4.0;
    /// Remaining lifetime over which particles shrink (seconds)
    pub const RADIUS_FADE_TIME: f32 = 2.0;
    /// On-screen radius of a particle before it starts shrinking
    pub const BASE_RADIUS: f32 = 0.03;

    /// Air friction coefficient
    pub const DRAG: f32 = 1.0;
    /// Gravity acceleration (world units per second²)
    pub const GRAVITY: f32 = 1.0;

    /// Parallel/collinear threshold for segment intersection
    pub const DET_EPSILON: f32 = 1e-6;

    /// Segments used when sampling a curve for rendering
    pub const CURVE_SEGMENTS: usize = 100;
    /// Closest-point gradient descent defaults
    pub const SEARCH_INITIAL_T: f32 = 0.5;
    pub const SEARCH_LEARNING_RATE: f32 = 0.01;
    pub const SEARCH_ITERATIONS: usize = 100;
    pub const SEARCH_STEP: f32 = 0.001;

    /// Rejection sampling attempt cap for disk spawning
    pub const DISK_SAMPLE_ATTEMPTS: usize = 32;

    /// Line thickness for obstacle, curve and probe sprites
    pub const LINE_THICKNESS: f32 = 0.01;
    /// Radius of the probe intersection marker
    pub const PROBE_MARKER_RADIUS: f32 = 0.02;
}

/// Symmetric accelerate/decelerate easing of `x` in [0, 1]
///
/// `ease_in_out(0) = 0`, `ease_in_out(0.5) = 0.5`, `ease_in_out(1) = 1` for any `power > 0`.
#[inline]
pub fn ease_in_out(x: f32, power: f32) -> f32 {
    if x < 0.5 {
        0.5 * (2.0 * x).powf(power)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - x)).powf(power)
    }
}

/// Reflect a velocity about a surface normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Unit vector at `angle` radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_boundaries() {
        for power in [0.5, 1.0, 2.0, 4.0, 7.5] {
            assert!(ease_in_out(0.0, power).abs() < 1e-6);
            assert!((ease_in_out(0.5, power) - 0.5).abs() < 1e-6);
            assert!((ease_in_out(1.0, power) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for power in [1.0, 2.0, 4.0] {
            let mut prev = ease_in_out(0.0, power);
            for i in 1..=1000 {
                let x = i as f32 / 1000.0;
                let y = ease_in_out(x, power);
                assert!(y >= prev, "ease dropped at x={x} power={power}");
                prev = y;
            }
        }
    }

    #[test]
    fn test_reflect_preserves_speed() {
        let v = Vec2::new(3.0, -4.0);
        let n = Vec2::new(0.0, 1.0);
        let r = reflect(v, n);
        assert!((r - Vec2::new(3.0, 4.0)).length() < 1e-6);
        assert!((r.length() - v.length()).abs() < 1e-6);
    }
}
