//! Particle physical and visual state

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::rng::{ParticleRng, sample_in_disk, uniform};
use crate::ease_in_out;
use crate::settings::{Appearance, SpawnArea, SpawnConfig};
use crate::unit_from_angle;

/// A point mass with a finite lifetime
///
/// `mass`, `lifespan` and both colors are fixed at construction. Only the
/// simulation step mutates position, velocity and age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub age: f32,
    mass: f32,
    lifespan: f32,
    start_color: Vec3,
    end_color: Vec3,
}

impl Particle {
    /// Build a particle from explicit values
    ///
    /// Callers must pass `mass > 0` and `lifespan > 0`; spawned particles get
    /// these from a validated `SpawnConfig`.
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        mass: f32,
        lifespan: f32,
        start_color: Vec3,
        end_color: Vec3,
    ) -> Self {
        debug_assert!(mass > 0.0, "particle mass must be positive");
        debug_assert!(lifespan > 0.0, "particle lifespan must be positive");
        Self {
            position,
            velocity,
            age: 0.0,
            mass,
            lifespan,
            start_color,
            end_color,
        }
    }

    /// Spawn a particle with randomized attributes
    pub fn spawn(config: &SpawnConfig, rng: &mut ParticleRng) -> Self {
        let position = match config.area {
            SpawnArea::Viewport => Vec2::new(
                uniform(&mut rng.position, -config.aspect_ratio, config.aspect_ratio),
                uniform(&mut rng.position, -1.0, 1.0),
            ),
            SpawnArea::Disk { center, radius } => sample_in_disk(&mut rng.position, center, radius),
        };

        let angle = uniform(&mut rng.motion, 0.0, TAU);
        let velocity = unit_from_angle(angle) * config.speed;

        let mass = uniform(&mut rng.body, config.mass_min, config.mass_max);
        let lifespan = uniform(&mut rng.body, config.lifespan_min, config.lifespan_max);

        let start_color = random_color(rng);
        let end_color = random_color(rng);

        Self::new(position, velocity, mass, lifespan, start_color, end_color)
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    #[inline]
    pub fn start_color(&self) -> Vec3 {
        self.start_color
    }

    #[inline]
    pub fn end_color(&self) -> Vec3 {
        self.end_color
    }

    /// Fraction of the lifespan already lived
    #[inline]
    pub fn relative_age(&self) -> f32 {
        self.age / self.lifespan
    }

    /// Expired once age strictly exceeds lifespan
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age > self.lifespan
    }

    /// Blend from start to end color along an eased age curve
    pub fn color(&self, look: &Appearance) -> Vec3 {
        let x = self.relative_age().clamp(0.0, 1.0);
        self.start_color
            .lerp(self.end_color, ease_in_out(x, look.ease_power))
    }

    /// Opaque color for the renderer
    #[inline]
    pub fn rgba(&self, look: &Appearance) -> Vec4 {
        self.color(look).extend(1.0)
    }

    /// Constant radius that shrinks over the last `radius_fade_time` seconds
    pub fn radius(&self, look: &Appearance) -> f32 {
        let fade = look.radius_fade_time;
        let remaining = self.lifespan - self.age;
        let scale = if fade > 0.0 {
            remaining.clamp(0.0, fade) / fade
        } else {
            1.0
        };
        (scale * look.base_radius).max(look.min_radius)
    }
}

fn random_color(rng: &mut ParticleRng) -> Vec3 {
    Vec3::new(
        uniform(&mut rng.color, 0.0, 1.0),
        uniform(&mut rng.color, 0.0, 1.0),
        uniform(&mut rng.color, 0.0, 1.0),
    )
}
