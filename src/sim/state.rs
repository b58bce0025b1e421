//! Simulation state
//!
//! Everything a step reads or writes lives here: the particle collection,
//! the obstacle set, the active curve and the spawn RNG.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bezier::Bezier;
use super::particle::Particle;
use super::rng::RngState;
use super::segment::Segment;
use crate::error::SimError;
use crate::settings::{SimConfig, valid_aspect_ratio};

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG state
    pub rng_state: RngState,
    pub config: SimConfig,
    /// Frames stepped so far
    pub frame: u64,
    /// Simulated seconds so far
    pub time: f64,
    /// Alive particles (order is not significant)
    pub particles: Vec<Particle>,
    /// Static obstacles, tested in order
    pub obstacles: Vec<Segment>,
    /// Active reference curve, refreshed from input
    pub curve: Option<Bezier>,
    /// Last known pointer position
    pub pointer: Option<Vec2>,
}

impl SimState {
    /// Create a state with the given config and seed, spawning the first batch
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        let mut state = Self::empty(config, seed)?;
        state.spawn_batch();
        Ok(state)
    }

    /// Create a state with no particles
    pub fn empty(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            seed,
            rng_state: RngState::new(seed),
            obstacles: config.obstacles.clone(),
            curve: config.curve.as_ref().map(|c| c.curve),
            config,
            frame: 0,
            time: 0.0,
            particles: Vec::new(),
            pointer: None,
        })
    }

    /// Spawn `config.particle_count` new particles
    pub fn spawn_batch(&mut self) {
        let count = self.config.particle_count;
        let mut rng = self.rng_state.next_batch();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(&self.config.spawn, &mut rng));
        }
        log::info!(
            "Spawned batch {} ({} particles, seed {})",
            self.rng_state.batch,
            count,
            self.seed
        );
    }

    /// Replace all particles with a fresh batch
    pub fn reseed(&mut self) {
        self.particles.clear();
        self.spawn_batch();
    }

    /// Change the viewport aspect ratio used for future spawns
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if valid_aspect_ratio(aspect_ratio) {
            self.config.spawn.aspect_ratio = aspect_ratio;
        }
    }

    #[inline]
    pub fn alive(&self) -> usize {
        self.particles.len()
    }
}
