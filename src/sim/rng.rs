//! Seeded random streams for particle spawning
//!
//! Each particle attribute group draws from its own PCG stream so that,
//! for example, changing the spawn area does not shift the colors of a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DISK_SAMPLE_ATTEMPTS;

/// Stream ids, one per attribute group
const STREAM_POSITION: u64 = 1;
const STREAM_MOTION: u64 = 2;
const STREAM_BODY: u64 = 3;
const STREAM_COLOR: u64 = 4;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Number of batches spawned so far; mixed into the next batch's seed
    pub batch: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, batch: 0 }
    }

    /// Streams for the next spawn batch
    pub fn next_batch(&mut self) -> ParticleRng {
        let seed = self
            .seed
            .wrapping_add(self.batch.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.batch += 1;
        ParticleRng::new(seed)
    }
}

/// Independent generators used while spawning particles
#[derive(Debug, Clone)]
pub struct ParticleRng {
    /// Spawn position
    pub position: Pcg32,
    /// Launch direction
    pub motion: Pcg32,
    /// Mass and lifespan
    pub body: Pcg32,
    /// Start and end colors
    pub color: Pcg32,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        // Scramble the seed once so nearby seeds give unrelated states
        let state = Pcg32::seed_from_u64(seed).random::<u64>();
        Self {
            position: Pcg32::new(state, STREAM_POSITION),
            motion: Pcg32::new(state, STREAM_MOTION),
            body: Pcg32::new(state, STREAM_BODY),
            color: Pcg32::new(state, STREAM_COLOR),
        }
    }
}

/// Uniform sample in [min, max] (returns `min` when the range is empty)
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Uniform point inside a disk by rejection sampling
///
/// Gives up after `DISK_SAMPLE_ATTEMPTS` rejected draws and returns the last
/// candidate pulled onto the disk boundary.
pub fn sample_in_disk<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let mut candidate = Vec2::ZERO;
    for _ in 0..DISK_SAMPLE_ATTEMPTS {
        candidate = Vec2::new(uniform(rng, -1.0, 1.0), uniform(rng, -1.0, 1.0));
        if candidate.length_squared() <= 1.0 {
            return center + candidate * radius;
        }
    }
    center + candidate.normalize_or_zero() * radius
}
