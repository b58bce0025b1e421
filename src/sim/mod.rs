//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the state
//! - Bounded loops only (curve search, collision checks)
//! - No rendering or platform dependencies

pub mod bezier;
pub mod particle;
pub mod rng;
pub mod search;
pub mod segment;
pub mod state;
pub mod tick;

pub use bezier::{Bezier, Evaluation};
pub use particle::Particle;
pub use rng::{ParticleRng, RngState, sample_in_disk};
pub use search::{SearchParams, closest_point, closest_t};
pub use segment::{Intersection, Segment, intersect_segments};
pub use state::SimState;
pub use tick::{ParticleSprite, SimulationSnapshot, StepInput, curve_pull, integrate, net_force, step};
