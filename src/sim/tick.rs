//! Per-frame simulation step
//!
//! Ages particles, accumulates forces, integrates with semi-implicit Euler,
//! reflects off obstacles and culls expired particles.

use glam::{Vec2, Vec4};

use super::bezier::Bezier;
use super::particle::Particle;
use super::search::{SearchParams, closest_point};
use super::segment::{Intersection, Segment, intersect_segments};
use super::state::SimState;
use crate::consts::MAX_FRAME_DT;
use crate::reflect;
use crate::settings::ForceConfig;

/// Hits this close to the start of a path are treated as resting contacts
const CONTACT_EPSILON: f32 = 1e-6;

/// Distance a bounced particle is pushed off the segment, per unit of coordinate scale
const CONTACT_OFFSET: f32 = 1e-6;

/// Host inputs for a single step
#[derive(Debug, Clone, Default)]
pub struct StepInput {
    /// Pointer in world space
    pub pointer: Option<Vec2>,
    /// Replacement reference curve
    pub curve: Option<Bezier>,
    /// New viewport aspect ratio (affects future spawns only)
    pub aspect_ratio: Option<f32>,
    /// Replace every particle with a fresh batch before stepping
    pub reseed: bool,
}

/// What the renderer needs to draw one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub position: Vec2,
    pub radius: f32,
    pub color: Vec4,
}

/// Read-only view of the state after a step
#[derive(Debug, Clone, Default)]
pub struct SimulationSnapshot {
    pub frame: u64,
    pub time: f64,
    pub particles: Vec<ParticleSprite>,
    pub obstacles: Vec<Segment>,
    /// Active curve and its sampled points
    pub curve: Option<Bezier>,
    pub curve_samples: Vec<Vec2>,
    /// Probe line from the anchor to the pointer, and where it crosses the probe segment
    pub probe: Option<(Segment, Segment)>,
    pub probe_hit: Option<Intersection>,
    /// Particles removed this step
    pub expired: usize,
    /// Particles reflected this step
    pub collisions: usize,
}

impl SimulationSnapshot {
    /// Capture the renderable state without stepping
    pub fn capture(state: &SimState) -> Self {
        let look = &state.config.appearance;
        let particles = state
            .particles
            .iter()
            .map(|p| ParticleSprite {
                position: p.position,
                radius: p.radius(look),
                color: p.rgba(look),
            })
            .collect();

        let curve_samples = match (&state.curve, &state.config.curve) {
            (Some(curve), Some(cfg)) => curve.sample(cfg.segments, cfg.evaluation),
            (Some(curve), None) => super::bezier::default_samples(curve),
            _ => Vec::new(),
        };

        let (probe, probe_hit) = match (state.config.probe, state.pointer) {
            (Some(cfg), Some(pointer)) => {
                let line = Segment::new(cfg.anchor, pointer);
                (Some((cfg.segment, line)), cfg.segment.intersect(&line))
            }
            _ => (None, None),
        };

        Self {
            frame: state.frame,
            time: state.time,
            particles,
            obstacles: state.obstacles.clone(),
            curve: state.curve,
            curve_samples,
            probe,
            probe_hit,
            expired: 0,
            collisions: 0,
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn step(state: &mut SimState, input: &StepInput, dt: f32) -> SimulationSnapshot {
    let dt = sanitize_dt(dt);

    state.frame += 1;
    state.time += dt as f64;

    if let Some(aspect) = input.aspect_ratio {
        state.set_aspect_ratio(aspect);
    }
    if input.pointer.is_some() {
        state.pointer = input.pointer;
    }
    refresh_curve(state, input);

    if input.reseed {
        state.reseed();
    }

    let forces = state.config.forces;
    let search = state
        .config
        .curve
        .as_ref()
        .map(|c| c.search)
        .unwrap_or_default();

    let mut collisions = 0;
    for particle in state.particles.iter_mut() {
        particle.age += dt;

        let force = net_force(
            particle,
            &forces,
            state.pointer,
            state.curve.as_ref(),
            &search,
        );

        let previous = particle.position;
        integrate(particle, force, dt);

        if resolve_collision(particle, previous, &state.obstacles, dt) {
            collisions += 1;
        }
    }

    let before = state.particles.len();
    state.particles.retain(|p| !p.is_expired());
    let expired = before - state.particles.len();

    if expired > 0 || collisions > 0 {
        log::debug!(
            "Frame {}: {} expired, {} collisions, {} alive",
            state.frame,
            expired,
            collisions,
            state.particles.len()
        );
    }

    if state.config.auto_reseed && state.particles.is_empty() && state.config.particle_count > 0 {
        log::info!("All particles expired at frame {}, reseeding", state.frame);
        state.spawn_batch();
    }

    let mut snapshot = SimulationSnapshot::capture(state);
    snapshot.expired = expired;
    snapshot.collisions = collisions;
    snapshot
}

/// Negative or non-finite deltas become zero so age never runs backwards
fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring invalid frame delta {}", dt);
        return 0.0;
    }
    dt.min(MAX_FRAME_DT)
}

/// An explicit curve from the host wins; otherwise the pointer drives its control point
fn refresh_curve(state: &mut SimState, input: &StepInput) {
    if let Some(curve) = input.curve {
        state.curve = Some(curve);
        return;
    }

    let control = state.config.curve.as_ref().and_then(|c| c.pointer_control);
    if let (Some(index), Some(pointer), Some(curve)) = (control, state.pointer, state.curve.as_mut()) {
        curve.set_point(index, pointer);
    }
}

/// Sum of the enabled force terms acting on a particle
pub fn net_force(
    particle: &Particle,
    forces: &ForceConfig,
    pointer: Option<Vec2>,
    curve: Option<&Bezier>,
    search: &SearchParams,
) -> Vec2 {
    let mut force = Vec2::ZERO;

    if let Some(k) = forces.drag {
        force += -particle.velocity * k;
    }
    if let Some(g) = forces.gravity {
        force += g * particle.mass();
    }
    if let (Some(k), Some(target)) = (forces.pointer_attraction, pointer) {
        force += (target - particle.position) * k;
    }
    if let (Some(k), Some(curve)) = (forces.curve_attraction, curve) {
        force += curve_pull(particle.position, curve, k, search);
    }

    force
}

/// Pull of magnitude k / (k + distance) toward the closest curve point
///
/// Zero when the position already lies on the curve.
pub fn curve_pull(position: Vec2, curve: &Bezier, strength: f32, search: &SearchParams) -> Vec2 {
    let (_, nearest) = closest_point(curve, position, search);
    let offset = nearest - position;
    let denom = strength + offset.length();
    if !denom.is_finite() || denom <= 0.0 {
        return Vec2::ZERO;
    }
    let pull = offset.normalize_or_zero() * (strength / denom);
    if pull.is_finite() { pull } else { Vec2::ZERO }
}

/// Semi-implicit Euler: velocity first, then position from the new velocity
#[inline]
pub fn integrate(particle: &mut Particle, force: Vec2, dt: f32) {
    particle.velocity += force / particle.mass() * dt;
    particle.position += particle.velocity * dt;
}

/// Reflect off the first obstacle crossed by `previous → position`
///
/// Only one obstacle is resolved per particle per step; the remainder of the
/// path after the bounce is not tested again.
fn resolve_collision(particle: &mut Particle, previous: Vec2, obstacles: &[Segment], dt: f32) -> bool {
    let end = particle.position;

    for obstacle in obstacles {
        let Some(hit) = intersect_segments(previous, end, obstacle.a, obstacle.b) else {
            continue;
        };
        let normal = obstacle.normal();
        if hit.t <= CONTACT_EPSILON && leaving_contact(previous, end - previous, obstacle.a, normal) {
            continue;
        }

        particle.velocity = reflect(particle.velocity, -normal);
        // Land strictly on the outgoing side so the next path starts off the line
        let side = normal * particle.velocity.dot(normal).signum();
        let offset = CONTACT_OFFSET * (1.0 + hit.point.abs().max_element());
        particle.position = hit.point + particle.velocity * (1.0 - hit.t) * dt + side * offset;
        return true;
    }

    false
}

/// Whether a path starting at a segment's line heads away from it
///
/// Off the line, away means toward the side the path starts on. Exactly on
/// the line there is no such side, and only the normal side counts as away.
fn leaving_contact(start: Vec2, path: Vec2, origin: Vec2, normal: Vec2) -> bool {
    let side = (start - origin).dot(normal);
    let heading = path.dot(normal);
    if side != 0.0 { side * heading > 0.0 } else { heading > 0.0 }
}
