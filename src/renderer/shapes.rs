//! Snapshot to instance conversion
//!
//! Turns a `SimulationSnapshot` into flat disk and line lists that an
//! external renderer can upload as-is.

use glam::Vec4;

use super::vertex::{DiskInstance, LineInstance, colors};
use crate::consts::{LINE_THICKNESS, PROBE_MARKER_RADIUS};
use crate::sim::SimulationSnapshot;

/// Everything to draw for one frame
#[derive(Debug, Clone, Default)]
pub struct RenderBatch {
    pub disks: Vec<DiskInstance>,
    pub lines: Vec<LineInstance>,
}

impl RenderBatch {
    pub fn disk_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.disks)
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}

/// One disk per particle
pub fn particle_disks(snapshot: &SimulationSnapshot) -> Vec<DiskInstance> {
    snapshot
        .particles
        .iter()
        .map(|p| DiskInstance::new(p.position, p.radius, p.color))
        .collect()
}

/// Obstacles, curve (with its control polygon) and probe lines
pub fn scene_lines(snapshot: &SimulationSnapshot) -> Vec<LineInstance> {
    let mut lines = Vec::with_capacity(snapshot.obstacles.len() + snapshot.curve_samples.len() + 8);

    for seg in &snapshot.obstacles {
        lines.push(LineInstance::new(seg.a, seg.b, LINE_THICKNESS, colors::OBSTACLE));
    }

    if let Some(curve) = &snapshot.curve {
        for (a, b) in curve.control_polygon() {
            lines.push(LineInstance::new(a, b, LINE_THICKNESS * 0.5, colors::CONTROL_POLYGON));
        }
    }
    for pair in snapshot.curve_samples.windows(2) {
        lines.push(LineInstance::new(pair[0], pair[1], LINE_THICKNESS, colors::CURVE));
    }

    if let Some((segment, line)) = &snapshot.probe {
        lines.push(LineInstance::new(segment.a, segment.b, LINE_THICKNESS, colors::PROBE_SEGMENT));
        lines.push(LineInstance::new(line.a, line.b, LINE_THICKNESS, colors::PROBE_LINE));
    }

    lines
}

/// Full draw list: scene lines first, then particles, then the probe marker
pub fn build_batch(snapshot: &SimulationSnapshot) -> RenderBatch {
    let mut disks = particle_disks(snapshot);
    if let Some(hit) = &snapshot.probe_hit {
        disks.push(DiskInstance::new(
            hit.point,
            PROBE_MARKER_RADIUS,
            Vec4::from_array(colors::PROBE_HIT),
        ));
    }

    RenderBatch {
        disks,
        lines: scene_lines(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SimConfig, SimMode};
    use crate::sim::{SimState, StepInput, step};
    use glam::Vec2;

    #[test]
    fn test_batch_counts() {
        let mut state = SimState::new(SimConfig::from_mode(SimMode::Obstacles), 10).expect("valid");
        let snap = step(
            &mut state,
            &StepInput {
                pointer: Some(Vec2::new(0.0, 0.75)),
                ..Default::default()
            },
            1.0 / 60.0,
        );
        let batch = build_batch(&snap);

        // Particles plus the probe marker
        assert_eq!(batch.disks.len(), snap.particles.len() + 1);
        // Three obstacles plus the two probe lines
        assert_eq!(batch.lines.len(), 5);
        assert_eq!(batch.disk_bytes().len(), batch.disks.len() * std::mem::size_of::<DiskInstance>());
    }

    #[test]
    fn test_curve_lines() {
        let mut state = SimState::empty(SimConfig::from_mode(SimMode::FollowCurve), 1).expect("valid");
        let snap = step(&mut state, &StepInput::default(), 0.01);
        let lines = scene_lines(&snap);
        // 100 curve pieces + 3 control polygon edges
        assert_eq!(lines.len(), 103);
        assert_eq!(std::mem::size_of::<LineInstance>(), 36);
    }
}
