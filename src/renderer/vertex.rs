//! Instance records for disk and line rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// One filled disk (particle or marker)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DiskInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl DiskInstance {
    pub fn new(position: Vec2, radius: f32, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            radius,
            color: color.to_array(),
        }
    }
}

/// One thick line from `start` to `end`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub thickness: f32,
    pub color: [f32; 4],
}

impl LineInstance {
    pub fn new(start: Vec2, end: Vec2, thickness: f32, color: [f32; 4]) -> Self {
        Self {
            start: start.to_array(),
            end: end.to_array(),
            thickness,
            color,
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PROBE_SEGMENT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PROBE_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PROBE_HIT: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const CURVE: [f32; 4] = [0.9, 0.9, 1.0, 1.0];
    pub const CONTROL_POLYGON: [f32; 4] = [0.4, 0.4, 0.5, 0.6];
}
