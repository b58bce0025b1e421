//! Render sink for an external renderer
//!
//! The simulation never draws. This module only flattens snapshots into
//! `Pod` instance lists ready for a GPU upload.

pub mod shapes;
pub mod vertex;

pub use shapes::{RenderBatch, build_batch, particle_disks, scene_lines};
pub use vertex::{DiskInstance, LineInstance, colors};
