//! Line segment geometry and exact segment-segment intersection
//!
//! Obstacles are straight segments. Particles sweep a segment from their
//! previous to their new position each frame, which is tested against every
//! obstacle with `intersect_segments`.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::DET_EPSILON;

/// An immutable segment from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Direction vector `b - a` (not normalized)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Unit normal: the direction rotated +90° (zero for a degenerate segment)
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.direction().perp().normalize_or_zero()
    }

    /// Intersect this segment with another
    #[inline]
    pub fn intersect(&self, other: &Segment) -> Option<Intersection> {
        intersect_segments(self.a, self.b, other.a, other.b)
    }
}

/// Where two segments cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Crossing point
    pub point: Vec2,
    /// Parameter along the first segment (A→B)
    pub t: f32,
    /// Parameter along the second segment (C→D)
    pub s: f32,
}

/// Intersect segment A→B with segment C→D
///
/// Solves `A + t(B-A) = C + s(D-C)` with the matrix `[u | -v]`. Parallel and
/// collinear segments (|det| below `DET_EPSILON`) report no intersection,
/// including collinear overlap.
pub fn intersect_segments(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Intersection> {
    let u = b - a;
    let v = d - c;
    let w = c - a;

    let m = Mat2::from_cols(u, -v);
    let det = m.determinant();
    if det.abs() < DET_EPSILON {
        return None;
    }

    let ts = m.inverse() * w;
    let (t, s) = (ts.x, ts.y);

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s) {
        Some(Intersection {
            point: a + t * u,
            t,
            s,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_segments() {
        let hit = intersect_segments(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        )
        .expect("segments cross at the origin");

        assert!(hit.point.length() < 1e-6);
        assert!((hit.t - 0.5).abs() < 1e-6);
        assert!((hit.s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_segments() {
        let hit = intersect_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_collinear_overlap_is_not_reported() {
        let hit = intersect_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_lines_cross_outside_extent() {
        // Infinite lines meet at (2, 0), beyond the first segment's end
        let hit = intersect_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        assert!(hit.is_none());

        // Infinite lines meet at (0, 0), beyond the second segment's start
        let hit = intersect_segments(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.5),
            Vec2::new(0.0, 2.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_endpoint_touch_counts() {
        let hit = intersect_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
        )
        .expect("touching at the end is a hit");
        assert!((hit.t - 1.0).abs() < 1e-6);
        assert!((hit.point - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_normal_is_rotated_direction() {
        let seg = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!((seg.normal() - Vec2::new(0.0, 1.0)).length() < 1e-6);

        let degenerate = Segment::new(Vec2::ONE, Vec2::ONE);
        assert_eq!(degenerate.normal(), Vec2::ZERO);
    }
}
