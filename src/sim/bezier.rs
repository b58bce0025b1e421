//! Bezier curves of degree 1 to 3
//!
//! Two interchangeable evaluators are provided:
//! - de Casteljau: repeated linear interpolation, numerically stable
//! - Bernstein: closed-form binomial weights, cheaper per point
//!
//! A curve is plain data. Control points may change between frames (e.g. one
//! follows the pointer) without any cached state to invalidate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CURVE_SEGMENTS;
use crate::error::SimError;

/// Maximum number of control points (cubic)
pub const MAX_CONTROL_POINTS: usize = 4;

/// Binomial coefficients C(k, i) for k = 0..=3
const BINOMIALS: [[f32; MAX_CONTROL_POINTS]; MAX_CONTROL_POINTS] = [
    [1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0],
    [1.0, 2.0, 1.0, 0.0],
    [1.0, 3.0, 3.0, 1.0],
];

/// Which evaluator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Evaluation {
    #[default]
    DeCasteljau,
    Bernstein,
}

/// A Bezier curve with 2 to 4 control points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct Bezier {
    points: [Vec2; MAX_CONTROL_POINTS],
    len: usize,
}

impl Bezier {
    pub fn linear(p0: Vec2, p1: Vec2) -> Self {
        Self {
            points: [p0, p1, Vec2::ZERO, Vec2::ZERO],
            len: 2,
        }
    }

    pub fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self {
            points: [p0, p1, p2, Vec2::ZERO],
            len: 3,
        }
    }

    pub fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self {
            points: [p0, p1, p2, p3],
            len: 4,
        }
    }

    /// Build a curve from a slice of 2 to 4 control points
    pub fn from_points(points: &[Vec2]) -> Result<Self, SimError> {
        if !(2..=MAX_CONTROL_POINTS).contains(&points.len()) {
            return Err(SimError::ControlPointCount(points.len()));
        }
        let mut buf = [Vec2::ZERO; MAX_CONTROL_POINTS];
        buf[..points.len()].copy_from_slice(points);
        Ok(Self {
            points: buf,
            len: points.len(),
        })
    }

    /// Polynomial degree (number of control points - 1)
    #[inline]
    pub fn degree(&self) -> usize {
        self.len - 1
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.len]
    }

    #[inline]
    pub fn first(&self) -> Vec2 {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> Vec2 {
        self.points[self.len - 1]
    }

    /// Replace a control point. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Vec2) {
        if index < self.len {
            self.points[index] = point;
        }
    }

    /// Evaluate by repeated linear interpolation
    pub fn de_casteljau(&self, t: f32) -> Vec2 {
        let mut work = self.points;
        for level in (1..self.len).rev() {
            for i in 0..level {
                work[i] = work[i].lerp(work[i + 1], t);
            }
        }
        work[0]
    }

    /// Evaluate the Bernstein polynomial directly
    pub fn bernstein(&self, t: f32) -> Vec2 {
        let k = self.degree();
        let u = 1.0 - t;
        let weights = &BINOMIALS[k];

        self.points()
            .iter()
            .enumerate()
            .map(|(i, p)| *p * (weights[i] * u.powi((k - i) as i32) * t.powi(i as i32)))
            .fold(Vec2::ZERO, |acc, p| acc + p)
    }

    /// Evaluate with the chosen algorithm
    #[inline]
    pub fn point(&self, t: f32, eval: Evaluation) -> Vec2 {
        match eval {
            Evaluation::DeCasteljau => self.de_casteljau(t),
            Evaluation::Bernstein => self.bernstein(t),
        }
    }

    /// Sample `segments + 1` evenly spaced points (at least 2 segments)
    pub fn sample(&self, segments: usize, eval: Evaluation) -> Vec<Vec2> {
        let segments = segments.max(2);
        (0..=segments)
            .map(|i| {
                let t = i as f32 / segments as f32;
                self.point(t, eval)
            })
            .collect()
    }

    /// Consecutive sample pairs, one per line piece
    pub fn polyline(&self, segments: usize, eval: Evaluation) -> Vec<(Vec2, Vec2)> {
        self.sample(segments, eval)
            .windows(2)
            .map(|w| (w[0], w[1]))
            .collect()
    }

    /// Lines joining consecutive control points
    pub fn control_polygon(&self) -> Vec<(Vec2, Vec2)> {
        self.points().windows(2).map(|w| (w[0], w[1])).collect()
    }
}

impl Default for Bezier {
    /// An S-shaped cubic spanning the default viewport
    fn default() -> Self {
        Self::cubic(
            Vec2::new(-0.9, -0.5),
            Vec2::new(-0.3, 0.8),
            Vec2::new(0.3, -0.8),
            Vec2::new(0.9, 0.5),
        )
    }
}

impl TryFrom<Vec<Vec2>> for Bezier {
    type Error = SimError;

    fn try_from(points: Vec<Vec2>) -> Result<Self, Self::Error> {
        Self::from_points(&points)
    }
}

impl From<Bezier> for Vec<Vec2> {
    fn from(curve: Bezier) -> Self {
        curve.points().to_vec()
    }
}

/// Default sample count for rendering
pub fn default_samples(curve: &Bezier) -> Vec<Vec2> {
    curve.sample(CURVE_SEGMENTS, Evaluation::DeCasteljau)
}
