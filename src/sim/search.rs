//! Closest point on a Bezier curve by gradient descent
//!
//! The derivative of the squared distance is estimated with a forward
//! difference and `t` is clamped to [0, 1] after every step, so the estimate
//! can come to rest on a boundary. The loop runs the full iteration budget
//! with no convergence test, stopping early only if an update is not finite.
//! Near-cusp control polygons may leave residual error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bezier::Bezier;
use crate::consts::*;

/// Gradient descent tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Starting parameter
    pub initial_t: f32,
    /// Step size multiplier on the gradient
    pub learning_rate: f32,
    /// Fixed number of descent steps
    pub iterations: usize,
    /// Forward-difference step
    pub step: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            initial_t: SEARCH_INITIAL_T,
            learning_rate: SEARCH_LEARNING_RATE,
            iterations: SEARCH_ITERATIONS,
            step: SEARCH_STEP,
        }
    }
}

#[inline]
fn distance_sq(curve: &Bezier, t: f32, query: Vec2) -> f32 {
    curve.de_casteljau(t).distance_squared(query)
}

/// Parameter in [0, 1] of the curve point closest to `query`
pub fn closest_t(curve: &Bezier, query: Vec2, params: &SearchParams) -> f32 {
    let mut t = params.initial_t.clamp(0.0, 1.0);
    if t.is_nan() {
        t = SEARCH_INITIAL_T;
    }

    for _ in 0..params.iterations {
        let d0 = distance_sq(curve, t, query);
        let d1 = distance_sq(curve, t + params.step, query);
        let gradient = (d1 - d0) / params.step;
        let next = t - params.learning_rate * gradient;
        if !next.is_finite() {
            break;
        }
        t = next.clamp(0.0, 1.0);
    }

    t
}

/// Closest parameter and the matching curve point
pub fn closest_point(curve: &Bezier, query: Vec2, params: &SearchParams) -> (f32, Vec2) {
    let t = closest_t(curve, query, params);
    (t, curve.de_casteljau(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_cubic() -> Bezier {
        // Evenly spaced colinear control points: B(t) = (3t, 0)
        Bezier::cubic(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        )
    }

    #[test]
    fn test_midpoint_query() {
        let curve = straight_cubic();
        let query = curve.de_casteljau(0.5);
        let (t, point) = closest_point(&curve, query, &SearchParams::default());
        assert!((t - 0.5).abs() < 0.01);
        assert!(point.distance(query) < 0.01);
    }

    #[test]
    fn test_off_center_query_converges() {
        let curve = straight_cubic();
        let query = Vec2::new(0.9, 0.4);
        let (t, point) = closest_point(&curve, query, &SearchParams::default());
        // Exact answer is t = 0.3, point (0.9, 0)
        assert!((t - 0.3).abs() < 0.01, "t = {t}");
        assert!(point.distance(Vec2::new(0.9, 0.0)) < 0.03);
    }

    #[test]
    fn test_query_beyond_end_sticks_to_boundary() {
        let curve = straight_cubic();
        let t = closest_t(&curve, Vec2::new(10.0, 0.0), &SearchParams::default());
        assert_eq!(t, 1.0);
        let t = closest_t(&curve, Vec2::new(-10.0, 0.0), &SearchParams::default());
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_zero_iterations_returns_seed() {
        let params = SearchParams {
            iterations: 0,
            initial_t: 0.25,
            ..Default::default()
        };
        assert_eq!(closest_t(&Bezier::default(), Vec2::ZERO, &params), 0.25);
    }

    #[test]
    fn test_cusp_stays_in_range() {
        // Near-cusp control polygon; only the domain is guaranteed
        let curve = Bezier::cubic(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, 0.0),
        );
        for q in [Vec2::new(0.5, 0.6), Vec2::new(-3.0, 2.0), Vec2::new(0.5, 0.0)] {
            let t = closest_t(&curve, q, &SearchParams::default());
            assert!((0.0..=1.0).contains(&t));
        }
    }

    #[test]
    fn test_unusable_params_stay_in_range() {
        let curve = straight_cubic();
        for params in [
            SearchParams { step: 0.0, ..Default::default() },
            SearchParams { learning_rate: f32::NAN, ..Default::default() },
            SearchParams { learning_rate: f32::INFINITY, ..Default::default() },
            SearchParams { initial_t: f32::NAN, ..Default::default() },
        ] {
            let (t, point) = closest_point(&curve, Vec2::new(0.9, 0.4), &params);
            assert!((0.0..=1.0).contains(&t), "{params:?} gave t = {t}");
            assert!(point.is_finite());
        }
    }
}
