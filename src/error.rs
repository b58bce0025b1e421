//! Error types for configuration and construction.
//!
//! The per-frame kernel never fails; these only surface when building a
//! simulation or a curve from caller-supplied data.

use std::fmt;

/// Errors raised while validating configuration or curve input.
#[derive(Debug)]
pub enum SimError {
    /// Mass range must satisfy 0 < min <= max.
    InvalidMassRange { min: f32, max: f32 },
    /// Lifespan range must satisfy 0 < min <= max.
    InvalidLifespanRange { min: f32, max: f32 },
    /// Ease power must be positive and finite.
    InvalidEasePower(f32),
    /// Spawn speed must be finite.
    InvalidSpeed(f32),
    /// Viewport aspect ratio must be positive with a finite spawn span.
    InvalidAspectRatio(f32),
    /// Spawn disk needs a finite center and a finite, non-negative radius.
    InvalidSpawnDisk { center: glam::Vec2, radius: f32 },
    /// Curve search needs a positive step and finite rate and seed.
    InvalidSearch { step: f32, learning_rate: f32, initial_t: f32 },
    /// A Bezier curve needs 2 to 4 control points.
    ControlPointCount(usize),
    /// Config could not be parsed.
    Json(serde_json::Error),
    /// Config file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMassRange { min, max } => {
                write!(f, "mass range [{}, {}] must be positive and ordered", min, max)
            }
            SimError::InvalidLifespanRange { min, max } => {
                write!(f, "lifespan range [{}, {}] must be positive and ordered", min, max)
            }
            SimError::InvalidEasePower(p) => write!(f, "ease power {} must be positive", p),
            SimError::InvalidSpeed(s) => write!(f, "spawn speed {} must be finite", s),
            SimError::InvalidAspectRatio(a) => {
                write!(f, "aspect ratio {} must be positive and finite", a)
            }
            SimError::InvalidSpawnDisk { center, radius } => {
                write!(f, "spawn disk at {} with radius {} must be finite", center, radius)
            }
            SimError::InvalidSearch {
                step,
                learning_rate,
                initial_t,
            } => write!(
                f,
                "curve search step {} must be positive, rate {} and start {} finite",
                step, learning_rate, initial_t
            ),
            SimError::ControlPointCount(n) => {
                write!(f, "bezier curve needs 2 to 4 control points, got {}", n)
            }
            SimError::Json(e) => write!(f, "invalid config: {}", e),
            SimError::Io(e) => write!(f, "could not read config: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Json(e) => Some(e),
            SimError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}
