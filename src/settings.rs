//! Simulation settings and presets
//!
//! Loaded from JSON; every field falls back to its default when missing.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::bezier::{Bezier, Evaluation};
use crate::sim::search::SearchParams;
use crate::sim::segment::Segment;

/// Built-in simulation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SimMode {
    /// Air friction only
    #[default]
    Drift,
    /// Falling particles with friction
    Gravity,
    /// Particles pulled toward the pointer
    FollowPointer,
    /// Particles pulled toward a Bezier curve
    FollowCurve,
    /// Particles bouncing off a fixed set of segments
    Obstacles,
}

impl SimMode {
    pub const ALL: [SimMode; 5] = [
        SimMode::Drift,
        SimMode::Gravity,
        SimMode::FollowPointer,
        SimMode::FollowCurve,
        SimMode::Obstacles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimMode::Drift => "drift",
            SimMode::Gravity => "gravity",
            SimMode::FollowPointer => "follow-pointer",
            SimMode::FollowCurve => "follow-curve",
            SimMode::Obstacles => "obstacles",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drift" => Some(SimMode::Drift),
            "gravity" => Some(SimMode::Gravity),
            "follow-pointer" | "pointer" | "mouse" => Some(SimMode::FollowPointer),
            "follow-curve" | "curve" => Some(SimMode::FollowCurve),
            "obstacles" | "segments" => Some(SimMode::Obstacles),
            _ => None,
        }
    }
}

/// Region new particles appear in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnArea {
    /// `[-aspect, aspect] × [-1, 1]`
    Viewport,
    /// Uniform inside a disk
    Disk { center: Vec2, radius: f32 },
}

/// Ranges used when spawning particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub area: SpawnArea,
    /// Viewport aspect ratio (width / height), only used by `SpawnArea::Viewport`
    pub aspect_ratio: f32,
    /// Launch speed; direction is uniform over the circle
    pub speed: f32,
    pub mass_min: f32,
    pub mass_max: f32,
    pub lifespan_min: f32,
    pub lifespan_max: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            area: SpawnArea::Viewport,
            aspect_ratio: 1.0,
            speed: SPAWN_SPEED,
            mass_min: MASS_MIN,
            mass_max: MASS_MAX,
            lifespan_min: LIFESPAN_MIN,
            lifespan_max: LIFESPAN_MAX,
        }
    }
}

/// How particle age maps to color and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub ease_power: f32,
    /// Remaining lifetime over which the radius shrinks to zero
    pub radius_fade_time: f32,
    pub base_radius: f32,
    /// Floor for the on-screen radius
    pub min_radius: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            ease_power: EASE_POWER,
            radius_fade_time: RADIUS_FADE_TIME,
            base_radius: BASE_RADIUS,
            min_radius: 0.0,
        }
    }
}

/// Opt-in force terms; `None` disables a term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Drag coefficient: F = -v · k
    pub drag: Option<f32>,
    /// Gravity acceleration: F = g · m
    pub gravity: Option<Vec2>,
    /// Pointer spring strength: F = (pointer - x) · k
    pub pointer_attraction: Option<f32>,
    /// Curve pull: |F| = k / (k + distance), toward the closest curve point
    pub curve_attraction: Option<f32>,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            drag: Some(DRAG),
            gravity: None,
            pointer_attraction: None,
            curve_attraction: None,
        }
    }
}

/// Reference curve for curve following and rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub curve: Bezier,
    /// Control point that tracks the pointer, if any
    pub pointer_control: Option<usize>,
    pub search: SearchParams,
    /// Evaluator used when sampling for rendering
    pub evaluation: Evaluation,
    pub segments: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            curve: Bezier::default(),
            pointer_control: None,
            search: SearchParams::default(),
            evaluation: Evaluation::Bernstein,
            segments: CURVE_SEGMENTS,
        }
    }
}

/// Fixed segment and anchor; the probe line runs from the anchor to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub segment: Segment,
    pub anchor: Vec2,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            segment: Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)),
            anchor: Vec2::new(0.0, -0.75),
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Preset this config was built from. Only a label when loaded from JSON:
    /// the preset is applied by `from_mode`/`apply_mode`, never by deserialization.
    pub mode: SimMode,
    /// Particles per spawn batch
    pub particle_count: usize,
    /// Spawn a fresh batch once every particle has expired
    pub auto_reseed: bool,
    pub spawn: SpawnConfig,
    pub appearance: Appearance,
    pub forces: ForceConfig,
    pub curve: Option<CurveConfig>,
    pub obstacles: Vec<Segment>,
    pub probe: Option<ProbeConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimMode::Drift,
            particle_count: PARTICLE_COUNT,
            auto_reseed: false,
            spawn: SpawnConfig::default(),
            appearance: Appearance::default(),
            forces: ForceConfig::default(),
            curve: None,
            obstacles: Vec::new(),
            probe: None,
        }
    }
}

impl SimConfig {
    /// Create a config from a mode preset (applies preset defaults)
    pub fn from_mode(mode: SimMode) -> Self {
        let mut config = Self::default();
        config.apply_mode(mode);
        config
    }

    /// Apply a mode preset (updates force terms, curve and obstacles)
    pub fn apply_mode(&mut self, mode: SimMode) {
        self.mode = mode;
        self.forces = ForceConfig::default();
        self.curve = None;
        self.obstacles.clear();
        self.probe = None;

        match mode {
            SimMode::Drift => {}
            SimMode::Gravity => {
                self.forces.gravity = Some(Vec2::new(0.0, -GRAVITY));
            }
            SimMode::FollowPointer => {
                self.forces.pointer_attraction = Some(1.0);
            }
            SimMode::FollowCurve => {
                self.forces.curve_attraction = Some(1.0);
                self.curve = Some(CurveConfig {
                    pointer_control: Some(1),
                    ..Default::default()
                });
            }
            SimMode::Obstacles => {
                self.forces.gravity = Some(Vec2::new(0.0, -GRAVITY));
                self.forces.drag = Some(0.2);
                self.obstacles = vec![
                    Segment::new(Vec2::new(-1.0, -0.8), Vec2::new(1.0, -0.8)),
                    Segment::new(Vec2::new(-0.6, 0.0), Vec2::new(0.2, -0.4)),
                    Segment::new(Vec2::new(1.0, 0.3), Vec2::new(0.4, -0.1)),
                ];
                self.probe = Some(ProbeConfig::default());
            }
        }
    }

    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {} config from {}",
            config.mode.as_str(),
            path.as_ref().display()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the ranges every spawned particle and curve search relies on
    pub fn validate(&self) -> Result<(), SimError> {
        let s = &self.spawn;
        if !(s.mass_min > 0.0 && s.mass_min <= s.mass_max && s.mass_max.is_finite()) {
            return Err(SimError::InvalidMassRange {
                min: s.mass_min,
                max: s.mass_max,
            });
        }
        if !(s.lifespan_min > 0.0 && s.lifespan_min <= s.lifespan_max && s.lifespan_max.is_finite()) {
            return Err(SimError::InvalidLifespanRange {
                min: s.lifespan_min,
                max: s.lifespan_max,
            });
        }
        if !s.speed.is_finite() {
            return Err(SimError::InvalidSpeed(s.speed));
        }
        if !valid_aspect_ratio(s.aspect_ratio) {
            return Err(SimError::InvalidAspectRatio(s.aspect_ratio));
        }
        if let SpawnArea::Disk { center, radius } = s.area {
            // center + unit offset * radius must stay finite
            let reach = center.abs().max_element() + radius;
            if !(radius >= 0.0 && center.is_finite() && reach.is_finite()) {
                return Err(SimError::InvalidSpawnDisk { center, radius });
            }
        }
        if let Some(curve) = &self.curve {
            let p = &curve.search;
            if !(p.step > 0.0 && p.step.is_finite() && p.learning_rate.is_finite() && p.initial_t.is_finite()) {
                return Err(SimError::InvalidSearch {
                    step: p.step,
                    learning_rate: p.learning_rate,
                    initial_t: p.initial_t,
                });
            }
        }
        let power = self.appearance.ease_power;
        if !(power > 0.0 && power.is_finite()) {
            return Err(SimError::InvalidEasePower(power));
        }
        Ok(())
    }
}

/// Positive, and `[-aspect, aspect]` has a finite width
pub fn valid_aspect_ratio(aspect_ratio: f32) -> bool {
    aspect_ratio > 0.0 && (2.0 * aspect_ratio).is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in SimMode::ALL {
            assert_eq!(SimMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(SimMode::from_str("MOUSE"), Some(SimMode::FollowPointer));
        assert_eq!(SimMode::from_str("nope"), None);
    }

    #[test]
    fn test_presets_validate() {
        for mode in SimMode::ALL {
            let config = SimConfig::from_mode(mode);
            assert_eq!(config.mode, mode);
            assert!(config.validate().is_ok());
        }
        assert!(SimConfig::from_mode(SimMode::FollowCurve).curve.is_some());
        assert!(!SimConfig::from_mode(SimMode::Obstacles).obstacles.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "particle_count": 12, "forces": { "drag": 0.5 } }"#)
            .expect("valid config");
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.forces.drag, Some(0.5));
        assert_eq!(config.forces.gravity, None);
        assert_eq!(config.spawn, SpawnConfig::default());
    }

    #[test]
    fn test_curve_from_json() {
        let config = SimConfig::from_json(
            r#"{ "curve": { "curve": [[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]] } }"#,
        )
        .expect("valid config");
        let curve = config.curve.expect("curve set").curve;
        assert_eq!(curve.degree(), 2);

        let bad = SimConfig::from_json(r#"{ "curve": { "curve": [[0.0, 0.0]] } }"#);
        assert!(matches!(bad, Err(SimError::Json(_))));
    }

    #[test]
    fn test_json_round_trip_preset() {
        let config = SimConfig::from_mode(SimMode::Obstacles);
        let json = config.to_json().expect("serializable");
        assert_eq!(SimConfig::from_json(&json).expect("parses"), config);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let mut config = SimConfig::default();
        config.spawn.mass_min = 0.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidMassRange { .. })));

        let mut config = SimConfig::default();
        config.spawn.lifespan_min = 20.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidLifespanRange { .. })));

        let mut config = SimConfig::default();
        config.appearance.ease_power = -1.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidEasePower(_))));

        let mut config = SimConfig::default();
        config.spawn.speed = f32::NAN;
        assert!(matches!(config.validate(), Err(SimError::InvalidSpeed(_))));
    }

    #[test]
    fn test_rejects_zero_search_step() {
        let json = r#"{
            "forces": { "curve_attraction": 1.0 },
            "curve": { "curve": [[-1, 0], [0, 1], [1, 0]], "search": { "step": 0.0 } }
        }"#;
        assert!(matches!(
            SimConfig::from_json(json),
            Err(SimError::InvalidSearch { .. })
        ));

        let mut config = SimConfig::from_mode(SimMode::FollowCurve);
        if let Some(curve) = config.curve.as_mut() {
            curve.search.learning_rate = f32::INFINITY;
        }
        assert!(matches!(config.validate(), Err(SimError::InvalidSearch { .. })));

        let mut config = SimConfig::from_mode(SimMode::FollowCurve);
        if let Some(curve) = config.curve.as_mut() {
            curve.search.initial_t = f32::NAN;
        }
        assert!(matches!(config.validate(), Err(SimError::InvalidSearch { .. })));
    }

    #[test]
    fn test_rejects_huge_aspect_ratio() {
        let result = SimConfig::from_json(r#"{ "spawn": { "aspect_ratio": 3.0e38 } }"#);
        assert!(matches!(result, Err(SimError::InvalidAspectRatio(_))));

        let mut config = SimConfig::default();
        config.spawn.aspect_ratio = 0.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidAspectRatio(_))));
        assert!(valid_aspect_ratio(16.0 / 9.0));
    }

    #[test]
    fn test_rejects_bad_spawn_disk() {
        let mut config = SimConfig::default();
        config.spawn.area = SpawnArea::Disk {
            center: Vec2::ZERO,
            radius: -0.5,
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidSpawnDisk { .. })));

        config.spawn.area = SpawnArea::Disk {
            center: Vec2::ZERO,
            radius: f32::INFINITY,
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidSpawnDisk { .. })));

        config.spawn.area = SpawnArea::Disk {
            center: Vec2::new(f32::NAN, 0.0),
            radius: 0.1,
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidSpawnDisk { .. })));

        config.spawn.area = SpawnArea::Disk {
            center: Vec2::new(0.2, -0.3),
            radius: 0.0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_mode_is_only_a_label() {
        let config = SimConfig::from_json(r#"{ "mode": "gravity" }"#).expect("valid config");
        assert_eq!(config.mode, SimMode::Gravity);
        assert_eq!(config.forces, ForceConfig::default());
        assert_ne!(config.forces, SimConfig::from_mode(SimMode::Gravity).forces);
    }
}
