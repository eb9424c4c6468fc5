use serde::{Deserialize, Serialize};

use super::error::FieldError;
use crate::systems::color::Color;

/// Tuning for the particle field. Every field has a default, so an empty
/// JSON object `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for particle placement and burst colors.
    pub seed: u64,
    /// Canvas area (square pixels) per drift particle.
    pub area_per_particle: f32,
    /// Min/max drift speed, half-open.
    pub drift_speed: (f32, f32),
    /// Draw radius of drift particles.
    pub particle_size: f32,
    /// Fill color of drift particles.
    pub particle_color: Color,
    /// A particle starts following when closer than this to the pointer.
    pub attract_radius: f32,
    /// A following particle is released when farther than this.
    pub release_radius: f32,
    /// Distance from the pointer that following particles settle at.
    pub orbit_radius: f32,
    /// Velocity per unit of distance from the orbit.
    pub attraction_gain: f32,
    /// Following particles closer than this are linked.
    pub link_distance: f32,
    /// Link alpha at zero distance; fades linearly to 0 at `link_distance`.
    pub link_max_alpha: f32,
    pub link_color: Color,
    pub background: BackgroundConfig,
    pub burst: BurstConfig,
}

/// Corner-to-corner linear gradient behind the particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Color at the top-left corner.
    pub start: Color,
    /// Color at the bottom-right corner.
    pub end: Color,
}

/// Click bursts. Disabled, clicks are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub enabled: bool,
    /// Particles per click, spread at equal angles.
    pub count: u32,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub palette: Vec<Color>,
    /// Burst particles retained at once; oldest go first. `None` never evicts.
    pub max_particles: Option<usize>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            area_per_particle: 12_000.0,
            drift_speed: (0.2, 0.5),
            particle_size: 1.2,
            particle_color: Color::WHITE.with_alpha(0.8),
            attract_radius: 200.0,
            release_radius: 250.0,
            orbit_radius: 250.0,
            attraction_gain: 0.05,
            link_distance: 100.0,
            link_max_alpha: 0.2,
            link_color: Color::WHITE,
            background: BackgroundConfig::default(),
            burst: BurstConfig::default(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            start: Color::rgb(0x1a, 0x1a, 0x40),
            end: Color::BLACK,
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 20,
            speed: (2.0, 4.0),
            size: (2.0, 3.0),
            palette: vec![
                Color::rgb(0xff, 0x6e, 0xc7),
                Color::rgb(0x7d, 0xf9, 0xff),
                Color::rgb(0xff, 0xd7, 0x00),
                Color::rgb(0xb1, 0x9c, 0xd9),
            ],
            max_particles: Some(400),
        }
    }
}

impl FieldConfig {
    /// Upper bound on `burst.count`; one click allocates this many particles.
    pub const MAX_BURST_COUNT: u32 = 1000;

    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the simulation cannot run sensibly.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: String| -> Result<(), FieldError> { Err(FieldError::InvalidConfig(msg)) };

        if !(self.area_per_particle > 0.0) {
            return invalid(format!("area_per_particle must be positive, got {}", self.area_per_particle));
        }
        if !(self.attract_radius > 0.0) || !(self.link_distance > 0.0) {
            return invalid("attract_radius and link_distance must be positive".into());
        }
        if !(self.release_radius >= self.attract_radius) {
            return invalid(format!(
                "release_radius ({}) must not be below attract_radius ({})",
                self.release_radius, self.attract_radius
            ));
        }
        if !self.orbit_radius.is_finite() || !self.attraction_gain.is_finite() {
            return invalid("orbit_radius and attraction_gain must be finite".into());
        }
        check_range("drift_speed", self.drift_speed)?;
        if self.burst.enabled {
            if self.burst.count > Self::MAX_BURST_COUNT {
                return invalid(format!(
                    "burst.count ({}) exceeds {}",
                    self.burst.count,
                    Self::MAX_BURST_COUNT
                ));
            }
            if let Some(max) = self.burst.max_particles {
                if max < self.burst.count as usize {
                    return invalid(format!(
                        "burst.max_particles ({}) must hold a whole burst of {}",
                        max, self.burst.count
                    ));
                }
            }
            check_range("burst.speed", self.burst.speed)?;
            check_range("burst.size", self.burst.size)?;
            if self.burst.palette.is_empty() {
                return invalid("burst.palette must not be empty".into());
            }
        }
        Ok(())
    }
}

fn check_range(name: &str, (lo, hi): (f32, f32)) -> Result<(), FieldError> {
    if lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig(format!("{} range [{}, {}) is invalid", name, lo, hi)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = FieldConfig::from_json("{}").unwrap();
        assert_eq!(config, FieldConfig::default());
        assert_eq!(config.burst.count, 20);
        assert_eq!(config.burst.palette.len(), 4);
    }

    #[test]
    fn partial_override() {
        let json = r##"{
            "seed": 7,
            "particle_color": "#ff0000",
            "burst": { "enabled": false, "max_particles": null }
        }"##;
        let config = FieldConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.particle_color, Color::rgb(255, 0, 0));
        assert!(!config.burst.enabled);
        assert_eq!(config.burst.max_particles, None);
        assert_eq!(config.burst.count, 20);
        assert_eq!(config.attract_radius, 200.0);
    }

    #[test]
    fn inverted_hysteresis_rejected() {
        let json = r#"{ "attract_radius": 300, "release_radius": 250 }"#;
        let err = FieldConfig::from_json(json).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
    }

    #[test]
    fn empty_palette_rejected_only_when_bursts_enabled() {
        let mut config = FieldConfig::default();
        config.burst.palette.clear();
        assert!(config.validate().is_err());
        config.burst.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn burst_cap_below_count_rejected() {
        let json = r#"{ "burst": { "count": 50, "max_particles": 10 } }"#;
        let err = FieldConfig::from_json(json).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));

        let json = r#"{ "burst": { "count": 50, "max_particles": 50 } }"#;
        assert!(FieldConfig::from_json(json).is_ok());
    }

    #[test]
    fn oversized_burst_count_rejected() {
        let mut config = FieldConfig::default();
        config.burst.max_particles = None;
        config.burst.count = u32::MAX;
        assert!(matches!(config.validate(), Err(FieldError::InvalidConfig(_))));
        config.burst.count = FieldConfig::MAX_BURST_COUNT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_finite_attraction_rejected() {
        let mut config = FieldConfig::default();
        config.release_radius = f32::NAN;
        assert!(matches!(config.validate(), Err(FieldError::InvalidConfig(_))));

        let mut config = FieldConfig::default();
        config.orbit_radius = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.attraction_gain = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = FieldConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }

    #[test]
    fn bad_color_is_parse_error() {
        let err = FieldConfig::from_json(r#"{ "link_color": "blue" }"#).unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }
}
