//! A single field particle and its per-frame motion rules.

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::systems::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Created at mount, lives for the whole session.
    Drift,
    /// Spawned by a click.
    Burst,
}

/// Pointer attraction parameters, copied out of `FieldConfig` once per field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub attract_radius: f32,
    pub release_radius: f32,
    pub orbit_radius: f32,
    pub gain: f32,
}

impl From<&FieldConfig> for Attraction {
    fn from(config: &FieldConfig) -> Self {
        Self {
            attract_radius: config.attract_radius,
            release_radius: config.release_radius,
            orbit_radius: config.orbit_radius,
            gain: config.attraction_gain,
        }
    }
}

impl Default for Attraction {
    fn default() -> Self {
        Self::from(&FieldConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Drift velocity used whenever the particle is not following.
    pub base_velocity: Vec2,
    pub following: bool,
    pub color: Color,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(position: Vec2, base_velocity: Vec2, size: f32, color: Color, kind: ParticleKind) -> Self {
        Particle {
            position,
            velocity: Vec2::ZERO,
            base_velocity,
            following: false,
            color,
            size,
            kind,
        }
    }

    /// Advance one frame: hysteresis, steering, integration, wrap.
    pub fn tick(&mut self, pointer: Vec2, attraction: &Attraction, bounds: Vec2) {
        let to_pointer = pointer - self.position;
        let distance = to_pointer.length();

        if distance < attraction.attract_radius {
            self.following = true;
        } else if distance > attraction.release_radius {
            self.following = false;
        }

        self.velocity = if self.following {
            // Positive when outside the orbit (pull in), negative inside (push out).
            let offset = distance - attraction.orbit_radius;
            to_pointer / distance.max(0.001) * offset * attraction.gain
        } else {
            self.base_velocity
        };

        self.position += self.velocity;
        self.position = wrap_position(self.position, bounds);
    }
}

/// Toroidal wrap of one coordinate into [0, extent).
/// A non-positive extent collapses everything onto 0.
pub fn wrap(value: f32, extent: f32) -> f32 {
    if !(extent > 0.0) {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative value rounds up to `extent` itself.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

pub fn wrap_position(position: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap(position.x, bounds.x), wrap(position.y, bounds.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn drifter(position: Vec2, base_velocity: Vec2) -> Particle {
        Particle::new(position, base_velocity, 1.2, Color::WHITE, ParticleKind::Drift)
    }

    #[test]
    fn far_particle_drifts_and_wraps_bottom_to_top() {
        let mut p = drifter(Vec2::new(400.0, 600.0), Vec2::new(0.0, 0.3));
        p.tick(Vec2::new(400.0, 300.0), &Attraction::default(), BOUNDS);
        assert!(!p.following);
        assert_eq!(p.velocity, Vec2::new(0.0, 0.3));
        assert_eq!(p.position.x, 400.0);
        assert!((p.position.y - 0.3).abs() < 1e-3, "y was {}", p.position.y);
    }

    #[test]
    fn close_particle_is_pushed_out_toward_orbit() {
        // Distance 50 from the pointer: follows, and the orbit offset is -200.
        let mut p = drifter(Vec2::new(400.0, 350.0), Vec2::new(0.0, 0.3));
        p.tick(Vec2::new(400.0, 300.0), &Attraction::default(), BOUNDS);
        assert!(p.following);
        assert!((p.velocity - Vec2::new(0.0, 10.0)).length() < 1e-4);
        assert!((p.position - Vec2::new(400.0, 360.0)).length() < 1e-3);
    }

    #[test]
    fn outside_orbit_is_pulled_in() {
        // Distance 240 sits inside the hysteresis band, so it keeps following.
        let mut p = drifter(Vec2::new(640.0, 300.0), Vec2::ZERO);
        p.following = true;
        let attraction = Attraction { orbit_radius: 200.0, ..Attraction::default() };
        p.tick(Vec2::new(400.0, 300.0), &attraction, BOUNDS);
        assert!(p.following);
        // offset = 240 - 200 = 40 -> speed 2 toward the pointer (negative x).
        assert!((p.velocity - Vec2::new(-2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn hysteresis_band_keeps_previous_state() {
        let pointer = Vec2::new(400.0, 300.0);
        let attraction = Attraction { gain: 0.0, ..Attraction::default() };

        let mut idle = drifter(Vec2::new(625.0, 300.0), Vec2::ZERO);
        idle.tick(pointer, &attraction, BOUNDS);
        assert!(!idle.following, "225 is inside the band; must not start following");

        let mut follower = drifter(Vec2::new(625.0, 300.0), Vec2::ZERO);
        follower.following = true;
        follower.tick(pointer, &attraction, BOUNDS);
        assert!(follower.following, "225 is inside the band; must not release");
    }

    #[test]
    fn release_beyond_outer_radius() {
        let mut p = drifter(Vec2::new(660.0, 300.0), Vec2::new(0.1, 0.0));
        p.following = true;
        p.tick(Vec2::new(400.0, 300.0), &Attraction::default(), BOUNDS);
        assert!(!p.following);
        assert_eq!(p.velocity, Vec2::new(0.1, 0.0));
    }

    #[test]
    fn particle_on_pointer_does_not_produce_nan() {
        let mut p = drifter(Vec2::new(100.0, 100.0), Vec2::ZERO);
        p.tick(Vec2::new(100.0, 100.0), &Attraction::default(), BOUNDS);
        assert!(p.following);
        assert!(p.position.is_finite());
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn wrap_handles_both_edges() {
        assert_eq!(wrap(-1.0, 800.0), 799.0);
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(-1e-9, 800.0), 0.0);
        assert_eq!(wrap(1650.0, 800.0), 50.0);
        assert_eq!(wrap(12.0, 0.0), 0.0);
    }
}
