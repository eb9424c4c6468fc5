//! The particle field: drift particles, pointer attraction, proximity links
//! and click bursts over a toroidal surface.

mod particle;

pub use particle::{wrap, wrap_position, Attraction, Particle, ParticleKind};

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::input::queue::InputEvent;
use crate::renderer::surface::{DrawSurface, LinearGradient};
use crate::systems::color::{self, Color};
use crate::systems::rng::Rng;

/// A line between two following particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Number of drift particles for a surface: one per `area_per_particle`.
pub fn particle_count(width: f32, height: f32, area_per_particle: f32) -> usize {
    if !(width > 0.0) || !(height > 0.0) || !(area_per_particle > 0.0) {
        return 0;
    }
    (width as f64 * height as f64 / area_per_particle as f64).floor() as usize
}

pub struct ParticleField {
    config: FieldConfig,
    attraction: Attraction,
    bounds: Vec2,
    pointer: Vec2,
    rng: Rng,
    drift: Vec<Particle>,
    /// Oldest first, so eviction pops from the front.
    bursts: VecDeque<Particle>,
}

impl ParticleField {
    /// Build a field of `width` x `height` and seed its drift particles.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        let mut field = ParticleField {
            attraction: Attraction::from(&config),
            rng: Rng::new(config.seed),
            bounds: Vec2::new(width.max(0.0), height.max(0.0)),
            pointer: Vec2::ZERO,
            drift: Vec::new(),
            bursts: VecDeque::new(),
            config,
        };
        field.seed_drift();
        field
    }

    fn seed_drift(&mut self) {
        let count = particle_count(self.bounds.x, self.bounds.y, self.config.area_per_particle);
        let (min_speed, max_speed) = self.config.drift_speed;
        self.drift.reserve(count);
        for _ in 0..count {
            let position = Vec2::new(
                self.rng.next_f32() * self.bounds.x,
                self.rng.next_f32() * self.bounds.y,
            );
            let angle = self.rng.next_f32() * TAU;
            let speed = self.rng.range(min_speed, max_speed);
            self.drift.push(Particle::new(
                position,
                Vec2::from_angle(angle) * speed,
                self.config.particle_size,
                self.config.particle_color,
                ParticleKind::Drift,
            ));
        }
        log::debug!(
            "particle field {}x{}: seeded {} drift particles",
            self.bounds.x,
            self.bounds.y,
            count
        );
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Record the pointer position. Takes effect on the next frame.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Spawn a radial burst at (x, y). Returns how many of the new particles
    /// are still retained after the burst cap is applied.
    pub fn on_click(&mut self, x: f32, y: f32) -> usize {
        let burst = &self.config.burst;
        if !burst.enabled || burst.count == 0 {
            return 0;
        }

        let origin = Vec2::new(x, y);
        let step = TAU / burst.count as f32;
        for i in 0..burst.count {
            let speed = self.rng.range(burst.speed.0, burst.speed.1);
            let color = color::pick(&burst.palette, &mut self.rng).unwrap_or(self.config.particle_color);
            let size = self.rng.range(burst.size.0, burst.size.1);
            let velocity = Vec2::from_angle(i as f32 * step) * speed;
            self.bursts
                .push_back(Particle::new(origin, velocity, size, color, ParticleKind::Burst));
        }

        if let Some(max) = burst.max_particles {
            let excess = self.bursts.len().saturating_sub(max);
            if excess > 0 {
                self.bursts.drain(..excess);
                log::debug!("evicted {} oldest burst particles", excess);
            }
        }
        log::debug!("burst at ({}, {}): {} burst particles live", x, y, self.bursts.len());
        // The new burst sits at the back, so only a cap below `count` can trim it.
        (burst.count as usize).min(self.bursts.len())
    }

    /// Change the surface size. Particles are kept and re-wrap on the next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::Click { x, y } => {
                self.on_click(x, y);
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Update every particle, then repaint the whole frame onto `surface`.
    pub fn advance_frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.draw(surface);
    }

    /// Move every particle one frame without drawing.
    pub fn step(&mut self) {
        let (pointer, bounds) = (self.pointer, self.bounds);
        let attraction = self.attraction;
        for p in self.drift.iter_mut().chain(self.bursts.iter_mut()) {
            p.tick(pointer, &attraction, bounds);
        }
    }

    /// Paint background, particles, then links.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let background = &self.config.background;
        surface.fill_background(&LinearGradient::corner_to_corner(
            self.bounds.x,
            self.bounds.y,
            background.start,
            background.end,
        ));

        for p in self.particles() {
            surface.fill_circle(p.position, p.size, p.color);
        }

        for link in self.links() {
            surface.stroke_line(link.from, link.to, self.link_color(link.alpha));
        }
    }

    fn link_color(&self, alpha: f32) -> Color {
        self.config.link_color.with_alpha(alpha)
    }

    /// One link per unordered pair of following particles closer than
    /// `link_distance`, fading linearly with distance.
    pub fn links(&self) -> Vec<Link> {
        let max_distance = self.config.link_distance;
        let max_alpha = self.config.link_max_alpha;
        let following: Vec<Vec2> = self
            .particles()
            .filter(|p| p.following)
            .map(|p| p.position)
            .collect();

        let mut links = Vec::new();
        for (i, &a) in following.iter().enumerate() {
            for &b in &following[i + 1..] {
                let d = a.distance(b);
                if d < max_distance {
                    links.push(Link {
                        from: a,
                        to: b,
                        alpha: max_alpha * (1.0 - d / max_distance),
                    });
                }
            }
        }
        links
    }

    /// Drift particles first, then bursts oldest to newest.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.drift.iter().chain(self.bursts.iter())
    }

    pub fn len(&self) -> usize {
        self.drift.len() + self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn drift_count(&self) -> usize {
        self.drift.len()
    }

    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Insert a particle directly, bypassing seeding and burst limits.
    pub fn insert(&mut self, particle: Particle) {
        match particle.kind {
            ParticleKind::Drift => self.drift.push(particle),
            ParticleKind::Burst => self.bursts.push_back(particle),
        }
    }

    /// Remove every particle, keeping bounds and pointer.
    pub fn clear(&mut self) {
        self.drift.clear();
        self.bursts.clear();
    }
}
