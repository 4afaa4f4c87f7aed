//! Short-lived particle burst
//!
//! Particles are entities with a fixed maximum age, spawned a few per tick at
//! an origin and rendered as circles that fade out as they age.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityConfig};
use super::region::Region;
use crate::consts::{PARTICLE_MAX_AGE, PARTICLES_PER_TICK};
use crate::renderer::RenderSink;

/// A fading circle
#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Entity,
    pub radius: f32,
}

impl Particle {
    /// Opacity, decaying linearly from 1 at birth to 0 at `max_age`
    pub fn alpha(&self) -> f32 {
        (1.0 - self.body.life_fraction()).clamp(0.0, 1.0)
    }
}

/// Spawn parameters; integer ranges are inclusive on both ends
#[derive(Debug, Clone)]
pub struct ParticleConfig {
    /// Population cap
    pub max_particles: usize,
    /// Particles spawned per tick while under the cap
    pub generation_rate: usize,
    pub max_age: f32,
    pub radius: (i32, i32),
    pub velocity_x: (i32, i32),
    pub velocity_y: (i32, i32),
    /// Spawn point; `None` spawns at the center of the bounds
    pub origin: Option<Vec2>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 25,
            generation_rate: PARTICLES_PER_TICK,
            max_age: PARTICLE_MAX_AGE,
            radius: (1, 4),
            velocity_x: (-50, 50),
            velocity_y: (-50, 0),
            origin: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub config: ParticleConfig,
    pub bounds: Region,
    particles: Vec<Particle>,
}

/// Uniform integer draw over an inclusive range, tolerating reversed bounds
fn draw<R: Rng>(rng: &mut R, (a, b): (i32, i32)) -> f32 {
    rng.random_range(a.min(b)..=a.max(b)) as f32
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig, bounds: Region) -> Self {
        let capacity = config.max_particles;
        Self {
            config,
            bounds,
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Spawn up to `generation_rate` particles without exceeding the cap
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = self.config.generation_rate.min(room);
        let origin = self.config.origin.unwrap_or_else(|| self.bounds.center());

        for _ in 0..count {
            let particle = self.create(origin, rng);
            self.particles.push(particle);
        }
    }

    fn create<R: Rng>(&self, origin: Vec2, rng: &mut R) -> Particle {
        let radius = draw(rng, self.config.radius);
        let velocity = Vec2::new(
            draw(rng, self.config.velocity_x),
            draw(rng, self.config.velocity_y),
        );
        Particle {
            body: Entity::new(EntityConfig {
                position: origin,
                velocity,
                max_age: Some(self.config.max_age),
                bounds: self.bounds,
                ..Default::default()
            }),
            radius,
        }
    }

    /// Add an already built particle, respecting the cap. Returns false if full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.config.max_particles {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Integrate every particle, then drop the expired ones. Returns how many
    /// were removed.
    pub fn update(&mut self, elapsed: f32) -> usize {
        for particle in &mut self.particles {
            particle.body.integrate(elapsed);
        }

        let before = self.particles.len();
        self.particles.retain(|p| !p.body.is_expired());
        before - self.particles.len()
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        for p in &self.particles {
            sink.draw_circle(p.body.position, p.radius, p.alpha());
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
