//! Point-mass bodies and their kinematic integrator

use glam::Vec2;

use super::region::Region;

/// Construction parameters for an [`Entity`]
#[derive(Debug, Clone)]
pub struct EntityConfig {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Divides every applied force and impulse (must be > 0)
    pub mass: f32,
    pub width: f32,
    pub height: f32,
    /// Age in seconds after which the entity may be removed
    pub max_age: Option<f32>,
    pub bounds: Region,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            width: 0.0,
            height: 0.0,
            max_age: None,
            bounds: Region::default(),
        }
    }
}

/// A physically simulated body
#[derive(Debug, Clone)]
pub struct Entity {
    /// Top-left corner of the bounding box
    pub position: Vec2,
    pub velocity: Vec2,
    /// Accumulated force for the current step, cleared by every step
    pub acceleration: Vec2,
    pub mass: f32,
    pub width: f32,
    pub height: f32,
    pub age: f32,
    pub max_age: Option<f32>,
    pub bounds: Region,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(EntityConfig::default())
    }
}

impl Entity {
    pub fn new(config: EntityConfig) -> Self {
        Self {
            position: config.position,
            velocity: config.velocity,
            acceleration: Vec2::ZERO,
            mass: config.mass,
            width: config.width,
            height: config.height,
            age: 0.0,
            max_age: config.max_age,
            bounds: config.bounds,
        }
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: Vec2, scale: f32) {
        self.acceleration += force * scale / self.mass;
    }

    /// Change velocity instantly
    pub fn apply_impulse(&mut self, impulse: Vec2, scale: f32) {
        self.velocity += impulse * scale / self.mass;
    }

    /// Advance by `elapsed` seconds, then clamp into `bounds`
    pub fn integrate(&mut self, elapsed: f32) {
        self.step(elapsed);
        self.clamp_to_bounds();
    }

    /// Semi-implicit Euler step without any boundary handling
    pub fn step(&mut self, elapsed: f32) {
        self.velocity += self.acceleration * elapsed;
        self.position += self.velocity * elapsed;
        self.acceleration = Vec2::ZERO;
        self.age += elapsed;
    }

    /// Snap the box back inside `bounds`.
    ///
    /// Touching an edge drops the pending acceleration but keeps velocity, so
    /// bodies slide along walls instead of sticking to them.
    pub fn clamp_to_bounds(&mut self) {
        let b = self.bounds;
        if self.position.x < b.left {
            self.position.x = b.left;
            self.acceleration = Vec2::ZERO;
        }
        if self.position.x + self.width > b.right() {
            self.position.x = b.right() - self.width;
            self.acceleration = Vec2::ZERO;
        }
        if self.position.y < b.top {
            self.position.y = b.top;
            self.acceleration = Vec2::ZERO;
        }
        if self.position.y + self.height > b.bottom() {
            self.position.y = b.bottom() - self.height;
            self.acceleration = Vec2::ZERO;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.max_age.is_some_and(|max| self.age > max)
    }

    /// Fraction of `max_age` consumed (0 for entities that never expire)
    pub fn life_fraction(&self) -> f32 {
        match self.max_age {
            Some(max) if max > 0.0 => self.age / max,
            _ => 0.0,
        }
    }
}
