//! Parallax Swarm - a pointer-chasing swarm over a scrolling backdrop
//!
//! Core modules:
//! - `vector`: Stateless 2D vector helpers
//! - `sim`: Seeded simulation (entities, parallax layers, particles, tick)
//! - `app`: Start/stop controller driven by the host's frame scheduler
//! - `renderer`: Drawing sink abstraction and its canvas/recording backends
//! - `platform`: Frame scheduling and resource loading collaborators
//! - `settings`: Data-driven configuration

pub mod app;
pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod vector;

pub use app::{App, InputEvent, LoopEvent, LoopState};
pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Default viewport, matching the initial canvas size
    pub const VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_HEIGHT: f32 = 540.0;

    /// Sprite box shared by the player and swarm objects
    pub const SPRITE_WIDTH: f32 = 37.0;
    pub const SPRITE_HEIGHT: f32 = 41.0;

    /// Impulse magnitude pulling each swarm object toward the pointer per tick
    pub const STEERING_IMPULSE: f32 = 10.0;

    /// Width of one parallax frame strip
    pub const LAYER_WIDTH: f32 = 960.0;
    /// Scroll impulse per unit of layer depth
    pub const LAYER_DEPTH_IMPULSE: f32 = 2.0;
    /// Scale applied to the launch impulse (negative scrolls left)
    pub const LAYER_LAUNCH_SCALE: f32 = -10.0;

    /// Particle defaults
    pub const PARTICLE_MAX_AGE: f32 = 1.0;
    pub const PARTICLES_PER_TICK: usize = 1;
}
