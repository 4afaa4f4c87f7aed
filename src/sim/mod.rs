//! Seeded simulation module
//!
//! All movement logic lives here. This module stays free of platform code:
//! - Measured elapsed time, no fixed timestep
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every collection)
//! - Drawing only through the `RenderSink` trait

pub mod background;
pub mod entity;
pub mod layer;
pub mod particles;
pub mod region;
pub mod state;
pub mod tick;

pub use background::Background;
pub use entity::{Entity, EntityConfig};
pub use layer::{FrameOrder, Layer, LayerConfig};
pub use particles::{Particle, ParticleConfig, ParticleSystem};
pub use region::Region;
pub use state::SimulationState;
pub use tick::{TickInput, render, tick, update};
