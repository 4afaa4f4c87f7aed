//! Parallax layers
//!
//! A layer is a horizontal strip of interchangeable frames riding on an
//! [`Entity`]. Two frames are drawn side by side; once the strip has scrolled
//! fully past the left edge of its region, the next frame becomes the current
//! one and the strip is re-anchored one width to the right.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityConfig};
use super::region::Region;
use crate::assets::ImageHandle;
use crate::consts::{LAYER_DEPTH_IMPULSE, LAYER_WIDTH};
use crate::renderer::RenderSink;

/// How the frame after the next one is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrder {
    /// Uniform draw over all frames (may repeat)
    #[default]
    Random,
    /// Cycle through frames in order
    Sequential,
}

/// Construction parameters for a [`Layer`]
#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub frames: Vec<ImageHandle>,
    /// Scales the launch impulse; deeper layers scroll faster
    pub depth: f32,
    pub order: FrameOrder,
    /// Drawn after every other entity instead of before
    pub is_foreground: bool,
    pub width: f32,
    pub height: f32,
    pub start_frame: usize,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            depth: 1.0,
            order: FrameOrder::Random,
            is_foreground: false,
            width: LAYER_WIDTH,
            height: 0.0,
            start_frame: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub body: Entity,
    frames: Vec<ImageHandle>,
    pub depth: f32,
    pub order: FrameOrder,
    pub is_foreground: bool,
    current_frame: usize,
    next_frame: usize,
}

impl Layer {
    /// Build a layer clamped to `bounds`. Returns `None` when `frames` is empty.
    pub fn new<R: Rng>(config: LayerConfig, bounds: Region, rng: &mut R) -> Option<Self> {
        if config.frames.is_empty() {
            return None;
        }

        let body = Entity::new(EntityConfig {
            position: Vec2::new(bounds.left, bounds.top),
            width: config.width,
            height: config.height,
            bounds,
            ..Default::default()
        });

        let current_frame = config.start_frame.min(config.frames.len() - 1);
        let mut layer = Self {
            body,
            frames: config.frames,
            depth: config.depth,
            order: config.order,
            is_foreground: config.is_foreground,
            current_frame,
            next_frame: current_frame,
        };
        layer.next_frame = layer.pick_next_frame(rng);
        Some(layer)
    }

    /// Give the layer its constant scroll velocity
    pub fn launch(&mut self, scale: f32) {
        self.body
            .apply_impulse(Vec2::new(self.depth * LAYER_DEPTH_IMPULSE, 0.0), scale);
    }

    /// Scroll by the current velocity. Layers wrap rather than clamp.
    pub fn update(&mut self, elapsed: f32) {
        self.body.step(elapsed);
    }

    /// Cycle frames if the strip has left the region. Returns true on a cycle.
    pub fn check_boundaries<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.body.position.x + self.body.width < self.body.bounds.left {
            self.advance(rng);
            true
        } else {
            false
        }
    }

    /// Promote the next frame and re-anchor the strip, keeping residual offset
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.current_frame = self.next_frame;
        self.next_frame = self.pick_next_frame(rng);
        self.body.position.x += self.body.width;
        log::debug!(
            "Layer depth {} cycled to frame {} (next {})",
            self.depth,
            self.current_frame,
            self.next_frame
        );
    }

    fn pick_next_frame<R: Rng>(&self, rng: &mut R) -> usize {
        match self.order {
            FrameOrder::Random => rng.random_range(0..self.frames.len()),
            FrameOrder::Sequential => (self.next_frame + 1) % self.frames.len(),
        }
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        let pos = self.body.position;
        sink.draw_image(self.frames[self.current_frame], pos.x, pos.y);
        sink.draw_image(self.frames[self.next_frame], pos.x + self.body.width, pos.y);
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    pub fn frames(&self) -> &[ImageHandle] {
        &self.frames
    }
}
