//! Ordered stack of parallax layers

use rand::Rng;

use super::layer::Layer;
use crate::renderer::RenderSink;

#[derive(Debug, Clone, Default)]
pub struct Background {
    layers: Vec<Layer>,
}

impl Background {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Scroll every layer, then cycle any that left the region (in layer order)
    pub fn update<R: Rng>(&mut self, elapsed: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.update(elapsed);
            layer.check_boundaries(rng);
        }
    }

    /// Layers drawn behind everything else
    pub fn render_back(&self, sink: &mut dyn RenderSink) {
        for layer in self.layers.iter().filter(|l| !l.is_foreground) {
            layer.render(sink);
        }
    }

    /// Layers drawn over everything else
    pub fn render_front(&self, sink: &mut dyn RenderSink) {
        for layer in self.layers.iter().filter(|l| l.is_foreground) {
            layer.render(sink);
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}
