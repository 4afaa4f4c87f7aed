//! Drawing sink abstraction
//!
//! The simulation issues draw calls through [`RenderSink`] during the render
//! phase only. `DrawList` records them (tests, headless runs); `CanvasSink`
//! forwards them to a 2D canvas in the browser.

use glam::Vec2;

use crate::assets::ImageHandle;

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCommand, DrawList};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;

pub trait RenderSink {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Draw an image with its top-left corner at (x, y)
    fn draw_image(&mut self, handle: ImageHandle, x: f32, y: f32);

    /// Fill a circle; `alpha` is in `[0, 1]`
    fn draw_circle(&mut self, center: Vec2, radius: f32, alpha: f32);
}
