//! 2D canvas sink (browser only)

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::RenderSink;
use crate::assets::ImageHandle;

/// Particle fill color (RGB, alpha comes from particle age)
const PARTICLE_RGB: (u8, u8, u8) = (255, 0, 0);

pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    /// Indexed by `ImageHandle`
    images: Vec<HtmlImageElement>,
    width: f64,
    height: f64,
}

impl CanvasSink {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        images: Vec<HtmlImageElement>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            ctx,
            images,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl RenderSink for CanvasSink {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_image(&mut self, handle: ImageHandle, x: f32, y: f32) {
        let Some(img) = self.images.get(handle.0 as usize) else {
            log::warn!("Draw with unknown image handle {:?}", handle);
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element(img, x as f64, y as f64)
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
        let (r, g, b) = PARTICLE_RGB;
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.close_path();
        self.ctx
            .set_fill_style_str(&format!("rgba({}, {}, {}, {})", r, g, b, alpha));
        self.ctx.fill();
    }
}
