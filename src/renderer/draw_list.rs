//! Recording sink

use glam::Vec2;

use super::RenderSink;
use crate::assets::ImageHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image { handle: ImageHandle, x: f32, y: f32 },
    Circle { center: Vec2, radius: f32, alpha: f32 },
}

/// Collects draw calls in issue order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent `clear`
    pub fn last_frame(&self) -> &[DrawCommand] {
        match self.commands.iter().rposition(|c| *c == DrawCommand::Clear) {
            Some(i) => &self.commands[i + 1..],
            None => &self.commands,
        }
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderSink for DrawList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, handle: ImageHandle, x: f32, y: f32) {
        self.commands.push(DrawCommand::Image { handle, x, y });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            alpha,
        });
    }
}
