//! Rendering sink
//!
//! The game never draws pixels itself. It emits draw calls into a
//! [`Renderer`], which the host toolkit implements. [`DrawList`] records
//! the calls instead, for headless runs and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;
use crate::sim::BoundingRect;

/// Screen dimensions used for layout and bounds clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// A `size` box centered on screen
    pub fn centered_box(&self, size: Vec2) -> BoundingRect {
        BoundingRect::from_pos_size(self.center() - size * 0.5, size)
    }
}

/// Draw-call sink implemented by the host toolkit
pub trait Renderer {
    fn draw_sprite(&mut self, texture: &Texture, pos: Vec2);
    /// Filled box with a border
    fn draw_box(&mut self, rect: BoundingRect);
    /// Outline only (debug overlays)
    fn draw_border(&mut self, rect: BoundingRect);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2);
    fn draw_centered_text(&mut self, text: &str, pos: Vec2);
}

/// Text just above an actor's top-left corner
pub fn draw_prompt_at(renderer: &mut dyn Renderer, text: &str, actor_pos: Vec2) {
    renderer.draw_text(text, Vec2::new(actor_pos.x, actor_pos.y - 10.0));
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { handle: u32, pos: Vec2 },
    Box(BoundingRect),
    Border(BoundingRect),
    Circle { center: Vec2, radius: f32 },
    Text { text: String, pos: Vec2 },
    CenteredText { text: String, pos: Vec2 },
}

/// Renderer that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } | DrawCommand::CenteredText { text, .. } => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl Renderer for DrawList {
    fn draw_sprite(&mut self, texture: &Texture, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite {
            handle: texture.handle,
            pos,
        });
    }

    fn draw_box(&mut self, rect: BoundingRect) {
        self.commands.push(DrawCommand::Box(rect));
    }

    fn draw_border(&mut self, rect: BoundingRect) {
        self.commands.push(DrawCommand::Border(rect));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }

    fn draw_centered_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::CenteredText {
            text: text.to_string(),
            pos,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box() {
        let vp = Viewport::new(1000.0, 550.0);
        let b = vp.centered_box(Vec2::new(200.0, 100.0));
        assert_eq!(b, BoundingRect::new(400.0, 225.0, 200.0, 100.0));
    }

    #[test]
    fn test_prompt_sits_above_actor() {
        let mut list = DrawList::new();
        draw_prompt_at(&mut list, "hi", Vec2::new(200.0, 200.0));
        assert_eq!(
            list.commands,
            vec![DrawCommand::Text {
                text: "hi".into(),
                pos: Vec2::new(200.0, 190.0)
            }]
        );
        assert_eq!(list.texts(), vec!["hi"]);
    }
}
