//! Abstract 2D drawing surface
//!
//! The game never talks to a graphics backend directly. Hosts implement
//! [`Canvas`] over whatever they draw with; [`DrawList`] is the built-in
//! implementation that just records what was asked of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::sim::Rect;

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Text starts at the position
    #[default]
    Start,
    /// Text is centered on the position
    Center,
}

/// Minimal immediate-mode drawing capability
pub trait Canvas {
    /// Current drawable width
    fn width(&self) -> f32;
    /// Current drawable height
    fn height(&self) -> f32;

    /// Erase a region back to transparent
    fn clear(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Filled circle; `alpha` multiplies the global alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, font_size: f32, color: Color, align: TextAlign);
    /// Opacity applied to everything drawn until changed again
    fn set_global_alpha(&mut self, alpha: f32);
}

/// One recorded drawing call, with the effective opacity baked in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        rect: Rect,
    },
    FillRect {
        rect: Rect,
        color: Color,
        alpha: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    FillText {
        text: String,
        pos: Vec2,
        font_size: f32,
        color: Color,
        align: TextAlign,
        alpha: f32,
    },
}

/// Canvas that records commands instead of drawing them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawList {
    width: f32,
    height: f32,
    global_alpha: f32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            global_alpha: 1.0,
            commands: Vec::new(),
        }
    }

    /// Forget everything recorded so far (the global alpha is kept)
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Every string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { .. }))
            .count()
    }
}

impl Canvas for DrawList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear { rect });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            alpha: self.global_alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius: radius.max(0.0),
            color,
            alpha: (alpha * self.global_alpha).clamp(0.0, 1.0),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            pos,
            font_size,
            color,
            align,
            alpha: self.global_alpha,
        });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }
}
