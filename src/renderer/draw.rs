//! Abstract draw commands
//!
//! A [`DrawList`] is what a platform backend rasterizes: coloured lines
//! (optionally thick, with a colour gradient between the ends) and text
//! runs in the vector font. Coordinates are playfield pixels.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::WIDTH;
use crate::sim::polar_offset;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level, clamped to 0..=255
    pub fn gray(level: i32) -> Self {
        let v = level.clamp(0, 255) as u8;
        Self::rgb(v, v, v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line {
        from: IVec2,
        to: IVec2,
        from_color: Color,
        to_color: Color,
        thick: bool,
    },
    Text {
        text: String,
        pos: IVec2,
        /// Glyph height in pixels
        size: i32,
        color: Color,
    },
}

/// Draw commands for one frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, from: IVec2, from_color: Color, to: IVec2, to_color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            from_color,
            to_color,
            thick: false,
        });
    }

    pub fn thick_line(&mut self, from: IVec2, from_color: Color, to: IVec2, to_color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            from_color,
            to_color,
            thick: true,
        });
    }

    /// Line between two polar points around `centre`, both rotated by `angle`
    pub fn segment(
        &mut self,
        (r1, a1): (i32, i32),
        c1: Color,
        (r2, a2): (i32, i32),
        c2: Color,
        centre: IVec2,
        angle: i32,
    ) {
        let (x1, y1) = polar_offset(r1, a1 + angle);
        let (x2, y2) = polar_offset(r2, a2 + angle);
        self.line(centre + IVec2::new(x1, y1), c1, centre + IVec2::new(x2, y2), c2);
    }

    pub fn text(&mut self, text: impl Into<String>, pos: IVec2, size: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
        });
    }

    /// Text centred horizontally, allowing three pixels of spacing per glyph
    pub fn centered_text(&mut self, text: &str, y: i32, size: i32, color: Color) {
        let width = text.len() as i32 * (size + 3);
        self.text(text, IVec2::new((WIDTH - width) / 2, y), size, color);
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

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text runs in order, for tests and logging
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Line { .. } => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}
