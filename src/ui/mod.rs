//! Widgets and screens
//!
//! Layout is in court units (the 1000 × 500 court doubles as the screen).
//! Text occupies fixed-size glyph cells, so a widget's size follows from its
//! text, and the renderer maps one glyph cell to one terminal cell.

pub mod screens;
pub mod widgets;

pub use screens::{
    ControlsScreen, EndAction, EndScreen, PauseScreen, PlayAction, PlayScreen, StartAction,
    StartScreen,
};
pub use widgets::{Anchor, Animation, BoxState, Button, InputBox};

use glam::Vec2;

/// Width of one text glyph in court units
pub const GLYPH_W: f32 = 10.0;
/// Height of one text glyph in court units
pub const GLYPH_H: f32 = 20.0;

/// Keys the UI reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
}

/// Input delivered to the screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Left click at a court position
    Click(Vec2),
    Key(Key),
    /// The player asked to close the window (Esc in the terminal)
    Close,
}

/// Axis-aligned rectangle in court units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Width in court units of `text` drawn in glyph cells
#[inline]
pub fn text_width(text: &str) -> f32 {
    text.chars().count() as f32 * GLYPH_W
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(39.9, 59.9)));
        assert!(!r.contains(Vec2::new(40.0, 30.0)));
        assert!(!r.contains(Vec2::new(20.0, 60.0)));
    }
}
