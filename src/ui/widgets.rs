//! Buttons, text entry boxes, and title animations

use glam::Vec2;

use super::{GLYPH_H, GLYPH_W, Key, Rect, UiEvent, text_width};
use crate::assets::Frame;

/// Which point of a widget its position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// A clickable button.
///
/// The label is centred in a field `pad` glyphs wider than itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Padded label, as drawn
    pub text: String,
    pub rect: Rect,
    pub enabled: bool,
}

impl Button {
    pub fn new(label: &str, at: Vec2, pad: usize, anchor: Anchor) -> Self {
        let width = label.chars().count() + pad;
        let text = format!("{:^width$}", label, width = width);
        let w = text_width(&text);
        let h = GLYPH_H;
        let rect = match anchor {
            Anchor::TopLeft => Rect::new(at.x, at.y, w, h),
            Anchor::Center => Rect::new(at.x - w / 2.0, at.y - h / 2.0, w, h),
        };
        Self {
            text,
            rect,
            enabled: true,
        }
    }

    /// Whether `event` is a click on this button
    pub fn clicked(&self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Click(p) => self.enabled && self.rect.contains(*p),
            _ => false,
        }
    }
}

/// Colour state of an [`InputBox`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxState {
    /// Not focused, nothing committed yet
    Inactive,
    /// Focused and taking keys
    Active,
    /// Not focused, holds a committed value
    Committed,
}

/// Single-line text entry.
///
/// Click to focus (the placeholder clears), type, and press Enter to commit
/// the text as the box's value.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBox {
    pub rect: Rect,
    /// Placeholder shown while the box is empty
    pub default_text: String,
    /// Text as currently displayed
    pub text: String,
    /// Last committed value
    pub value: String,
    pub max_length: usize,
    pub state: BoxState,
}

impl InputBox {
    pub const MIN_WIDTH: f32 = 200.0;

    pub fn new(rect: Rect, default_text: &str) -> Self {
        Self {
            rect,
            default_text: default_text.to_string(),
            text: default_text.to_string(),
            value: String::new(),
            max_length: 10,
            state: BoxState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == BoxState::Active
    }

    pub fn handle(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Click(p) => self.click(*p),
            UiEvent::Key(key) if self.is_active() => self.key(*key),
            _ => {}
        }
    }

    fn click(&mut self, p: Vec2) {
        let active = self.rect.contains(p) && !self.is_active();
        if active {
            if self.text == self.default_text {
                self.text.clear();
            }
        } else {
            self.restore_placeholder();
        }
        self.state = self.resting_state(active);
    }

    fn restore_placeholder(&mut self) {
        if self.text.is_empty() {
            self.text = self.default_text.clone();
        }
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::Enter => {
                self.value = self.text.trim().to_string();
                self.restore_placeholder();
                self.state = self.resting_state(false);
            }
            Key::Backspace => {
                self.text.pop();
            }
            Key::Char(ch) if !ch.is_control() => {
                if self.text.trim().chars().count() < self.max_length {
                    self.text.push(ch);
                }
            }
            Key::Char(_) => {}
        }
    }

    fn resting_state(&self, active: bool) -> BoxState {
        if active {
            BoxState::Active
        } else if !self.value.is_empty() {
            BoxState::Committed
        } else {
            BoxState::Inactive
        }
    }

    /// Text as drawn: centred in a `max_length` field
    pub fn display_text(&self) -> String {
        format!("{:^width$}", self.text, width = self.max_length)
    }

    /// Grow the box to fit long text
    pub fn fit(&mut self) {
        let needed = text_width(&self.display_text()) + GLYPH_W;
        self.rect.w = needed.max(Self::MIN_WIDTH);
    }
}

/// Ticks each animation frame stays on screen
pub const FRAME_HOLD: usize = 2;

/// Cycles through title frames, one step per redraw
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<Frame>,
    pub pos: Vec2,
    count: usize,
}

impl Animation {
    pub fn new(frames: Vec<Frame>, pos: Vec2) -> Self {
        Self {
            frames,
            pos,
            count: 0,
        }
    }

    /// Move to the next step, wrapping after the last frame
    pub fn advance(&mut self) {
        let steps = self.frames.len() * FRAME_HOLD;
        if self.count + 1 < steps {
            self.count += 1;
        } else {
            self.count = 0;
        }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.count / FRAME_HOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_box() -> InputBox {
        InputBox::new(Rect::new(100.0, 100.0, 200.0, 75.0), "Enter name")
    }

    fn click_inside() -> UiEvent {
        UiEvent::Click(Vec2::new(150.0, 120.0))
    }

    fn type_str(b: &mut InputBox, s: &str) {
        for ch in s.chars() {
            b.handle(&UiEvent::Key(Key::Char(ch)));
        }
    }

    #[test]
    fn test_button_center_anchor() {
        let b = Button::new("Start", Vec2::new(500.0, 425.0), 6, Anchor::Center);
        assert_eq!(b.text.chars().count(), 11);
        assert_eq!(b.rect.w, 110.0);
        assert_eq!(b.rect.x, 445.0);
        assert!(b.clicked(&UiEvent::Click(Vec2::new(500.0, 425.0))));
        assert!(!b.clicked(&UiEvent::Click(Vec2::new(500.0, 460.0))));
        assert!(!b.clicked(&UiEvent::Key(Key::Enter)));
    }

    #[test]
    fn test_disabled_button_ignores_clicks() {
        let mut b = Button::new("Quit", Vec2::ZERO, 0, Anchor::TopLeft);
        b.enabled = false;
        assert!(!b.clicked(&UiEvent::Click(Vec2::new(5.0, 5.0))));
    }

    #[test]
    fn test_input_box_focus_clears_placeholder() {
        let mut b = name_box();
        b.handle(&click_inside());
        assert!(b.is_active());
        assert_eq!(b.text, "");

        // Click again with nothing typed: placeholder comes back
        b.handle(&click_inside());
        assert_eq!(b.state, BoxState::Inactive);
        assert_eq!(b.text, "Enter name");
    }

    #[test]
    fn test_input_box_commit() {
        let mut b = name_box();
        b.handle(&click_inside());
        type_str(&mut b, " ada ");
        b.handle(&UiEvent::Key(Key::Enter));
        assert_eq!(b.value, "ada");
        assert_eq!(b.state, BoxState::Committed);

        // Keys are ignored once it loses focus
        type_str(&mut b, "x");
        assert_eq!(b.text, " ada ");
    }

    #[test]
    fn test_input_box_max_length_and_backspace() {
        let mut b = name_box();
        b.handle(&click_inside());
        type_str(&mut b, "abcdefghijklmnop");
        assert_eq!(b.text, "abcdefghij");
        b.handle(&UiEvent::Key(Key::Backspace));
        assert_eq!(b.text, "abcdefghi");
    }

    #[test]
    fn test_click_outside_deactivates() {
        let mut b = name_box();
        b.handle(&click_inside());
        type_str(&mut b, "bo");
        b.handle(&UiEvent::Click(Vec2::new(900.0, 10.0)));
        assert_eq!(b.state, BoxState::Inactive);
        assert_eq!(b.value, "");
        assert_eq!(b.text, "bo");
    }

    #[test]
    fn test_refocus_after_leaving_empty() {
        let mut b = name_box();
        b.handle(&click_inside());
        b.handle(&UiEvent::Click(Vec2::new(900.0, 10.0)));
        assert_eq!(b.state, BoxState::Inactive);
        assert_eq!(b.text, "Enter name");

        b.handle(&click_inside());
        assert!(b.is_active());
        assert_eq!(b.text, "");
        type_str(&mut b, "ada");
        assert_eq!(b.text, "ada");
        b.handle(&UiEvent::Key(Key::Enter));
        assert_eq!(b.value, "ada");
    }

    #[test]
    fn test_empty_commit_restores_placeholder() {
        let mut b = name_box();
        b.handle(&click_inside());
        b.handle(&UiEvent::Key(Key::Enter));
        assert_eq!(b.state, BoxState::Inactive);
        assert_eq!(b.value, "");
        assert_eq!(b.text, "Enter name");
    }

    #[test]
    fn test_fit_never_shrinks_below_min() {
        let mut b = name_box();
        b.fit();
        assert_eq!(b.rect.w, InputBox::MIN_WIDTH);
    }

    #[test]
    fn test_animation_holds_each_frame() {
        let frames = vec![vec!["a".to_string()], vec!["b".to_string()]];
        let mut anim = Animation::new(frames, Vec2::ZERO);
        let mut seen = Vec::new();
        for _ in 0..6 {
            anim.advance();
            seen.push(anim.current().map(|f| f.join("")));
        }
        let want = ["a", "b", "b", "a", "a", "b"].map(|s| Some(s.to_string()));
        assert_eq!(seen, want);
    }

    #[test]
    fn test_empty_animation() {
        let mut anim = Animation::new(Vec::new(), Vec2::ZERO);
        anim.advance();
        assert!(anim.current().is_none());
    }
}
