//! Held-key tracking
//!
//! Mallets move while keys are held. Terminals with the kitty keyboard
//! protocol report releases; everything else only reports presses (and
//! auto-repeat presses), so a key counts as held for a short window after
//! each press. The first window covers the auto-repeat delay; later ones
//! only need to bridge the gap between repeats.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Releases are reported, so no expiry is needed
    releases: bool,
    first_hold: u32,
    repeat_hold: u32,
    /// Ticks left for each held key; `u32::MAX` when waiting for a release
    held: HashMap<char, u32>,
}

impl KeyTracker {
    pub fn new(releases: bool, ticks_per_sec: u32) -> Self {
        Self {
            releases,
            first_hold: (ticks_per_sec / 2).max(1),
            repeat_hold: (ticks_per_sec / 10).max(2),
            held: HashMap::new(),
        }
    }

    /// Key names are case-insensitive
    fn key(ch: char) -> char {
        ch.to_ascii_lowercase()
    }

    pub fn press(&mut self, ch: char) {
        let ch = Self::key(ch);
        let hold = if self.releases {
            u32::MAX
        } else if self.held.contains_key(&ch) {
            self.repeat_hold
        } else {
            self.first_hold
        };
        self.held.insert(ch, hold);
    }

    pub fn release(&mut self, ch: char) {
        self.held.remove(&Self::key(ch));
    }

    /// Forget everything, e.g. when focus is lost
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, ch: char) -> bool {
        self.held.contains_key(&Self::key(ch))
    }

    /// Count down one frame
    pub fn tick(&mut self) {
        if self.releases {
            return;
        }
        self.held.retain(|_, left| {
            *left -= 1;
            *left > 0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_expires_without_releases() {
        let mut keys = KeyTracker::new(false, 60);
        keys.press('w');
        for _ in 0..29 {
            keys.tick();
        }
        assert!(keys.is_held('w'));
        keys.tick();
        assert!(!keys.is_held('w'));
    }

    #[test]
    fn test_repeat_shortens_hold() {
        let mut keys = KeyTracker::new(false, 60);
        keys.press('w');
        keys.tick();
        keys.press('w');
        for _ in 0..5 {
            keys.tick();
        }
        assert!(keys.is_held('w'));
        keys.tick();
        assert!(!keys.is_held('w'));
    }

    #[test]
    fn test_release_reporting_holds_until_release() {
        let mut keys = KeyTracker::new(true, 60);
        keys.press('I');
        for _ in 0..1000 {
            keys.tick();
        }
        assert!(keys.is_held('i'));
        keys.release('i');
        assert!(!keys.is_held('I'));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut keys = KeyTracker::new(true, 60);
        keys.press('w');
        keys.press('d');
        keys.release('w');
        assert!(!keys.is_held('w'));
        assert!(keys.is_held('d'));
        keys.clear();
        assert!(!keys.is_held('d'));
    }
}
