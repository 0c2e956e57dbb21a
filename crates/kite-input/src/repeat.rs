use crate::{InputState, Key};

/// Key auto-repeat policy measured in frames.
///
/// A held key fires on its first frame, stays quiet until it has been held for
/// `delay` frames, then fires every `interval` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    pub delay: u32,
    pub interval: u32,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self {
            delay: 30,
            interval: 3,
        }
    }
}

impl KeyRepeat {
    pub const fn new(delay: u32, interval: u32) -> Self {
        Self { delay, interval }
    }

    /// Whether a key held for `duration` frames fires this frame.
    pub fn fires(&self, duration: u32) -> bool {
        if duration == 1 {
            return true;
        }
        self.interval > 0 && duration >= self.delay && (duration - self.delay) % self.interval == 0
    }

    pub fn is_repeating(&self, input: &InputState, key: Key) -> bool {
        self.fires(input.key_press_duration(key))
    }
}
