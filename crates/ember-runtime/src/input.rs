//! Input state management
//!
//! Tracks keyboard state per frame, with consume-until-release semantics for
//! edge-triggered handling: a consumed key reads as up until it is released
//! and pressed again, so holding a key does not re-trigger its action.

use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Per-frame keyboard state for a stage implementation to embed.
#[derive(Default)]
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys consumed while held; masked until released and pressed again
    consumed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) && !self.consumed.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.consumed.remove(&key);
    }

    /// Clear a key so it does not re-trigger until released and pressed again
    pub fn consume(&mut self, key: KeyCode) {
        if self.keys_down.contains(&key) {
            self.consumed.insert(key);
        }
        self.keys_just_pressed.remove(&key);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
    }

    /// Is a key currently held down (and not consumed)?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key) && !self.consumed.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(input.is_key_just_pressed(KeyCode::KeyW));

        // End frame clears just_pressed, held state remains
        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));

        input.process_key_up(KeyCode::KeyW);
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn test_consume_masks_until_release() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::Space);
        assert!(input.is_key_down(KeyCode::Space));

        input.consume(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));

        // Still held next frame: stays masked
        input.end_frame();
        input.process_key_down(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));
        assert!(!input.is_key_just_pressed(KeyCode::Space));

        // Release then press registers again
        input.process_key_up(KeyCode::Space);
        input.process_key_down(KeyCode::Space);
        assert!(input.is_key_down(KeyCode::Space));
        assert!(input.is_key_just_pressed(KeyCode::Space));
    }

    #[test]
    fn test_consume_unpressed_key_is_harmless() {
        let mut input = InputState::new();
        input.consume(KeyCode::KeyZ);

        input.process_key_down(KeyCode::KeyZ);
        assert!(input.is_key_down(KeyCode::KeyZ));
    }
}
