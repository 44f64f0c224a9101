//! Keyboard state
//!
//! Updated asynchronously by host key events; the simulation reads a
//! snapshot once per tick.

use crate::sim::MoveKeys;

/// Held/not-held state of the directional keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    keys: MoveKeys,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event by DOM `KeyboardEvent.code`.
    /// Returns false for keys the game doesn't use.
    pub fn set(&mut self, code: &str, held: bool) -> bool {
        let slot = match code {
            "ArrowUp" | "KeyW" => &mut self.keys.up,
            "ArrowDown" | "KeyS" => &mut self.keys.down,
            "ArrowLeft" | "KeyA" => &mut self.keys.left,
            "ArrowRight" | "KeyD" => &mut self.keys.right,
            _ => return false,
        };
        *slot = held;
        true
    }

    /// Release everything (e.g. on window blur)
    pub fn clear(&mut self) {
        self.keys = MoveKeys::default();
    }

    /// Copy of the current state for one tick
    pub fn snapshot(&self) -> MoveKeys {
        self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_and_release() {
        let mut keys = KeyState::new();
        assert!(keys.set("ArrowUp", true));
        assert!(keys.set("ArrowLeft", true));
        let snap = keys.snapshot();
        assert!(snap.up && snap.left && !snap.down && !snap.right);

        keys.set("ArrowUp", false);
        assert!(!keys.snapshot().up);
        // Snapshot is a copy
        assert!(snap.up);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut keys = KeyState::new();
        assert!(!keys.set("Space", true));
        assert_eq!(keys.snapshot(), MoveKeys::default());
    }

    #[test]
    fn test_clear() {
        let mut keys = KeyState::new();
        keys.set("KeyD", true);
        keys.set("ArrowDown", true);
        keys.clear();
        assert_eq!(keys.snapshot(), MoveKeys::default());
    }
}
