//! Raw input events delivered by the host window/event system

/// Host input event
///
/// Keys are identified by platform key codes (`"KeyW"`, `"Space"`, ...),
/// the same strings the key bindings in `PlayerConfig` use.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed
    KeyDown(String),
    /// Key released
    KeyUp(String),
    /// Mouse button pressed; requests pointer lock
    MouseDown,
    /// Relative pointer motion in pixels
    PointerMove {
        /// Horizontal motion, positive to the right
        dx: f32,
        /// Vertical motion, positive downwards
        dy: f32,
    },
    /// Pointer lock released by the host (e.g. Escape)
    PointerLockLost,
}

impl InputEvent {
    /// Key press for a known key
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown(key.code().to_owned())
    }

    /// Key release for a known key
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp(key.code().to_owned())
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Shift key (left)
    ShiftLeft,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Platform key code string for this key
    pub fn code(self) -> &'static str {
        match self {
            Self::A => "KeyA",
            Self::D => "KeyD",
            Self::S => "KeyS",
            Self::W => "KeyW",
            Self::Space => "Space",
            Self::ShiftLeft => "ShiftLeft",
            Self::Escape => "Escape",
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events_use_platform_codes() {
        assert_eq!(InputEvent::key_down(KeyCode::W), InputEvent::KeyDown("KeyW".into()));
        assert_eq!(InputEvent::key_up(KeyCode::Space), InputEvent::KeyUp("Space".into()));
        assert_eq!(KeyCode::Left.code(), "ArrowLeft");
    }
}
