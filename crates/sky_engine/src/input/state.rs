//! Live key state shared between host event callbacks and the frame step
//!
//! Event callbacks only ever write here. The simulation reads one
//! [`InputSnapshot`] per step under the same lock, so an event lands either
//! wholly before or wholly after a step's read.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::InputEvent;

#[derive(Debug, Default)]
struct SharedInput {
    keys: HashMap<String, bool>,
    pointer_locked: bool,
    look_delta: (f32, f32),
}

/// Handle to the session's input state
///
/// Cheap to clone; every clone refers to the same state, so one can be given
/// to the event system while the scene keeps another.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    shared: Arc<Mutex<SharedInput>>,
}

impl InputState {
    /// Create an empty input state (no keys known, pointer unlocked)
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a host event
    pub fn handle_event(&self, event: &InputEvent) {
        let mut shared = self.shared.lock();
        match event {
            InputEvent::KeyDown(code) => {
                shared.keys.insert(code.clone(), true);
            }
            InputEvent::KeyUp(code) => {
                shared.keys.insert(code.clone(), false);
            }
            InputEvent::MouseDown => {
                if !shared.pointer_locked {
                    log::debug!("Pointer lock acquired");
                }
                shared.pointer_locked = true;
            }
            InputEvent::PointerMove { dx, dy } => {
                // Look only follows the pointer while it is captured
                if shared.pointer_locked {
                    shared.look_delta.0 += dx;
                    shared.look_delta.1 += dy;
                }
            }
            InputEvent::PointerLockLost => {
                log::debug!("Pointer lock released");
                shared.pointer_locked = false;
                shared.look_delta = (0.0, 0.0);
            }
        }
    }

    /// Mark a key as pressed
    pub fn press(&self, code: &str) {
        self.handle_event(&InputEvent::KeyDown(code.to_owned()));
    }

    /// Mark a key as released
    pub fn release(&self, code: &str) {
        self.handle_event(&InputEvent::KeyUp(code.to_owned()));
    }

    /// Current state of one key; unknown keys are released
    pub fn is_pressed(&self, code: &str) -> bool {
        self.shared.lock().keys.get(code).copied().unwrap_or(false)
    }

    /// Whether pointer motion currently steers the camera
    pub fn pointer_locked(&self) -> bool {
        self.shared.lock().pointer_locked
    }

    /// Copy the key map and take the accumulated look motion
    ///
    /// Called once per simulation step.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut shared = self.shared.lock();
        let look_delta = std::mem::take(&mut shared.look_delta);
        InputSnapshot {
            keys: shared.keys.clone(),
            look_delta,
        }
    }
}

/// Immutable view of the input for a single step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: HashMap<String, bool>,
    look_delta: (f32, f32),
}

impl InputSnapshot {
    /// Snapshot with no keys pressed and no look motion
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot with the given keys held
    pub fn with_pressed<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            keys: codes.into_iter().map(|code| (code.to_owned(), true)).collect(),
            look_delta: (0.0, 0.0),
        }
    }

    /// Whether a key was held when the snapshot was taken
    pub fn is_pressed(&self, code: &str) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    /// Pointer motion (pixels) accumulated since the previous snapshot
    pub fn look_delta(&self) -> (f32, f32) {
        self.look_delta
    }
}
