//! Scripted input timeline standing in for a player at the keyboard

use sky_engine::input::{InputEvent, KeyCode};

/// One stretch of held keys and steady pointer motion
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// Label used in the log
    pub name: &'static str,
    /// Duration in seconds
    pub seconds: f32,
    /// Keys held for the whole phase
    pub keys: &'static [KeyCode],
    /// Pointer motion sent every frame, in pixels
    pub look: (f32, f32),
}

impl Phase {
    const fn new(name: &'static str, seconds: f32, keys: &'static [KeyCode]) -> Self {
        Self {
            name,
            seconds,
            keys,
            look: (0.0, 0.0),
        }
    }

    const fn looking(mut self, dx: f32, dy: f32) -> Self {
        self.look = (dx, dy);
        self
    }

    /// Number of fixed steps this phase lasts
    pub fn frames(&self, step: f32) -> u32 {
        (self.seconds / step).round() as u32
    }

    /// Pointer event for one frame of this phase, if the phase looks around
    pub fn pointer_event(&self) -> Option<InputEvent> {
        let (dx, dy) = self.look;
        (dx != 0.0 || dy != 0.0).then_some(InputEvent::PointerMove { dx, dy })
    }
}

/// The walk: land, explore, then fall off the far edge
pub const TIMELINE: &[Phase] = &[
    Phase::new("fall", 2.0, &[]),
    Phase::new("walk forward", 1.5, &[KeyCode::W]),
    Phase::new("strafe right", 1.0, &[KeyCode::D]),
    Phase::new("jump", 0.1, &[KeyCode::W, KeyCode::Space]),
    Phase::new("airborne", 1.0, &[KeyCode::W]),
    Phase::new("look around", 1.0, &[]).looking(5.0, -1.0),
    Phase::new("walk along the wall", 4.0, &[KeyCode::W]),
    Phase::new("walk off the edge", 12.0, &[KeyCode::W]),
];

/// Key events that turn the `held` keys into the `next` set
pub fn transition(held: &[KeyCode], next: &[KeyCode]) -> Vec<InputEvent> {
    let released = held
        .iter()
        .filter(|key| !next.contains(key))
        .map(|&key| InputEvent::key_up(key));
    let pressed = next
        .iter()
        .filter(|key| !held.contains(key))
        .map(|&key| InputEvent::key_down(key));

    released.chain(pressed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_only_sends_changes() {
        let events = transition(&[KeyCode::W, KeyCode::Space], &[KeyCode::W, KeyCode::D]);
        assert_eq!(
            events,
            vec![InputEvent::key_up(KeyCode::Space), InputEvent::key_down(KeyCode::D)]
        );
    }

    #[test]
    fn test_phase_frames_and_pointer() {
        let phase = Phase::new("look", 1.0, &[]).looking(5.0, 0.0);
        assert_eq!(phase.frames(1.0 / 60.0), 60);
        assert_eq!(phase.pointer_event(), Some(InputEvent::PointerMove { dx: 5.0, dy: 0.0 }));
        assert!(TIMELINE[0].pointer_event().is_none());
    }
}
