//! Input management system
//!
//! Host events mutate an [`InputState`]; the per-frame step reads it through
//! an [`InputSnapshot`].

mod events;
mod state;

pub use events::{InputEvent, KeyCode};
pub use state::{InputSnapshot, InputState};
