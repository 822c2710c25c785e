/// Per-frame input as seen by the simulation.

use std::collections::HashMap;

use crate::entities::Cardinal;
use crate::error::GameResult;

/// Which movement keys are held this frame.  A key with no entry counts as
/// released.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeySnapshot {
    pressed: HashMap<Cardinal, bool>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly `keys` held.
    pub fn held(keys: &[Cardinal]) -> Self {
        let mut snapshot = Self::new();
        for key in keys {
            snapshot.set(*key, true);
        }
        snapshot
    }

    pub fn set(&mut self, key: Cardinal, pressed: bool) {
        self.pressed.insert(key, pressed);
    }

    pub fn is_pressed(&self, key: Cardinal) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }
}

/// Edge-triggered events, one per key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Fire,
    Quit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys: KeySnapshot,
    /// Events in arrival order.
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn keys(keys: &[Cardinal]) -> Self {
        FrameInput {
            keys: KeySnapshot::held(keys),
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Supplies one `FrameInput` per tick.
pub trait InputSource {
    fn poll(&mut self) -> GameResult<FrameInput>;
}

/// Replays a fixed list of frames, then reports a quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> GameResult<FrameInput> {
        Ok(self
            .frames
            .pop_front()
            .unwrap_or_else(|| FrameInput::default().with_event(InputEvent::Quit)))
    }
}
