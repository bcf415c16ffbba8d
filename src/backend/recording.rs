//! In-memory backend that records input instead of sending it to the OS.
//!
//! Used by tests to check what an action would have done to the desktop.

use async_trait::async_trait;
use std::sync::Mutex;

use super::InputBackend;

/// One native call as seen by the recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    MoveTo { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    Type(String),
}

#[derive(Debug, Default)]
struct State {
    position: (i32, i32),
    events: Vec<InputEvent>,
    fail_moves: bool,
}

/// Fake cursor and keyboard
#[derive(Debug, Default)]
pub struct RecordingBackend {
    state: Mutex<State>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the cursor at the given position
    pub fn at(x: i32, y: i32) -> Self {
        let backend = Self::default();
        backend.lock().position = (x, y);
        backend
    }

    /// Make every subsequent `move_to` fail
    pub fn fail_moves(&self) {
        self.lock().fail_moves = true;
    }

    /// Snapshot of the calls made so far
    pub fn events(&self) -> Vec<InputEvent> {
        self.lock().events.clone()
    }

    /// Concatenation of everything typed so far
    pub fn typed(&self) -> String {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Type(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panicked test thread must not hide the recorded events from others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl InputBackend for RecordingBackend {
    async fn move_to(&self, x: i32, y: i32) -> anyhow::Result<()> {
        let mut state = self.lock();
        if state.fail_moves {
            anyhow::bail!("cursor is locked");
        }
        state.position = (x, y);
        state.events.push(InputEvent::MoveTo { x, y });
        Ok(())
    }

    async fn location(&self) -> anyhow::Result<(i32, i32)> {
        Ok(self.lock().position)
    }

    async fn click(&self) -> anyhow::Result<()> {
        let mut state = self.lock();
        let (x, y) = state.position;
        state.events.push(InputEvent::Click { x, y });
        Ok(())
    }

    async fn type_text(&self, text: &str) -> anyhow::Result<()> {
        self.lock().events.push(InputEvent::Type(text.to_string()));
        Ok(())
    }
}
