//! Keyboard automation: plain and per-keystroke delayed typing.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::pause;
use crate::backend::InputBackend;
use crate::error::{AutomationError, Result};
use crate::validate::{self, TypeRequest};

/// Keyboard automation service
#[derive(Clone)]
pub struct Keyboard {
    backend: Arc<dyn InputBackend>,
}

impl Keyboard {
    pub fn new(backend: Arc<dyn InputBackend>) -> Self {
        Self { backend }
    }

    /// Type the whole string in a single native call
    pub async fn type_text(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(AutomationError::EmptyInput);
        }
        self.send(text).await
    }

    /// Type one character at a time, pausing `delay_ms` between characters.
    ///
    /// A non-positive delay behaves exactly like [`Keyboard::type_text`].
    /// The call blocks for roughly `delay_ms * (chars - 1)` unless `cancel`
    /// fires, in which case the remaining characters are dropped.
    pub async fn type_text_with_delay(
        &self,
        text: &str,
        delay_ms: i64,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let request = validate::type_request(text, Some(delay_ms))?;
        self.execute(&request, cancel).await
    }

    /// Run a validated type request
    pub async fn execute(&self, request: &TypeRequest, cancel: &CancellationToken) -> Result<()> {
        let Some(delay) = request.delay else {
            return self.type_text(&request.text).await;
        };

        let mut buf = [0u8; 4];
        for (i, ch) in request.text.chars().enumerate() {
            if i > 0 {
                pause(delay, cancel).await?;
            }
            self.send(ch.encode_utf8(&mut buf)).await?;
        }
        Ok(())
    }

    async fn send(&self, text: &str) -> Result<()> {
        tracing::debug!(chars = text.chars().count(), "keyboard type");
        self.backend
            .type_text(text)
            .await
            .map_err(|e| AutomationError::native("keyboard type", e))
    }
}
