//! Mouse and keyboard automation primitives
//!
//! Both services are stateless wrappers around an [`InputBackend`]: they take
//! validated requests, issue the matching native calls, and convert backend
//! failures into [`AutomationError::NativeCallFailure`].
//!
//! [`InputBackend`]: crate::backend::InputBackend
//! [`AutomationError::NativeCallFailure`]: crate::error::AutomationError::NativeCallFailure

mod keyboard;
mod mouse;

pub use keyboard::Keyboard;
pub use mouse::{Mouse, Position, SMOOTH_STEP_INTERVAL, linear_path};

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::backend::InputBackend;
use crate::error::{AutomationError, Result};

/// Mouse and keyboard sharing one backend
#[derive(Clone)]
pub struct Automation {
    pub mouse: Mouse,
    pub keyboard: Keyboard,
}

impl Automation {
    pub fn new(backend: Arc<dyn InputBackend>) -> Self {
        Self {
            mouse: Mouse::new(backend.clone()),
            keyboard: Keyboard::new(backend),
        }
    }
}

/// Sleep for `duration` unless `cancel` fires first.
async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AutomationError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
