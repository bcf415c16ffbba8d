//! Input backend abstraction
//!
//! The OS cursor and keyboard are process-global, unsynchronized state. This
//! module puts them behind a trait so the automation layer can run against the
//! real desktop or against an in-memory recorder.

mod native;
pub mod recording;

use async_trait::async_trait;
use std::sync::Arc;

pub use native::EnigoBackend;
pub use recording::{InputEvent, RecordingBackend};

/// Trait for input backend implementations
///
/// Each method is one native call. Validation happens before these are
/// reached, so implementations may assume non-negative coordinates and
/// non-empty text.
#[async_trait]
pub trait InputBackend: Send + Sync {
    /// Move the cursor to absolute screen coordinates
    async fn move_to(&self, x: i32, y: i32) -> anyhow::Result<()>;

    /// Current cursor position
    async fn location(&self) -> anyhow::Result<(i32, i32)>;

    /// Left click at the current cursor position
    async fn click(&self) -> anyhow::Result<()>;

    /// Type a string as keyboard input
    async fn type_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Create the backend for the current desktop
pub fn create_backend() -> anyhow::Result<Arc<dyn InputBackend>> {
    let backend = EnigoBackend::new()?;
    tracing::info!("Using enigo input backend");
    Ok(Arc::new(backend))
}
