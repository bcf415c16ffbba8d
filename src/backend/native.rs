//! Native input backend using enigo

use async_trait::async_trait;
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};

use super::InputBackend;

/// Backend that injects real OS input events.
///
/// enigo calls block, so each one runs on tokio's blocking pool with its own
/// connection. Nothing is cached between calls.
pub struct EnigoBackend {
    _private: (),
}

impl EnigoBackend {
    /// Create a new enigo backend, checking once that the platform connection can be opened
    pub fn new() -> anyhow::Result<Self> {
        // Fails early on missing display or accessibility permission
        Enigo::new(&Settings::default())
            .map_err(|e| anyhow::anyhow!("failed to connect to the input system: {e}"))?;
        Ok(Self { _private: () })
    }

    async fn with_enigo<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Enigo) -> anyhow::Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut enigo = Enigo::new(&Settings::default())?;
            f(&mut enigo)
        })
        .await?
    }
}

#[async_trait]
impl InputBackend for EnigoBackend {
    async fn move_to(&self, x: i32, y: i32) -> anyhow::Result<()> {
        self.with_enigo(move |enigo| Ok(enigo.move_mouse(x, y, Coordinate::Abs)?))
            .await
    }

    async fn location(&self) -> anyhow::Result<(i32, i32)> {
        self.with_enigo(|enigo| Ok(enigo.location()?)).await
    }

    async fn click(&self) -> anyhow::Result<()> {
        self.with_enigo(|enigo| Ok(enigo.button(Button::Left, Direction::Click)?))
            .await
    }

    async fn type_text(&self, text: &str) -> anyhow::Result<()> {
        let text = text.to_string();
        self.with_enigo(move |enigo| Ok(enigo.text(&text)?)).await
    }
}
