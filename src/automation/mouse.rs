//! Mouse automation over an input backend.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::pause;
use crate::backend::InputBackend;
use crate::error::{AutomationError, Result};
use crate::validate::{Coordinate, MotionMode, MoveRequest};

/// Time between intermediate cursor positions during a smooth move
pub const SMOOTH_STEP_INTERVAL: Duration = Duration::from_millis(10);

/// Cursor position as reported by the OS.
///
/// Unlike [`Coordinate`] this may be negative on multi-monitor layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mouse automation service
#[derive(Clone)]
pub struct Mouse {
    backend: Arc<dyn InputBackend>,
}

impl Mouse {
    pub fn new(backend: Arc<dyn InputBackend>) -> Self {
        Self { backend }
    }

    /// Move the cursor instantly
    pub async fn move_to(&self, target: Coordinate) -> Result<()> {
        tracing::debug!(%target, "mouse move");
        self.backend
            .move_to(target.x(), target.y())
            .await
            .map_err(|e| AutomationError::native("mouse move", e))
    }

    /// Move the cursor along a straight line over `duration`.
    ///
    /// The cursor steps every [`SMOOTH_STEP_INTERVAL`] (at least one step) and
    /// the last step lands exactly on `target`. If `cancel` fires, the cursor
    /// stays wherever the last completed step left it.
    pub async fn smooth_move(
        &self,
        target: Coordinate,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let start = self.position().await?;
        let steps = step_count(duration);
        let interval = duration / steps;
        tracing::debug!(%start, %target, ?duration, steps, "mouse smooth move");

        for (x, y) in linear_path((start.x, start.y), (target.x(), target.y()), steps) {
            pause(interval, cancel).await?;
            self.backend
                .move_to(x, y)
                .await
                .map_err(|e| AutomationError::native("mouse smooth move", e))?;
        }
        Ok(())
    }

    /// Move to `target`, then left click. No click is issued if the move fails.
    pub async fn click(&self, target: Coordinate) -> Result<()> {
        self.move_to(target).await?;
        tracing::debug!(%target, "mouse click");
        self.backend
            .click()
            .await
            .map_err(|e| AutomationError::native("mouse click", e))
    }

    pub async fn position(&self) -> Result<Position> {
        let (x, y) = self
            .backend
            .location()
            .await
            .map_err(|e| AutomationError::native("mouse position query", e))?;
        Ok(Position { x, y })
    }

    /// Run a validated move request in whichever mode it asks for
    pub async fn execute(&self, request: &MoveRequest, cancel: &CancellationToken) -> Result<()> {
        match request.mode {
            MotionMode::Instant => self.move_to(request.target).await,
            MotionMode::Smooth { duration } => {
                self.smooth_move(request.target, duration, cancel).await
            }
        }
    }
}

fn step_count(duration: Duration) -> u32 {
    let steps = duration.as_nanos().div_ceil(SMOOTH_STEP_INTERVAL.as_nanos());
    u32::try_from(steps).unwrap_or(u32::MAX).max(1)
}

/// Intermediate points from `start` (exclusive) to `end` (inclusive) in `steps` equal increments.
///
/// Points are computed as they are consumed.
pub fn linear_path(
    start: (i32, i32),
    end: (i32, i32),
    steps: u32,
) -> impl DoubleEndedIterator<Item = (i32, i32)> {
    let steps = i64::from(steps.max(1));
    let lerp = move |from: i32, to: i32, i: i64| -> i32 {
        let from = i64::from(from);
        // Exact at i == steps, so the final point is always `to`
        (from + (i64::from(to) - from) * i / steps) as i32
    };
    (1..=steps).map(move |i| (lerp(start.0, end.0, i), lerp(start.1, end.1, i)))
}
