//! Command-line front-end
//!
//! Subcommands are parsed by clap, validated into an [`Action`] before any
//! input device is touched, then executed against an [`Automation`].

use clap::{Parser, Subcommand};
use std::io::Write;
use tokio_util::sync::CancellationToken;

use crate::automation::Automation;
use crate::error::Result;
use crate::validate::{self, Coordinate, MotionMode, MoveRequest, TypeRequest};

#[derive(Debug, Parser)]
#[command(
    name = "desktop-automation",
    version,
    about = "Desktop mouse and keyboard automation",
    long_about = "A command-line interface for automating desktop interactions: \
                  moving and clicking the mouse, and typing text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Click at a specific screen coordinate
    #[command(allow_negative_numbers = true, after_help = "Example:\n  desktop-automation click 500 300")]
    Click {
        /// X coordinate (pixels from the left edge)
        x: String,
        /// Y coordinate (pixels from the top edge)
        y: String,
    },

    /// Move the mouse cursor to specific screen coordinates, instantly or smoothly
    #[command(
        allow_negative_numbers = true,
        after_help = "Examples:\n  desktop-automation move 800 600\n  desktop-automation move --smooth --duration 5.0 800 600"
    )]
    Move {
        x: String,
        y: String,
        /// Animate the cursor instead of jumping
        #[arg(long)]
        smooth: bool,
        /// Duration in seconds for smooth movement (only applied with --smooth)
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
    },

    /// Type text on the keyboard
    #[command(
        allow_negative_numbers = true,
        after_help = "Examples:\n  desktop-automation type 'Hello World!'\n  desktop-automation type --delay=50 'Slow typing!'"
    )]
    Type {
        text: String,
        /// Delay between keystrokes in milliseconds
        #[arg(long, default_value_t = 0)]
        delay: i64,
    },

    /// Print the current mouse cursor position
    Position,
}

/// A fully validated CLI request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Click(Coordinate),
    Move(MoveRequest),
    Type(TypeRequest),
    Position,
}

impl Command {
    pub fn validate(&self) -> Result<Action> {
        Ok(match self {
            Command::Click { x, y } => Action::Click(validate::parse_coordinate(x, y)?),
            Command::Move {
                x,
                y,
                smooth,
                duration,
            } => {
                let target = validate::parse_coordinate(x, y)?;
                Action::Move(validate::move_request(target, *smooth, *duration)?)
            }
            Command::Type { text, delay } => {
                Action::Type(validate::type_request(text, Some(*delay))?)
            }
            Command::Position => Action::Position,
        })
    }
}

/// Execute a validated action, writing human-readable progress to `out`.
pub async fn execute<W: Write>(
    action: &Action,
    automation: &Automation,
    cancel: &CancellationToken,
    out: &mut W,
) -> anyhow::Result<()> {
    let mouse = &automation.mouse;

    match action {
        Action::Click(target) => {
            let current = mouse.position().await?;
            writeln!(out, "Current mouse position: {current}")?;

            mouse.click(*target).await?;
            tracing::info!(%target, "clicked");
            writeln!(out, "Successfully clicked at coordinates {target}")?;
        }
        Action::Move(request) => {
            let current = mouse.position().await?;
            writeln!(out, "Current mouse position: {current}")?;
            writeln!(out, "Target position: {}", request.target)?;
            writeln!(out, "Moving...")?;
            out.flush()?;

            mouse.execute(request, cancel).await?;
            tracing::info!(to = %request.target, mode = ?request.mode, "moved");
            match request.mode {
                MotionMode::Instant => writeln!(out, "Moved cursor to {}", request.target)?,
                MotionMode::Smooth { duration } => writeln!(
                    out,
                    "Smoothly moved cursor to {} over {:.1}s",
                    request.target,
                    duration.as_secs_f64()
                )?,
            }

            let final_position = mouse.position().await?;
            writeln!(out, "Final position: {final_position}")?;
        }
        Action::Type(request) => {
            automation.keyboard.execute(request, cancel).await?;
            let count = request.text.chars().count();
            tracing::info!(chars = count, delay = ?request.delay, "typed");
            writeln!(out, "Successfully typed {count} characters")?;
        }
        Action::Position => {
            let position = mouse.position().await?;
            writeln!(out, "Mouse position: {position}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InputEvent, RecordingBackend};
    use crate::error::AutomationError;
    use std::sync::Arc;

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("desktop-automation").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    async fn run(args: &[&str], backend: &Arc<RecordingBackend>) -> anyhow::Result<String> {
        let action = parse(args).validate()?;
        let automation = Automation::new(backend.clone());
        let mut out = Vec::new();
        execute(&action, &automation, &CancellationToken::new(), &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn negative_numbers_reach_the_validator() {
        let err = parse(&["click", "-5", "10"]).validate().unwrap_err();
        assert!(matches!(err, AutomationError::InvalidCoordinate(_)));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn non_numeric_coordinate_is_invalid() {
        let err = parse(&["move", "left", "10"]).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid x coordinate: left (must be an integer)"
        );
    }

    #[test]
    fn smooth_move_needs_positive_duration() {
        let err = parse(&["move", "1", "2", "--smooth", "--duration=0"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, AutomationError::InvalidDuration(_)));

        // Duration is ignored for instant moves
        assert!(parse(&["move", "1", "2", "--duration=0"]).validate().is_ok());
    }

    #[test]
    fn huge_smooth_duration_is_an_error() {
        let err = parse(&["move", "1", "1", "--smooth", "--duration", "1e20"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, AutomationError::InvalidDuration(_)));
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = parse(&["type", ""]).validate().unwrap_err();
        assert_eq!(err, AutomationError::EmptyInput);
    }

    #[test]
    fn version_flag_is_available() {
        let err = Cli::try_parse_from(["desktop-automation", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[tokio::test]
    async fn move_reports_target_and_final_position() {
        let backend = Arc::new(RecordingBackend::at(10, 10));
        let out = run(&["move", "100", "200"], &backend).await.unwrap();

        assert!(out.contains("Current mouse position: (10, 10)"));
        assert!(out.contains("Moved cursor to (100, 200)"));
        assert!(out.contains("Final position: (100, 200)"));

        let out = run(&["position"], &backend).await.unwrap();
        assert_eq!(out, "Mouse position: (100, 200)\n");
    }

    #[tokio::test]
    async fn smooth_move_lands_on_target() {
        let backend = Arc::new(RecordingBackend::new());
        let out = run(&["move", "30", "60", "--smooth", "--duration", "0.05"], &backend)
            .await
            .unwrap();

        assert!(out.contains("Smoothly moved cursor to (30, 60)"));
        assert_eq!(
            backend.events().last(),
            Some(&InputEvent::MoveTo { x: 30, y: 60 })
        );
    }

    #[tokio::test]
    async fn click_rejects_negative_without_moving() {
        let backend = Arc::new(RecordingBackend::new());
        let err = run(&["click", "-5", "10"], &backend).await.unwrap_err();

        assert!(err.to_string().contains("non-negative"));
        assert!(backend.events().is_empty());
    }

    #[tokio::test]
    async fn click_reports_success() {
        let backend = Arc::new(RecordingBackend::new());
        let out = run(&["click", "500", "300"], &backend).await.unwrap();

        assert!(out.ends_with("Successfully clicked at coordinates (500, 300)\n"));
        assert_eq!(
            backend.events(),
            vec![
                InputEvent::MoveTo { x: 500, y: 300 },
                InputEvent::Click { x: 500, y: 300 },
            ]
        );
    }

    #[tokio::test]
    async fn type_counts_characters_not_bytes() {
        let backend = Arc::new(RecordingBackend::new());
        let out = run(&["type", "--delay=-3", "naïve"], &backend).await.unwrap();

        assert_eq!(out, "Successfully typed 5 characters\n");
        assert_eq!(backend.events(), vec![InputEvent::Type("naïve".into())]);
    }

    #[tokio::test]
    async fn native_failure_surfaces_as_error() {
        let backend = Arc::new(RecordingBackend::new());
        backend.fail_moves();
        let err = run(&["move", "1", "1"], &backend).await.unwrap_err();

        let err = err.downcast::<AutomationError>().unwrap();
        assert!(matches!(err, AutomationError::NativeCallFailure(_)));
    }
}
