//! Input validation
//!
//! Turns raw CLI strings and tool-call numbers into request values. Anything
//! built here is already valid, so the automation layer never re-checks it.

use std::fmt;
use std::time::Duration;

use crate::error::{AutomationError, Result};

/// Which coordinate a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// A screen position with both components non-negative.
///
/// The screen origin is assumed to be (0, 0). There is no upper bound; the OS
/// decides what to do with off-screen targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How the cursor travels to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    Instant,
    /// Animated along a straight line; duration is always positive
    Smooth { duration: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub target: Coordinate,
    pub mode: MotionMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeRequest {
    /// Never empty
    pub text: String,
    /// Pause between keystrokes; `None` types the text in one call
    pub delay: Option<Duration>,
}

/// Parse one coordinate from user-supplied text.
pub fn parse_axis(axis: Axis, raw: &str) -> Result<i32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        AutomationError::InvalidCoordinate(format!(
            "invalid {axis} coordinate: {raw} (must be an integer)"
        ))
    })?;
    check_axis(axis, value)
}

/// Check that a numeric coordinate is non-negative and fits the screen space type.
pub fn check_axis(axis: Axis, value: i64) -> Result<i32> {
    if value < 0 {
        return Err(AutomationError::InvalidCoordinate(format!(
            "{axis} coordinate must be non-negative, got: {value}"
        )));
    }
    i32::try_from(value).map_err(|_| {
        AutomationError::InvalidCoordinate(format!(
            "{axis} coordinate is out of range, got: {value}"
        ))
    })
}

pub fn coordinate(x: i64, y: i64) -> Result<Coordinate> {
    Ok(Coordinate {
        x: check_axis(Axis::X, x)?,
        y: check_axis(Axis::Y, y)?,
    })
}

pub fn parse_coordinate(x: &str, y: &str) -> Result<Coordinate> {
    Ok(Coordinate {
        x: parse_axis(Axis::X, x)?,
        y: parse_axis(Axis::Y, y)?,
    })
}

/// Validate a smooth-move duration given in seconds.
pub fn duration(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(AutomationError::InvalidDuration(format!(
            "invalid duration: {seconds} (must be positive)"
        )));
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        AutomationError::InvalidDuration(format!("invalid duration: {seconds} (too large)"))
    })
}

/// Build a move request. The duration only matters (and is only checked) for smooth moves.
pub fn move_request(target: Coordinate, smooth: bool, duration_secs: f64) -> Result<MoveRequest> {
    let mode = if smooth {
        MotionMode::Smooth {
            duration: duration(duration_secs)?,
        }
    } else {
        MotionMode::Instant
    };
    Ok(MoveRequest { target, mode })
}

/// Build a type request. A missing or non-positive delay means "no delay", not an error.
pub fn type_request(text: &str, delay_ms: Option<i64>) -> Result<TypeRequest> {
    if text.is_empty() {
        return Err(AutomationError::EmptyInput);
    }
    let delay = delay_ms
        .filter(|ms| *ms > 0)
        .map(|ms| Duration::from_millis(ms as u64));
    Ok(TypeRequest {
        text: text.to_string(),
        delay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_origin_and_large_values() {
        let c = coordinate(0, 0).unwrap();
        assert_eq!((c.x(), c.y()), (0, 0));

        // No upper bound is enforced here
        let c = coordinate(10_000, 20_000).unwrap();
        assert_eq!((c.x(), c.y()), (10_000, 20_000));
    }

    #[test]
    fn rejects_negative_coordinates() {
        let err = coordinate(-5, 10).unwrap_err();
        assert_eq!(
            err,
            AutomationError::InvalidCoordinate("x coordinate must be non-negative, got: -5".into())
        );

        let err = coordinate(3, -1).unwrap_err();
        assert!(err.to_string().starts_with("y coordinate must be non-negative"));
    }

    #[test]
    fn rejects_values_beyond_i32() {
        let err = coordinate(i64::from(i32::MAX) + 1, 0).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidCoordinate(_)));
    }

    #[test]
    fn parses_text_coordinates() {
        let c = parse_coordinate("100", " 200 ").unwrap();
        assert_eq!(c.to_string(), "(100, 200)");
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = parse_coordinate("abc", "10").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid x coordinate: abc (must be an integer)"
        );

        let err = parse_coordinate("10", "1.5").unwrap_err();
        assert!(matches!(err, AutomationError::InvalidCoordinate(_)));
    }

    #[test]
    fn negative_text_mentions_non_negative() {
        let err = parse_coordinate("-5", "10").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(matches!(duration(0.0), Err(AutomationError::InvalidDuration(_))));
        assert!(matches!(duration(-1.5), Err(AutomationError::InvalidDuration(_))));
        assert!(matches!(duration(f64::NAN), Err(AutomationError::InvalidDuration(_))));
        assert_eq!(duration(0.25).unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let err = duration(1e20).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidDuration(_)));
        assert!(err.to_string().ends_with("(too large)"));
        assert!(matches!(
            move_request(coordinate(1, 1).unwrap(), true, f64::MAX),
            Err(AutomationError::InvalidDuration(_))
        ));
    }

    #[test]
    fn instant_move_ignores_duration() {
        let target = coordinate(1, 2).unwrap();
        let req = move_request(target, false, -3.0).unwrap();
        assert_eq!(req.mode, MotionMode::Instant);

        let err = move_request(target, true, 0.0).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidDuration(_)));
    }

    #[test]
    fn empty_text_is_rejected_whatever_the_delay() {
        for delay in [None, Some(-10), Some(0), Some(50)] {
            assert_eq!(type_request("", delay), Err(AutomationError::EmptyInput));
        }
    }

    #[test]
    fn non_positive_delay_means_no_delay() {
        assert_eq!(type_request("hi", Some(0)).unwrap().delay, None);
        assert_eq!(type_request("hi", Some(-20)).unwrap().delay, None);
        assert_eq!(type_request("hi", None).unwrap().delay, None);
        assert_eq!(
            type_request("hi", Some(50)).unwrap().delay,
            Some(Duration::from_millis(50))
        );
    }
}
