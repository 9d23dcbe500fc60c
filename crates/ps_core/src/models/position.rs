//! Pitch geometry (minimal set)
//!
//! Pitch-normalized coordinates: both axes run roughly from -1 to 1, with the
//! centre spot at the origin and the goals on `x = -1` / `x = 1`.
//! Strategies use these helpers; the engine core never looks at positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this distance two points are treated as the same point.
const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const CENTRE_SPOT: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Perpendicular distance from this point to the infinite line through
    /// `a` and `b`. A degenerate line (`a == b`) falls back to the distance
    /// to `a`.
    pub fn distance_to_line(&self, a: &Position, b: &Position) -> f32 {
        let length = a.distance(b);
        if length < EPSILON {
            return self.distance(a);
        }
        ((b.x - a.x) * (a.y - self.y) - (a.x - self.x) * (b.y - a.y)).abs() / length
    }

    /// Step toward `target` by at most `step`.
    ///
    /// Snaps exactly onto the target when it is within reach, so repeated
    /// calls never overshoot.
    pub fn move_towards(&mut self, target: &Position, step: f32) {
        let remaining = self.distance(target);
        if remaining < EPSILON {
            return;
        }
        if remaining <= step {
            *self = *target;
            return;
        }
        let ratio = step / remaining;
        self.x += (target.x - self.x) * ratio;
        self.y += (target.y - self.y) * ratio;
    }

    /// Mirror across the halfway line (x axis flips sign).
    pub fn mirrored(&self) -> Position {
        Position::new(-self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_distance_pythagorean() {
        let origin = Position::new(0.0, 0.0);
        let p = Position::new(3.0, 4.0);
        assert!(approx(origin.distance(&p), 5.0));
        assert!(approx(p.distance(&origin), 5.0));
    }

    #[test]
    fn test_distance_to_line() {
        let origin = Position::new(0.0, 0.0);
        let d = origin.distance_to_line(&Position::new(3.0, 4.0), &Position::new(0.0, 5.0));
        assert!(approx(d, 4.743_416_5), "got {d}");
    }

    #[test]
    fn test_distance_to_degenerate_line() {
        let p = Position::new(0.0, 0.0);
        let a = Position::new(3.0, 4.0);
        assert!(approx(p.distance_to_line(&a, &a), 5.0));
    }

    #[test]
    fn test_move_towards_partial_then_clamped() {
        let mut p = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);

        p.move_towards(&target, 2.0);
        assert!(approx(p.x, 1.2));
        assert!(approx(p.y, 1.6));

        p.move_towards(&target, 10.0);
        assert_eq!(p, target);
    }

    #[test]
    fn test_move_towards_at_target_is_noop() {
        let mut p = Position::new(0.5, -0.5);
        p.move_towards(&Position::new(0.5, -0.5), 1.0);
        assert_eq!(p, Position::new(0.5, -0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0.5, -1.0).to_string(), "(0.5, -1)");
    }
}
