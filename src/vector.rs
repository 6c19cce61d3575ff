/*
 * Vector Module
 *
 * Guarded vector helpers used by the steering code. nannou's Vec2 already
 * provides the arithmetic operators; this trait adds the operations that must
 * never produce NaN (normalizing or dividing a zero quantity) along with the
 * speed/force limiting used throughout the simulation.
 */

use nannou::prelude::*;

pub trait SteeringVector: Sized {
    // Unit vector in the same direction, or zero for a zero-length vector
    fn unit(self) -> Self;

    // Elementwise division that yields the zero vector for a zero divisor
    fn divide_or_zero(self, divisor: f32) -> Self;

    // Rescale to exactly `max` when longer than `max`
    fn limit(self, max: f32) -> Self;

    fn magnitude(self) -> f32;

    // Angle in radians, 0 along +X
    fn heading(self) -> f32;
}

impl SteeringVector for Vec2 {
    fn unit(self) -> Self {
        let length = self.length();
        if length > 0.0 {
            self / length
        } else {
            Vec2::ZERO
        }
    }

    fn divide_or_zero(self, divisor: f32) -> Self {
        if divisor == 0.0 {
            Vec2::ZERO
        } else {
            self / divisor
        }
    }

    fn limit(self, max: f32) -> Self {
        let length_squared = self.length_squared();
        if length_squared > max * max {
            self * (max / length_squared.sqrt())
        } else {
            self
        }
    }

    fn magnitude(self) -> f32 {
        self.length()
    }

    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
