/*
 * Surface Module
 *
 * The drawing surface the flock lives on. Simulation coordinates have their
 * origin in the top-left corner with y growing downwards; nannou draws with
 * the origin at the window center and y growing upwards, so this module also
 * owns the conversion from one to the other.
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Build a surface matching a window rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.w(), rect.h())
    }

    pub fn resize(&mut self, size: Vec2) {
        self.width = size.x;
        self.height = size.y;
    }

    // Convert a point from surface space to nannou's centered screen space
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
