/*
 * Renderer Module
 *
 * This module handles the rendering of the boid simulation.
 * The flock only knows about the Renderer trait: after each boid is stepped it
 * hands over an AgentSprite describing where and how to draw it. The nannou
 * implementation turns sprites into filled polygons, and the view function
 * draws the whole frame together with the debug overlay and the egui panel.
 */

use std::f32::consts::{FRAC_PI_2, PI};

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::surface::Surface;
use crate::ui;
use crate::{NEIGHBOR_DISTANCE, SEPARATION_FACTOR};

pub const BACKGROUND: (u8, u8, u8) = (253, 242, 233);
const TRIANGLE_FILL: (u8, u8, u8) = (166, 126, 91);
const RECT_FILL: (u8, u8, u8) = (45, 48, 64);

// Points per rounded corner
const ARC_SEGMENTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    RoundedOneCornerRect,
    RoundedTopRect,
    PlainRect,
}

impl ShapeKind {
    // Map a die roll in 1..=9 to a shape; anything past 3 is a plain square
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => ShapeKind::Triangle,
            2 => ShapeKind::RoundedOneCornerRect,
            3 => ShapeKind::RoundedTopRect,
            _ => ShapeKind::PlainRect,
        }
    }

    pub fn fill(self) -> (u8, u8, u8) {
        match self {
            ShapeKind::Triangle => TRIANGLE_FILL,
            _ => RECT_FILL,
        }
    }
}

// Everything a renderer needs to draw one boid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSprite {
    pub position: Point2,
    // Direction of travel in radians, 0 along +X
    pub heading: f32,
    pub radius: f32,
    pub alpha: f32,
    pub shape: ShapeKind,
}

pub trait Renderer {
    fn draw_agent(&mut self, sprite: AgentSprite);
}

// Outline of a shape in its local frame (y down), pointing up, centered on the
// origin inside an r x r square
pub fn shape_outline(shape: ShapeKind, r: f32) -> Vec<Point2> {
    let h = r / 2.0;

    match shape {
        ShapeKind::Triangle => vec![pt2(h, -h), pt2(-h, -h), pt2(-h, h)],
        ShapeKind::RoundedOneCornerRect => rounded_square(h, [h, 0.0, 0.0, 0.0]),
        ShapeKind::RoundedTopRect => rounded_square(h, [h, h, 0.0, 0.0]),
        ShapeKind::PlainRect => rounded_square(h, [0.0; 4]),
    }
}

// Square with half-size `h` and corner radii in top-left, top-right,
// bottom-right, bottom-left order
fn rounded_square(h: f32, corners: [f32; 4]) -> Vec<Point2> {
    let layout = [
        (pt2(-h, -h), vec2(1.0, 1.0), PI),
        (pt2(h, -h), vec2(-1.0, 1.0), PI * 1.5),
        (pt2(h, h), vec2(-1.0, -1.0), 0.0),
        (pt2(-h, h), vec2(1.0, -1.0), FRAC_PI_2),
    ];

    let mut points = Vec::with_capacity(4 * (ARC_SEGMENTS + 1));

    for ((corner, inward, start), radius) in layout.into_iter().zip(corners) {
        if radius <= 0.0 {
            points.push(corner);
            continue;
        }

        let center = corner + inward * radius;
        for i in 0..=ARC_SEGMENTS {
            let angle = start + FRAC_PI_2 * (i as f32 / ARC_SEGMENTS as f32);
            points.push(center + vec2(angle.cos(), angle.sin()) * radius);
        }
    }

    points
}

// Rotation to hand to nannou for a heading in surface space. Shapes point up,
// and flipping y reverses the direction of rotation.
pub fn screen_rotation(heading: f32) -> f32 {
    -(heading + FRAC_PI_2)
}

pub struct NannouRenderer<'a> {
    draw: &'a Draw,
    surface: Surface,
}

impl<'a> NannouRenderer<'a> {
    pub fn new(draw: &'a Draw, surface: Surface) -> Self {
        Self { draw, surface }
    }
}

impl Renderer for NannouRenderer<'_> {
    fn draw_agent(&mut self, sprite: AgentSprite) {
        let (r, g, b) = sprite.shape.fill();
        let alpha = sprite.alpha.clamp(0.0, 255.0) as u8;
        let points = shape_outline(sprite.shape, sprite.radius)
            .into_iter()
            .map(|p| pt2(p.x, -p.y));

        self.draw
            .polygon()
            .color(rgba(r, g, b, alpha))
            .points(points)
            .xy(self.surface.to_screen(sprite.position))
            .rotate(screen_rotation(sprite.heading));
    }
}

// Discards every sprite, for ticks that only compute the new state
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_agent(&mut self, _sprite: AgentSprite) {}
}

// Collects sprites instead of drawing them, for headless runs
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub sprites: Vec<AgentSprite>,
}

impl Renderer for RecordingRenderer {
    fn draw_agent(&mut self, sprite: AgentSprite) {
        self.sprites.push(sprite);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let (r, g, b) = BACKGROUND;
    draw.background().color(rgb(r, g, b));

    let mut renderer = NannouRenderer::new(&draw, model.surface);
    model.flock.render(&mut renderer);

    if model.params.show_debug {
        if let Some(first) = model.flock.boids().first() {
            let center = model.surface.to_screen(first.position);

            draw.ellipse()
                .xy(center)
                .radius(NEIGHBOR_DISTANCE)
                .no_fill()
                .stroke(BLUE)
                .stroke_weight(1.0);

            draw.ellipse()
                .xy(center)
                .radius(first.radius * SEPARATION_FACTOR)
                .no_fill()
                .stroke(RED)
                .stroke_weight(1.0);
        }

        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect(), model.flock.len(), model.surface);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(?err, "failed to draw frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(?err, "failed to draw ui");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn inside_square(points: &[Point2], r: f32) -> bool {
        let h = r / 2.0 + EPSILON;
        points.iter().all(|p| p.x.abs() <= h && p.y.abs() <= h)
    }

    #[test]
    fn rolls_map_to_shapes() {
        assert_eq!(ShapeKind::from_roll(1), ShapeKind::Triangle);
        assert_eq!(ShapeKind::from_roll(2), ShapeKind::RoundedOneCornerRect);
        assert_eq!(ShapeKind::from_roll(3), ShapeKind::RoundedTopRect);
        for roll in 4..10 {
            assert_eq!(ShapeKind::from_roll(roll), ShapeKind::PlainRect);
        }
    }

    #[test]
    fn fills_match_shape_family() {
        assert_eq!(ShapeKind::Triangle.fill(), (166, 126, 91));
        assert_eq!(ShapeKind::PlainRect.fill(), (45, 48, 64));
        assert_eq!(ShapeKind::RoundedTopRect.fill(), (45, 48, 64));
    }

    #[test]
    fn triangle_outline_is_half_square() {
        let points = shape_outline(ShapeKind::Triangle, 20.0);
        assert_eq!(points, vec![pt2(10.0, -10.0), pt2(-10.0, -10.0), pt2(-10.0, 10.0)]);
    }

    #[test]
    fn plain_rect_outline_is_square_corners() {
        let points = shape_outline(ShapeKind::PlainRect, 10.0);
        assert_eq!(
            points,
            vec![pt2(-5.0, -5.0), pt2(5.0, -5.0), pt2(5.0, 5.0), pt2(-5.0, 5.0)]
        );
    }

    #[test]
    fn rounded_outlines_stay_inside_square() {
        for shape in [ShapeKind::RoundedOneCornerRect, ShapeKind::RoundedTopRect] {
            let points = shape_outline(shape, 40.0);
            assert!(inside_square(&points, 40.0));
            // A rounded corner never reaches the square's corner point
            assert!(!points.contains(&pt2(-20.0, -20.0)));
        }
    }

    #[test]
    fn one_corner_rect_keeps_three_sharp_corners() {
        let points = shape_outline(ShapeKind::RoundedOneCornerRect, 40.0);
        assert_eq!(points.len(), ARC_SEGMENTS + 1 + 3);
        assert!(points.contains(&pt2(20.0, 20.0)));
        assert!(points.contains(&pt2(-20.0, 20.0)));

        let top = shape_outline(ShapeKind::RoundedTopRect, 40.0);
        assert_eq!(top.len(), 2 * (ARC_SEGMENTS + 1) + 2);
    }

    #[test]
    fn arcs_start_and_end_on_the_edges() {
        let points = shape_outline(ShapeKind::RoundedOneCornerRect, 40.0);
        // Left edge at the top-left arc's start, top edge at its end
        assert!((points[0].x + 20.0).abs() < EPSILON && points[0].y.abs() < EPSILON);
        let end = points[ARC_SEGMENTS];
        assert!(end.x.abs() < EPSILON && (end.y + 20.0).abs() < EPSILON);
    }

    #[test]
    fn rotation_points_shapes_along_heading() {
        // Heading 0 (moving +X) turns the up-pointing shape a quarter to the right
        assert!((screen_rotation(0.0) + FRAC_PI_2).abs() < EPSILON);
        assert!((screen_rotation(-FRAC_PI_2)).abs() < EPSILON);
    }

    #[test]
    fn recording_renderer_keeps_draw_order() {
        let sprite = |x: f32| AgentSprite {
            position: pt2(x, 0.0),
            heading: 0.0,
            radius: 10.0,
            alpha: 20.0,
            shape: ShapeKind::PlainRect,
        };
        let mut renderer = RecordingRenderer::default();
        renderer.draw_agent(sprite(1.0));
        renderer.draw_agent(sprite(2.0));
        assert_eq!(renderer.sprites, vec![sprite(1.0), sprite(2.0)]);
    }
}
