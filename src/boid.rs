/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Neighbors are found with an exhaustive scan over the whole flock. A boid
 * recognises itself only by being at distance zero, so two distinct boids that
 * land on exactly the same point ignore each other as well.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;
use crate::renderer::{AgentSprite, ShapeKind};
use crate::surface::Surface;
use crate::vector::{distance, SteeringVector};
use crate::{
    ALIGNMENT_WEIGHT_DIVISOR, COHESION_WEIGHT_DIVISOR, DEFAULT_MAX_FORCE, DEFAULT_MAX_SPEED,
    NEIGHBOR_DISTANCE, SEPARATION_FACTOR, SEPARATION_WEIGHT_DIVISOR,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub alpha: f32,
    pub shape: ShapeKind,
}

impl Boid {
    pub fn new(position: Point2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            radius,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            alpha: 30.0,
            shape: ShapeKind::PlainRect,
        }
    }

    // Draw a boid at `position` with velocity, size, opacity and shape taken
    // from the ranges in `params`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, position: Point2, params: &SimulationParams) -> Self {
        let vx = rng.gen_range(params.velocity_range.clone());
        let vy = rng.gen_range(params.velocity_range.clone());
        let mut radius = rng.gen_range(params.radius_range.clone());
        let alpha = rng.gen_range(params.alpha_range.clone());
        let shape = ShapeKind::from_roll(rng.gen_range(1..10));

        // Triangles are drawn as half of a square, so shrink them to match
        if shape == ShapeKind::Triangle {
            radius -= 0.5 * radius;
        }

        Self {
            position,
            velocity: vec2(vx, vy),
            acceleration: Vec2::ZERO,
            radius,
            max_speed: params.max_speed,
            max_force: params.max_force,
            alpha,
            shape,
        }
    }

    // Full per-tick update against a read-only view of the flock
    pub fn step(&mut self, boids: &[Boid], surface: Surface) {
        let force = self.flocking_force(boids);
        self.advance(force, surface);
    }

    // Apply a precomputed steering force, integrate and wrap
    pub fn advance(&mut self, force: Vec2, surface: Surface) {
        self.apply_force(force);
        self.update();
        self.wrap_boundary(surface);
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Accumulate the weighted separation, alignment and cohesion forces
    pub fn flock(&mut self, boids: &[Boid]) {
        let force = self.flocking_force(boids);
        self.apply_force(force);
    }

    // Combined steering force, weighted by size. Larger boids push harder.
    pub fn flocking_force(&self, boids: &[Boid]) -> Vec2 {
        let separation = self.separate(boids) * (self.radius / SEPARATION_WEIGHT_DIVISOR);
        let alignment = self.align(boids) * (self.radius / ALIGNMENT_WEIGHT_DIVISOR);
        let cohesion = self.cohesion(boids) * (self.radius / COHESION_WEIGHT_DIVISOR);

        separation + alignment + cohesion
    }

    // Update the boid's position based on its velocity and acceleration
    pub fn update(&mut self) {
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    // Wrap around the surface edges, using the radius as margin so the shape
    // is fully off screen before it reappears
    pub fn wrap_boundary(&mut self, surface: Surface) {
        let r = self.radius;

        if self.position.x < -r {
            self.position.x = surface.width + r;
        }
        if self.position.y < -r {
            self.position.y = surface.height + r;
        }
        if self.position.x > surface.width + r {
            self.position.x = -r;
        }
        if self.position.y > surface.height + r {
            self.position.y = -r;
        }
    }

    // Steer towards a target at full speed
    pub fn seek(&self, target: Point2) -> Vec2 {
        let desired = (target - self.position).unit() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }

    // Calculate separation force (avoid crowding neighbors)
    pub fn separate(&self, boids: &[Boid]) -> Vec2 {
        let desired_separation = self.radius * SEPARATION_FACTOR;
        let mut steering = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = distance(self.position, other.position);

            if d > 0.0 && d < desired_separation {
                // Point away from the neighbor, weighted by distance
                steering += (self.position - other.position).unit() / d;
                count += 1;
            }
        }

        let steering = steering.divide_or_zero(count as f32);

        if steering.magnitude() > 0.0 {
            // Reynolds: Steering = Desired - Velocity
            (steering.unit() * self.max_speed - self.velocity).limit(self.max_force)
        } else {
            steering
        }
    }

    // Calculate alignment force (steer towards average heading of neighbors)
    pub fn align(&self, boids: &[Boid]) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = distance(self.position, other.position);

            if d > 0.0 && d < NEIGHBOR_DISTANCE {
                sum += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        let desired = (sum / count as f32).unit() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, boids: &[Boid]) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = distance(self.position, other.position);

            if d > 0.0 && d < NEIGHBOR_DISTANCE {
                sum += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        self.seek(sum / count as f32)
    }

    pub fn sprite(&self) -> AgentSprite {
        AgentSprite {
            position: self.position,
            heading: self.velocity.heading(),
            radius: self.radius,
            alpha: self.alpha,
            shape: self.shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    fn still(x: f32, y: f32, radius: f32) -> Boid {
        Boid::new(pt2(x, y), Vec2::ZERO, radius)
    }

    #[test]
    fn update_limits_speed_and_clears_acceleration() {
        let mut boid = Boid::new(pt2(10.0, 10.0), vec2(2.5, 0.0), 30.0);
        boid.apply_force(vec2(5.0, 5.0));
        boid.update();

        assert!(boid.velocity.magnitude() <= boid.max_speed + EPSILON);
        assert_eq!(boid.acceleration, Vec2::ZERO);
        assert_eq!(boid.position, pt2(10.0, 10.0) + boid.velocity);
    }

    #[test]
    fn update_keeps_slow_velocity() {
        let mut boid = Boid::new(pt2(0.0, 0.0), vec2(0.5, -0.25), 30.0);
        boid.update();
        assert_eq!(boid.velocity, vec2(0.5, -0.25));
        assert_eq!(boid.position, pt2(0.5, -0.25));
    }

    #[test]
    fn wraps_each_edge_to_the_opposite_side() {
        let surface = Surface::new(800.0, 600.0);
        let r = 25.0;

        let mut left = still(-r - 1.0, 300.0, r);
        left.wrap_boundary(surface);
        assert_eq!(left.position.x, 800.0 + r);

        let mut top = still(400.0, -r - 1.0, r);
        top.wrap_boundary(surface);
        assert_eq!(top.position.y, 600.0 + r);

        let mut right = still(800.0 + r + 1.0, 300.0, r);
        right.wrap_boundary(surface);
        assert_eq!(right.position.x, -r);

        let mut bottom = still(400.0, 600.0 + r + 1.0, r);
        bottom.wrap_boundary(surface);
        assert_eq!(bottom.position.y, -r);
    }

    #[test]
    fn wrap_leaves_margin_positions_alone() {
        let surface = Surface::new(800.0, 600.0);
        let mut boid = still(-10.0, 610.0, 20.0);
        boid.wrap_boundary(surface);
        assert_eq!(boid.position, pt2(-10.0, 610.0));
    }

    #[test]
    fn separate_points_away_from_close_neighbor() {
        let boid = still(100.0, 100.0, 20.0);
        let other = still(130.0, 110.0, 20.0);
        let steer = boid.separate(&[boid.clone(), other.clone()]);

        assert!(steer.magnitude() > 0.0);
        assert!(steer.magnitude() <= boid.max_force + EPSILON);
        assert!(steer.dot(boid.position - other.position) > 0.0);
    }

    #[test]
    fn separate_ignores_distant_and_coincident_boids() {
        let boid = still(100.0, 100.0, 20.0);
        let far = still(161.0, 100.0, 20.0);
        let twin = still(100.0, 100.0, 20.0);
        assert_eq!(boid.separate(&[boid.clone(), far, twin]), Vec2::ZERO);
    }

    #[test]
    fn align_and_cohesion_without_neighbors_are_zero() {
        let boid = Boid::new(pt2(0.0, 0.0), vec2(1.0, 0.0), 20.0);
        let far = Boid::new(pt2(50.0, 0.0), vec2(0.0, 1.0), 20.0);
        let group = [boid.clone(), far];

        assert_eq!(boid.align(&group), Vec2::ZERO);
        assert_eq!(boid.cohesion(&group), Vec2::ZERO);
    }

    #[test]
    fn align_steers_towards_neighbor_heading() {
        let boid = Boid::new(pt2(0.0, 0.0), vec2(1.0, 0.0), 20.0);
        let other = Boid::new(pt2(10.0, 0.0), vec2(0.0, 2.0), 20.0);
        let steer = boid.align(&[boid.clone(), other]);

        assert!((steer.magnitude() - boid.max_force).abs() < EPSILON);
        assert!(steer.y > 0.0);
        assert!(steer.x < 0.0);
    }

    #[test]
    fn cohesion_with_one_neighbor_matches_seek() {
        let boid = Boid::new(pt2(10.0, 10.0), vec2(0.2, 0.1), 30.0);
        let other = Boid::new(pt2(40.0, 30.0), vec2(-0.3, 0.0), 30.0);
        let group = [boid.clone(), other.clone()];

        assert_eq!(boid.cohesion(&group), boid.seek(other.position));
    }

    #[test]
    fn seek_is_bounded_by_max_force() {
        let boid = Boid::new(pt2(0.0, 0.0), vec2(-3.0, 0.0), 30.0);
        let steer = boid.seek(pt2(500.0, 0.0));
        assert!((steer.magnitude() - boid.max_force).abs() < EPSILON);
        assert!(steer.x > 0.0);
    }

    #[test]
    fn flock_accumulates_size_weighted_forces() {
        let boid = still(0.0, 0.0, 30.0);
        let other = still(1.0, 0.0, 30.0);
        let group = [boid.clone(), other];

        let expected = boid.separate(&group) * (30.0 / 20.0)
            + boid.align(&group) * (30.0 / 30.0)
            + boid.cohesion(&group) * (30.0 / 30.0);

        let mut flocking = boid.clone();
        flocking.flock(&group);
        assert_eq!(flocking.acceleration, expected);
        // Separation outweighs cohesion at close range
        assert!(flocking.acceleration.x < 0.0);
    }

    #[test]
    fn step_runs_flock_update_and_wrap() {
        let surface = Surface::new(200.0, 200.0);
        let mut boid = Boid::new(pt2(-20.5, 100.0), vec2(-1.0, 0.0), 20.0);
        let snapshot = [boid.clone()];
        boid.step(&snapshot, surface);

        assert_eq!(boid.position.x, 220.0);
        assert_eq!(boid.acceleration, Vec2::ZERO);
    }

    #[test]
    fn random_boids_stay_within_ranges() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_triangle = false;

        for _ in 0..500 {
            let boid = Boid::random(&mut rng, pt2(5.0, 5.0), &params);
            assert!(params.velocity_range.contains(&boid.velocity.x));
            assert!(params.velocity_range.contains(&boid.velocity.y));
            assert!(params.alpha_range.contains(&boid.alpha));

            if boid.shape == ShapeKind::Triangle {
                seen_triangle = true;
                assert!(boid.radius >= 10.0 && boid.radius < 40.0);
            } else {
                assert!(params.radius_range.contains(&boid.radius));
            }
            assert_eq!(boid.max_speed, params.max_speed);
            assert_eq!(boid.max_force, params.max_force);
        }

        assert!(seen_triangle);
    }

    #[test]
    fn sprite_reports_heading_and_shape() {
        let mut boid = Boid::new(pt2(3.0, 4.0), vec2(0.0, 2.0), 12.0);
        boid.shape = ShapeKind::RoundedTopRect;
        let sprite = boid.sprite();

        assert_eq!(sprite.position, pt2(3.0, 4.0));
        assert!((sprite.heading - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
        assert_eq!(sprite.radius, 12.0);
        assert_eq!(sprite.shape, ShapeKind::RoundedTopRect);
    }
}
