/*
 * Flock Module
 *
 * The Flock owns every boid and advances them once per tick. Boids are stepped
 * in insertion order against the live list, so a boid handled later in a tick
 * already sees the new positions of the boids handled before it. This is an
 * approximation of simultaneous movement, but a deterministic one.
 *
 * The parallel mode trades that ordering for throughput: all flocking forces
 * are computed against the state at the start of the tick and only applied
 * once every force is known.
 */

use nannou::prelude::*;
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::renderer::{NullRenderer, Renderer};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UpdateMode {
    #[default]
    Sequential,
    Parallel,
}

#[derive(Clone, Debug, Default)]
pub struct Flock {
    boids: Vec<Boid>,
}

impl Flock {
    pub fn new() -> Self {
        Self::default()
    }

    // Create a flock of `params.num_agents` random boids spread over the surface
    pub fn populate<R: Rng + ?Sized>(params: &SimulationParams, surface: Surface, rng: &mut R) -> Self {
        let mut flock = Self::new();
        flock.reset(params, surface, rng);
        flock
    }

    // Resize the flock to `params.num_agents`, keeping existing boids and
    // drawing new ones at random positions
    pub fn resize<R: Rng + ?Sized>(&mut self, params: &SimulationParams, surface: Surface, rng: &mut R) {
        let target = params.num_agents;
        self.boids.truncate(target);

        while self.boids.len() < target {
            let position = random_position(rng, surface);
            self.boids.push(Boid::random(rng, position, params));
        }

        self.set_limits(params.max_speed, params.max_force);
        debug!(boids = self.boids.len(), "flock resized");
    }

    // Replace every boid with a freshly drawn one
    pub fn reset<R: Rng + ?Sized>(&mut self, params: &SimulationParams, surface: Surface, rng: &mut R) {
        self.boids.clear();
        self.resize(params, surface, rng);
    }

    pub fn add(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn remove(&mut self, index: usize) -> Option<Boid> {
        if index < self.boids.len() {
            Some(self.boids.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.boids.clear();
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Boid> {
        self.boids.iter()
    }

    // Update max speed and force for all boids
    pub fn set_limits(&mut self, max_speed: f32, max_force: f32) {
        for boid in &mut self.boids {
            boid.max_speed = max_speed;
            boid.max_force = max_force;
        }
    }

    // Advance every boid by one tick
    pub fn tick(&mut self, surface: Surface) {
        self.tick_with(surface, UpdateMode::Sequential, &mut NullRenderer);
    }

    // Advance every boid by one tick, drawing each one right after its step
    pub fn run<R: Renderer + ?Sized>(&mut self, surface: Surface, renderer: &mut R) {
        self.tick_with(surface, UpdateMode::Sequential, renderer);
    }

    pub fn tick_with<R: Renderer + ?Sized>(&mut self, surface: Surface, mode: UpdateMode, renderer: &mut R) {
        match mode {
            UpdateMode::Sequential => self.tick_sequential(surface, renderer),
            UpdateMode::Parallel => self.tick_parallel(surface, renderer),
        }
    }

    // Draw the current state of every boid without advancing the simulation
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for boid in &self.boids {
            renderer.draw_agent(boid.sprite());
        }
    }

    fn tick_sequential<R: Renderer + ?Sized>(&mut self, surface: Surface, renderer: &mut R) {
        // Participants are fixed at the start of the tick
        let count = self.boids.len();

        for i in 0..count {
            let force = self.boids[i].flocking_force(&self.boids);
            let boid = &mut self.boids[i];
            boid.advance(force, surface);
            renderer.draw_agent(boid.sprite());
        }
    }

    fn tick_parallel<R: Renderer + ?Sized>(&mut self, surface: Surface, renderer: &mut R) {
        // Every force reads the same snapshot; nothing moves until all are known
        let snapshot = &self.boids;
        let forces: Vec<Vec2> = snapshot
            .par_iter()
            .map(|boid| boid.flocking_force(snapshot))
            .collect();

        for (boid, force) in self.boids.iter_mut().zip(forces) {
            boid.advance(force, surface);
            renderer.draw_agent(boid.sprite());
        }
    }
}

impl<'a> IntoIterator for &'a Flock {
    type Item = &'a Boid;
    type IntoIter = std::slice::Iter<'a, Boid>;

    fn into_iter(self) -> Self::IntoIter {
        self.boids.iter()
    }
}

// Uniform position over the surface
fn random_position<R: Rng + ?Sized>(rng: &mut R, surface: Surface) -> Point2 {
    let x = if surface.width > 0.0 { rng.gen_range(0.0..surface.width) } else { 0.0 };
    let y = if surface.height > 0.0 { rng.gen_range(0.0..surface.height) } else { 0.0 };
    pt2(x, y)
}
