/*
 * Boid Shapes - Module Definitions
 *
 * This file defines the module structure for the boid simulation application.
 * The steering core (boid, flock, vector) does not depend on a window; the
 * remaining modules wire it into nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::Boid;
pub use debug::DebugInfo;
pub use error::ParamsError;
pub use flock::{Flock, UpdateMode};
pub use params::SimulationParams;
pub use renderer::{AgentSprite, Renderer, ShapeKind};
pub use surface::Surface;
pub use vector::SteeringVector;

// Define modules
pub mod app;
pub mod boid;
pub mod debug;
pub mod error;
pub mod flock;
pub mod params;
pub mod renderer;
pub mod surface;
pub mod ui;
pub mod vector;

// Steering constants
pub const DEFAULT_MAX_SPEED: f32 = 3.0;
pub const DEFAULT_MAX_FORCE: f32 = 0.04;
// Alignment and cohesion look this far for neighbors
pub const NEIGHBOR_DISTANCE: f32 = 50.0;
// Separation looks `radius * SEPARATION_FACTOR` far
pub const SEPARATION_FACTOR: f32 = 3.0;
pub const SEPARATION_WEIGHT_DIVISOR: f32 = 20.0;
pub const ALIGNMENT_WEIGHT_DIVISOR: f32 = 30.0;
pub const COHESION_WEIGHT_DIVISOR: f32 = 30.0;
