/*
 * Boid Shapes
 *
 * A flock of translucent triangles and squares drifting across the window,
 * driven by the three classic boid rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Set RUST_LOG (e.g. `RUST_LOG=boid_shapes=debug`) to change log verbosity.
 */

use boid_shapes::app;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    nannou::app(app::model).update(app::update).run();
}
