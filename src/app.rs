/*
 * Application Module
 *
 * This module defines the main application model and logic for the boid
 * simulation. It creates the window, ticks the flock at a fixed rate and keeps
 * the drawing surface in sync with the window size.
 *
 * nannou calls `update` once per displayed frame. The flock advances on its
 * own fixed timestep (16 ticks per second by default), so a frame may run
 * zero or several ticks depending on how much time has accumulated.
 */

use std::time::Duration;

use anyhow::{anyhow, Context};
use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::renderer::{view, NullRenderer};
use crate::surface::Surface;
use crate::ui;

// Upper bound on catch-up ticks after a long stall
const MAX_TICKS_PER_FRAME: usize = 8;

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub surface: Surface,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub rng: StdRng,
    pub clock: TickClock,
}

// Fixed timestep accumulator driving the flock independently of the frame rate
#[derive(Clone, Debug)]
pub struct TickClock {
    accumulator: Duration,
    interval: Duration,
}

impl TickClock {
    pub fn new(ticks_per_second: f32) -> Self {
        Self {
            accumulator: Duration::ZERO,
            interval: Duration::from_secs_f32(1.0 / ticks_per_second),
        }
    }

    // Add elapsed time and return how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.interval;
            ticks += 1;
        }

        // Drop the backlog instead of fast-forwarding the flock
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

// Initialize the model, exiting if the window cannot be created
pub fn model(app: &App) -> Model {
    match try_model(app) {
        Ok(model) => model,
        Err(err) => {
            error!("failed to start simulation: {err:#}");
            std::process::exit(1);
        }
    }
}

fn try_model(app: &App) -> anyhow::Result<Model> {
    let params = SimulationParams::default();
    params.validate().context("invalid simulation parameters")?;

    // Size the window to 80% of the primary monitor when one is known
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((800.0, 600.0));

    let window_id = app
        .new_window()
        .title("Boid Shapes")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .map_err(|err| anyhow!("failed to build window: {err:?}"))?;

    let window = app
        .window(window_id)
        .context("window closed before setup finished")?;

    let egui = Egui::from_window(&window);
    let surface = Surface::from_rect(window.rect());

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let flock = Flock::populate(&params, surface, &mut rng);
    info!(
        boids = flock.len(),
        width = surface.width,
        height = surface.height,
        seed = ?params.seed,
        "flock populated"
    );

    let clock = TickClock::new(params.frame_rate);

    Ok(Model {
        flock,
        params,
        surface,
        egui,
        debug_info: DebugInfo::default(),
        rng,
        clock,
    })
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);

    let (should_reset_flock, num_agents_changed, limits_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if should_reset_flock {
        model.flock.reset(&model.params, model.surface, &mut model.rng);
        info!(boids = model.flock.len(), "flock reset");
    } else if num_agents_changed {
        model.flock.resize(&model.params, model.surface, &mut model.rng);
        info!(boids = model.flock.len(), "flock size changed");
    }

    if limits_changed {
        model.flock.set_limits(model.params.max_speed, model.params.max_force);
        debug!(
            max_speed = model.params.max_speed,
            max_force = model.params.max_force,
            "steering limits changed"
        );
    }

    if model.params.pause_simulation {
        model.clock.reset();
        model.debug_info.record_ticks(0);
        return;
    }

    let ticks = model.clock.advance(update.since_last);
    let mode = model.params.update_mode();
    for _ in 0..ticks {
        model.flock.tick_with(model.surface, mode, &mut NullRenderer);
    }
    model.debug_info.record_ticks(ticks);
}

// Keep the simulation surface matching the window
fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.surface.resize(size);
    info!(width = size.x, height = size.y, "surface resized");
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ticks_once_per_interval() {
        let mut clock = TickClock::new(16.0);
        assert_eq!(clock.advance(Duration::from_millis(30)), 0);
        assert_eq!(clock.advance(Duration::from_millis(40)), 1);
        assert_eq!(clock.advance(Duration::from_millis(125)), 2);
    }

    #[test]
    fn clock_drops_backlog_after_a_stall() {
        let mut clock = TickClock::new(16.0);
        assert_eq!(clock.advance(Duration::from_secs(10)), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn reset_discards_partial_time() {
        let mut clock = TickClock::new(16.0);
        clock.advance(Duration::from_millis(60));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
    }
}
