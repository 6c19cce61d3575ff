/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding the tunable values of
 * the simulation: flock size, steering limits, the random ranges new agents
 * are drawn from and the tick rate. A subset can be modified through the UI,
 * so the struct also provides snapshot-based change detection.
 */

use std::ops::Range;

use crate::error::{ParamsError, ParamsResult};
use crate::flock::UpdateMode;
use crate::{DEFAULT_MAX_FORCE, DEFAULT_MAX_SPEED};

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub num_agents: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub radius_range: Range<f32>,
    pub velocity_range: Range<f32>,
    pub alpha_range: Range<f32>,
    pub frame_rate: f32,
    // Fixed seed for reproducible runs, entropy when None
    pub seed: Option<u64>,
    pub enable_parallel: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    previous_values: Option<ParamSnapshot>,
}

// A snapshot of the UI-editable values used for change detection
#[derive(Clone, Debug)]
struct ParamSnapshot {
    num_agents: usize,
    max_speed: f32,
    max_force: f32,
    enable_parallel: bool,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_agents: 20,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            radius_range: 20.0..80.0,
            velocity_range: -0.5..0.5,
            alpha_range: 10.0..50.0,
            frame_rate: 16.0,
            seed: None,
            enable_parallel: false,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    pub fn with_num_agents(mut self, num_agents: usize) -> Self {
        self.num_agents = num_agents;
        self
    }

    pub fn validate(&self) -> ParamsResult<()> {
        positive("max_speed", self.max_speed)?;
        positive("max_force", self.max_force)?;
        positive("frame_rate", self.frame_rate)?;

        non_empty("radius", &self.radius_range)?;
        non_empty("velocity", &self.velocity_range)?;
        non_empty("alpha", &self.alpha_range)?;

        if self.radius_range.start <= 0.0 {
            return Err(ParamsError::NonPositiveRadius(self.radius_range.start));
        }

        Ok(())
    }

    pub fn update_mode(&self) -> UpdateMode {
        if self.enable_parallel {
            UpdateMode::Parallel
        } else {
            UpdateMode::Sequential
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_agents: self.num_agents,
            max_speed: self.max_speed,
            max_force: self.max_force,
            enable_parallel: self.enable_parallel,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (num_agents_changed, limits_changed, any_ui_changed)
    pub fn detect_changes(&self) -> (bool, bool, bool) {
        let Some(prev) = &self.previous_values else {
            return (false, false, false);
        };

        let num_agents_changed = self.num_agents != prev.num_agents;
        let limits_changed = self.max_speed != prev.max_speed || self.max_force != prev.max_force;
        let ui_changed = num_agents_changed
            || limits_changed
            || self.enable_parallel != prev.enable_parallel
            || self.show_debug != prev.show_debug
            || self.pause_simulation != prev.pause_simulation;

        (num_agents_changed, limits_changed, ui_changed)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_agents_range() -> std::ops::RangeInclusive<usize> {
        0..=500
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }

    pub fn get_max_force_range() -> std::ops::RangeInclusive<f32> {
        0.005..=0.5
    }
}

fn positive(name: &'static str, value: f32) -> ParamsResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NonPositive { name, value })
    }
}

fn non_empty(name: &'static str, range: &Range<f32>) -> ParamsResult<()> {
    if range.start < range.end {
        Ok(())
    } else {
        Err(ParamsError::EmptyRange {
            name,
            start: range.start,
            end: range.end,
        })
    }
}
