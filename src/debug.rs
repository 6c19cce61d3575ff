/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * displayed in the UI panel and the on-screen overlay.
 */

use std::time::Duration;

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Total simulation ticks since start
    pub ticks: u64,
    pub ticks_per_frame: usize,
}

impl DebugInfo {
    pub fn record_frame(&mut self, fps: f32, frame_time: Duration) {
        self.fps = fps;
        self.frame_time = frame_time;
    }

    pub fn record_ticks(&mut self, ticks: usize) {
        self.ticks += ticks as u64;
        self.ticks_per_frame = ticks;
    }
}
