/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui, plus the on-screen debug overlay. Parameter change
 * detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::surface::Surface;

// Update the UI and return whether the flock should be reset, whether the
// number of boids changed and whether the steering limits changed
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_reset_flock = false;

    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_agents, SimulationParams::get_num_agents_range())
                        .text("Number of Boids"),
                );

                if ui.button("Reset Flock").clicked() {
                    should_reset_flock = true;
                }

                ui.add(
                    egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range())
                        .text("Max Speed"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_force, SimulationParams::get_max_force_range())
                        .text("Max Force"),
                );
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Parallel Update");

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Ticks: {}", debug_info.ticks));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    let (num_agents_changed, limits_changed, _) = params.detect_changes();

    (should_reset_flock, num_agents_changed, limits_changed)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
    surface: Surface,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", boids_len),
        format!("Ticks: {} (+{})", debug_info.ticks, debug_info.ticks_per_frame),
        format!("Surface: {:.0}x{:.0}", surface.width, surface.height),
    ];

    // Background panel in the bottom-left corner, clear of the controls
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
