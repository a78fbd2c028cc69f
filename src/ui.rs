/*
 * UI Module
 *
 * Read-only debug overlay drawn with nannou_egui. The network's parameters
 * are fixed per instance, so the panel only reports; it never edits.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::NetworkParams;
use crate::render_loop::LoopState;

// Lines shown in the stats section, in display order
pub fn stats_lines(debug_info: &DebugInfo) -> Vec<String> {
    let state = match debug_info.loop_state {
        LoopState::Running => "running",
        LoopState::Stopped => "stopped",
    };
    vec![
        format!("Loop: {}", state),
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Frames: {}", debug_info.stats.frames),
        format!("Nodes: {}", debug_info.stats.particles),
        format!("Edges: {}", debug_info.stats.edges),
        format!("Edge density: {:.1}%", debug_info.edge_density() * 100.0),
        format!("Surface: {:.0}x{:.0}", debug_info.bounds.width, debug_info.bounds.height),
        format!("Field: {:.0}x{:.0}", debug_info.field.width, debug_info.field.height),
    ]
}

pub fn update_ui(egui: &mut Egui, params: &NetworkParams, debug_info: &DebugInfo) {
    let ctx = egui.begin_frame();

    egui::Window::new("Node Network")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Stats", |ui| {
                for line in stats_lines(debug_info) {
                    ui.label(line);
                }
            });

            ui.collapsing("Parameters", |ui| {
                ui.label(format!("Node count: {}", params.particle_count));
                ui.label(format!("Velocity range: ±{:.2}", params.velocity_range));
                ui.label(format!("Connection distance: {:.0}", params.connection_distance));
                ui.label(format!("Connections: {}", if params.show_connections { "on" } else { "off" }));
                ui.label(format!("Edge strategy: {:?}", params.edge_strategy));
                ui.label(format!("Accent ratio: {:.2}", params.palette.accent_ratio));
                match params.seed {
                    Some(seed) => ui.label(format!("Seed: {}", seed)),
                    None => ui.label("Seed: entropy"),
                };
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::FrameStats;

    #[test]
    fn stats_lines_report_counts() {
        let info = DebugInfo {
            stats: FrameStats { particles: 12, edges: 6, frames: 90 },
            loop_state: LoopState::Running,
            ..DebugInfo::default()
        };
        let lines = stats_lines(&info);
        assert_eq!(lines[0], "Loop: running");
        assert!(lines.contains(&"Nodes: 12".to_string()));
        assert!(lines.contains(&"Edges: 6".to_string()));
        assert!(lines.contains(&"Frames: 90".to_string()));
    }
}
