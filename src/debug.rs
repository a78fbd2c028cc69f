/*
 * Debug Information Module
 *
 * Read-only statistics about the running network, shown by the host's
 * debug overlay.
 */

use std::time::Duration;

use crate::render_loop::LoopState;
use crate::surface::Bounds;

// Counts recorded by the engine for the most recent frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub particles: usize,
    pub edges: usize,
    pub frames: u64,
}

// Debug information to display
#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub stats: FrameStats,
    pub loop_state: LoopState,
    pub bounds: Bounds,
    pub field: Bounds,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            stats: FrameStats::default(),
            loop_state: LoopState::Stopped,
            bounds: Bounds::new(0.0, 0.0),
            field: Bounds::new(0.0, 0.0),
        }
    }
}

impl DebugInfo {
    // Share of all node pairs that are currently connected
    pub fn edge_density(&self) -> f32 {
        let n = self.stats.particles;
        if n < 2 {
            return 0.0;
        }
        let pairs = n * (n - 1) / 2;
        self.stats.edges as f32 / pairs as f32
    }
}
