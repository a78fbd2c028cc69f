/*
 * Node Network - Module Definitions
 *
 * A decorative backdrop of drifting nodes joined by faint lines whenever two
 * nodes come close. This file defines the module structure and re-exports
 * the types a host needs to mount an engine.
 */

// Re-export key components for easier access
pub use canvas::{Canvas, NannouCanvas, RecordingCanvas};
pub use connections::{compute_edges, ConnectionGraph, Edge, EdgeStrategy};
pub use debug::{DebugInfo, FrameStats};
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use params::{NetworkParams, Palette};
pub use particle::{Glow, Particle};
pub use particle_system::ParticleSystem;
pub use render_loop::{LoopState, RenderLoop};
pub use scheduler::{FrameHandle, FrameScheduler, RefreshScheduler};
pub use surface::{Bounds, SurfaceManager};

// Define modules
pub mod canvas;
pub mod connections;
pub mod debug;
pub mod engine;
pub mod error;
pub mod params;
pub mod particle;
pub mod particle_system;
pub mod render_loop;
pub mod scheduler;
pub mod spatial_grid;
pub mod surface;
pub mod ui;

// Constants
pub const PARTICLE_RADIUS: f32 = 8.0;
pub const GLOW_RADIUS: f32 = 25.0;
