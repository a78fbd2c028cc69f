/*
 * Engine Module
 *
 * One node network instance: its surface bounds, node population, edge
 * graph, render loop, random source and canvas. Instances share nothing,
 * so several backdrops can run side by side.
 *
 * The host talks to an engine through three calls (mount, unmount, resize)
 * and delivers scheduled frames back to it.
 */

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::connections::{ConnectionGraph, Edge, EdgeStyle};
use crate::debug::FrameStats;
use crate::error::EngineError;
use crate::params::NetworkParams;
use crate::particle::Particle;
use crate::particle_system::ParticleSystem;
use crate::render_loop::{LoopState, RenderLoop};
use crate::scheduler::{FrameHandle, FrameScheduler, RefreshScheduler};
use crate::surface::{Bounds, SurfaceManager};

pub struct Engine<C: Canvas, S: FrameScheduler = RefreshScheduler> {
    params: NetworkParams,
    surface: SurfaceManager,
    // Present only while mounted
    particles: Option<ParticleSystem>,
    graph: ConnectionGraph,
    render_loop: RenderLoop<S>,
    canvas: Option<C>,
    rng: StdRng,
    // The missing-surface warning is logged at most once per engine
    surface_warned: bool,
    stats: FrameStats,
}

impl<C: Canvas> Engine<C, RefreshScheduler> {
    pub fn new(params: NetworkParams) -> Self {
        Self::with_scheduler(params, RefreshScheduler::new())
    }

    // Host hook for each display refresh: run the frame that is due, if any
    pub fn on_refresh(&mut self) -> bool {
        match self.render_loop.scheduler_mut().poll() {
            Some(handle) => self.frame(handle),
            None => false,
        }
    }
}

impl<C: Canvas, S: FrameScheduler> Engine<C, S> {
    pub fn with_scheduler(params: NetworkParams, scheduler: S) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let surface = SurfaceManager::new(0.0, 0.0, params.surface_height, params.motion_band);
        let graph = ConnectionGraph::new(params.connection_distance, params.edge_strategy);

        Self {
            params,
            surface,
            particles: None,
            graph,
            render_loop: RenderLoop::new(scheduler),
            canvas: None,
            rng,
            surface_warned: false,
            stats: FrameStats::default(),
        }
    }

    // Attach a canvas, seed the population and start the loop.
    // Without a canvas nothing renders and the loop stays stopped.
    pub fn mount(&mut self, canvas: Option<C>, viewport_width: f32, viewport_height: f32) -> Result<(), EngineError> {
        if self.render_loop.is_running() {
            debug!("node network already mounted; ignoring mount");
            return Ok(());
        }

        let canvas = match canvas {
            Some(canvas) => canvas,
            None => {
                if !self.surface_warned {
                    warn!("{}", EngineError::SurfaceUnavailable);
                    self.surface_warned = true;
                }
                return Err(EngineError::SurfaceUnavailable);
            }
        };

        self.surface.resize(viewport_width, viewport_height);
        let field = self.surface.field();
        let particles = ParticleSystem::init(
            self.params.particle_count,
            field,
            self.params.velocity_range,
            &self.params.palette,
            &mut self.rng,
        )
        .with_style(self.params.particle_radius, self.params.glow_radius);

        info!(
            "mounted node network: {} nodes on {:.0}x{:.0} surface ({:.0}x{:.0} field)",
            particles.len(),
            self.surface.bounds().width,
            self.surface.bounds().height,
            field.width,
            field.height
        );

        self.particles = Some(particles);
        self.canvas = Some(canvas);
        self.stats = FrameStats::default();
        self.render_loop.start();
        Ok(())
    }

    // Stop the loop and release the canvas and the population
    pub fn unmount(&mut self) -> Option<C> {
        self.render_loop.stop();
        self.particles = None;
        let canvas = self.canvas.take();
        if canvas.is_some() {
            debug!("unmounted node network after {} frames", self.stats.frames);
        }
        canvas
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
        let bounds = self.surface.bounds();
        debug!("node network surface resized to {:.0}x{:.0}", bounds.width, bounds.height);
    }

    // Run one scheduled frame: clear, edges, nodes, step, reschedule.
    // Returns false when the handle is stale or the loop is stopped.
    pub fn frame(&mut self, handle: FrameHandle) -> bool {
        if !self.render_loop.begin_frame(handle) {
            return false;
        }

        let (canvas, particles) = match (self.canvas.as_mut(), self.particles.as_mut()) {
            (Some(canvas), Some(particles)) => (canvas, particles),
            _ => {
                self.render_loop.stop();
                return false;
            }
        };

        let bounds = self.surface.bounds();
        let field = self.surface.field();
        canvas.clear(bounds, self.params.background_rgb());

        let mut edge_count = 0;
        if self.params.show_connections {
            edge_count = self.graph.compute(particles.particles(), field).len();
            let style = EdgeStyle {
                color: self.params.edge_rgba(),
                weight: self.params.edge_weight,
            };
            self.graph.render(particles.particles(), canvas, style);
        }

        particles.render(canvas, &self.params.palette, self.params.marker_stroke_weight);
        particles.step(field);

        if self.stats.frames == 0 {
            debug!("first node network frame: {} edges", edge_count);
        }
        self.stats = FrameStats {
            particles: particles.len(),
            edges: edge_count,
            frames: self.stats.frames + 1,
        };

        self.render_loop.end_frame();
        true
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    pub fn bounds(&self) -> Bounds {
        self.surface.bounds()
    }

    pub fn field(&self) -> Bounds {
        self.surface.field()
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.particles {
            Some(system) => system.particles(),
            None => &[],
        }
    }

    // Edges computed by the most recent frame
    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    pub fn state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.render_loop.pending()
    }

    pub fn scheduler(&self) -> &S {
        self.render_loop.scheduler()
    }
}
