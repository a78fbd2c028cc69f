/*
 * Connections Module
 *
 * This module derives the proximity graph between nodes and draws it.
 * An edge joins two nodes whose distance is strictly below the connection
 * distance. The edge set is rebuilt from scratch every frame.
 *
 * The pairwise scan is O(n^2), which is fine for the tens to low hundreds of
 * nodes a backdrop uses. For larger populations the grid strategy bins nodes
 * into a SpatialGrid and only tests neighbouring cells; both strategies
 * produce the same edges in the same order.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;
use crate::surface::Bounds;

// Caps the grid size for tiny thresholds on large surfaces
const MAX_CELLS_PER_AXIS: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStrategy {
    #[default]
    Pairwise,
    Grid,
}

// Unordered pair of node indices, stored with a < b
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

// Stroke shared by every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Rgba8,
    pub weight: f32,
}

// Every pair (i, j), i < j, closer than `threshold`
pub fn compute_edges(particles: &[Particle], threshold: f32) -> Vec<Edge> {
    let mut edges = Vec::new();
    compute_edges_into(particles, threshold, &mut edges);
    edges
}

fn compute_edges_into(particles: &[Particle], threshold: f32, edges: &mut Vec<Edge>) {
    edges.clear();
    if threshold <= 0.0 {
        return;
    }
    let threshold_sq = threshold * threshold;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            if particles[i].position.distance_squared(particles[j].position) < threshold_sq {
                edges.push(Edge { a: i, b: j });
            }
        }
    }
}

pub struct ConnectionGraph {
    pub strategy: EdgeStrategy,
    pub threshold: f32,
    edges: Vec<Edge>,
    grid: Option<SpatialGrid>,
    nearby: Vec<usize>,
}

impl ConnectionGraph {
    pub fn new(threshold: f32, strategy: EdgeStrategy) -> Self {
        Self {
            strategy,
            threshold,
            edges: Vec::new(),
            grid: None,
            nearby: Vec::new(),
        }
    }

    // Rebuild the edge set from the current positions
    pub fn compute(&mut self, particles: &[Particle], bounds: Bounds) -> &[Edge] {
        match self.strategy {
            EdgeStrategy::Pairwise => compute_edges_into(particles, self.threshold, &mut self.edges),
            EdgeStrategy::Grid => self.compute_with_grid(particles, bounds),
        }
        &self.edges
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn compute_with_grid(&mut self, particles: &[Particle], bounds: Bounds) {
        self.edges.clear();
        if self.threshold <= 0.0 {
            return;
        }
        let threshold_sq = self.threshold * self.threshold;

        // Cells may be wider than the threshold, never narrower
        let cell_size = self.threshold.max(bounds.width.max(bounds.height) / MAX_CELLS_PER_AXIS);
        if !self.grid.as_ref().map_or(false, |grid| grid.fits(cell_size, bounds)) {
            self.grid = Some(SpatialGrid::new(cell_size, bounds));
        }
        let grid = match self.grid.as_mut() {
            Some(grid) => grid,
            None => return,
        };
        grid.clear();

        for (i, particle) in particles.iter().enumerate() {
            grid.insert(i, particle.position);
        }

        for (i, particle) in particles.iter().enumerate() {
            grid.nearby_indices(particle.position, &mut self.nearby);
            // Same order as the pairwise scan
            self.nearby.sort_unstable();
            for &j in self.nearby.iter().filter(|&&j| j > i) {
                if particle.position.distance_squared(particles[j].position) < threshold_sq {
                    self.edges.push(Edge { a: i, b: j });
                }
            }
        }
    }

    // One constant-style line per edge
    pub fn render<C: Canvas + ?Sized>(&self, particles: &[Particle], canvas: &mut C, style: EdgeStyle) {
        for edge in &self.edges {
            canvas.line(particles[edge.a].position, particles[edge.b].position, style.weight, style.color);
        }
    }
}
