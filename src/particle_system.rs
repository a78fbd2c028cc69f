/*
 * Particle System Module
 *
 * Owns the fixed-size node population. Nodes are created once by `init`
 * and only mutated in place afterwards; the population is dropped as a
 * whole when the engine is torn down.
 */

use rand::Rng;

use crate::canvas::Canvas;
use crate::params::Palette;
use crate::particle::Particle;
use crate::surface::Bounds;

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    // `count` random nodes inside `field`, velocities in [-velocity_range, velocity_range]
    pub fn init<R: Rng + ?Sized>(
        count: usize,
        field: Bounds,
        velocity_range: f32,
        palette: &Palette,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(&mut *rng, field, velocity_range, palette))
            .collect();
        Self { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    // Apply marker and glow sizes to every node
    pub fn with_style(mut self, radius: f32, glow_radius: f32) -> Self {
        for particle in &mut self.particles {
            particle.radius = radius;
            particle.glow_radius = glow_radius;
        }
        self
    }

    // Drift every node one tick and reflect at the field edges
    pub fn step(&mut self, field: Bounds) {
        for particle in &mut self.particles {
            particle.update();
            particle.reflect_edges(field);
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, palette: &Palette, stroke_weight: f32) {
        for particle in &self.particles {
            particle.draw(canvas, palette, stroke_weight);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
