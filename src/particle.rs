/*
 * Particle Module
 *
 * This module defines the Particle struct: a drifting network node with a
 * constant velocity that bounces off the edges of the motion field.
 * Each node is drawn as a soft radial glow with a small square marker on top.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::canvas::Canvas;
use crate::params::Palette;
use crate::surface::Bounds;

// Glow identifier, resolved to a colour through the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glow {
    Primary,
    Accent,
}

// Alpha of the gradient stop at 40% of the glow radius
const GLOW_MID_ALPHA: u8 = 0xaa;
// Alpha of the square marker fill
const MARKER_FILL_ALPHA: u8 = 0xcc;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub glow_radius: f32,
    pub glow: Glow,
}

impl Particle {
    pub fn new(position: Point2, velocity: Vec2, glow: Glow) -> Self {
        Self {
            position,
            velocity,
            radius: crate::PARTICLE_RADIUS,
            glow_radius: crate::GLOW_RADIUS,
            glow,
        }
    }

    // Random node inside `field`, velocity uniform in [-max_speed, max_speed] per axis
    pub fn random<R: Rng + ?Sized>(rng: &mut R, field: Bounds, max_speed: f32, palette: &Palette) -> Self {
        let max_speed = max_speed.abs();
        let x = rng.gen_range(0.0..=field.width.max(0.0));
        let y = rng.gen_range(0.0..=field.height.max(0.0));
        let vx = rng.gen_range(-max_speed..=max_speed);
        let vy = rng.gen_range(-max_speed..=max_speed);

        let accent_ratio = palette.accent_ratio.clamp(0.0, 1.0);
        let glow = if rng.gen_bool(accent_ratio) { Glow::Accent } else { Glow::Primary };

        Self::new(pt2(x, y), vec2(vx, vy), glow)
    }

    // Advance by one tick of constant drift
    pub fn update(&mut self) {
        self.position += self.velocity;
    }

    // Turn the velocity back towards the field on any axis the node has left.
    // The position itself is not clamped; the overshoot is at most one tick.
    pub fn reflect_edges(&mut self, field: Bounds) {
        if self.position.x < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > field.width {
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > field.height {
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    // Draw the glow and the marker; no state changes
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, palette: &Palette, stroke_weight: f32) {
        let stops = [
            (0.0, palette.with_alpha(self.glow, 0xff)),
            (0.4, palette.with_alpha(self.glow, GLOW_MID_ALPHA)),
            (1.0, palette.with_alpha(self.glow, 0x00)),
        ];
        canvas.radial_glow(self.position, self.glow_radius, &stops);

        canvas.square_marker(
            self.position,
            self.radius,
            palette.with_alpha(self.glow, MARKER_FILL_ALPHA),
            palette.with_alpha(self.glow, 0xff),
            stroke_weight,
        );
    }
}
