/*
 * Canvas Module
 *
 * The drawing surface the engine renders onto. `Canvas` is the small set of
 * primitives a frame needs; `NannouCanvas` implements it on top of a nannou
 * `Draw`, and `RecordingCanvas` keeps the calls in memory for headless runs
 * and tests.
 *
 * All coordinates are surface pixels: origin at the top-left, y pointing down.
 */

use nannou::prelude::*;

use crate::surface::Bounds;

// Number of discs used to approximate a radial gradient
const GLOW_RINGS: usize = 12;

pub trait Canvas {
    // Wipe the surface before a new frame
    fn clear(&mut self, bounds: Bounds, background: Rgb8);

    fn line(&mut self, start: Point2, end: Point2, weight: f32, color: Rgba8);

    // Radial gradient centred on `center`; `stops` are (offset in 0..=1, colour)
    fn radial_glow(&mut self, center: Point2, radius: f32, stops: &[(f32, Rgba8)]);

    // Filled and stroked axis-aligned square
    fn square_marker(&mut self, center: Point2, half_size: f32, fill: Rgba8, stroke: Rgba8, stroke_weight: f32);
}

// Canvas backed by a nannou `Draw`
pub struct NannouCanvas {
    root: Draw,
    // `root` transformed into surface space; rebuilt on every clear
    surface: Draw,
    viewport: Rect,
}

impl NannouCanvas {
    pub fn new(draw: Draw, viewport: Rect) -> Self {
        let surface = Self::surface_space(&draw, viewport);
        Self { root: draw, surface, viewport }
    }

    // Window rect the surface is anchored to (top-left corner)
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn draw(&self) -> &Draw {
        &self.root
    }

    // Map top-left/y-down surface pixels onto nannou's centred, y-up space
    fn surface_space(draw: &Draw, viewport: Rect) -> Draw {
        draw.x_y(viewport.left(), viewport.top()).scale_y(-1.0)
    }
}

impl Canvas for NannouCanvas {
    fn clear(&mut self, _bounds: Bounds, background: Rgb8) {
        self.root.reset();
        self.root.background().color(background);
        self.surface = Self::surface_space(&self.root, self.viewport);
    }

    fn line(&mut self, start: Point2, end: Point2, weight: f32, color: Rgba8) {
        self.surface.line().start(start).end(end).weight(weight).color(color);
    }

    fn radial_glow(&mut self, center: Point2, radius: f32, stops: &[(f32, Rgba8)]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        // Outermost disc first so inner discs composite on top
        for (t, color) in glow_rings(stops) {
            self.surface.ellipse().xy(center).radius(radius * t).color(color);
        }
    }

    fn square_marker(&mut self, center: Point2, half_size: f32, fill: Rgba8, stroke: Rgba8, stroke_weight: f32) {
        let size = half_size * 2.0;
        self.surface.rect().xy(center).w_h(size, size).color(fill);
        self.surface
            .rect()
            .xy(center)
            .w_h(size, size)
            .no_fill()
            .stroke(stroke)
            .stroke_weight(stroke_weight);
    }
}

// Concentric discs (radius fraction, colour) whose composite opacity at
// each ring radius matches the gradient sampled there, outermost first.
pub fn glow_rings(stops: &[(f32, Rgba8)]) -> Vec<(f32, Rgba8)> {
    let mut rings = Vec::with_capacity(GLOW_RINGS);
    let mut outer_alpha = 0.0_f32;

    for k in (1..=GLOW_RINGS).rev() {
        let t = k as f32 / GLOW_RINGS as f32;
        let color = sample_stops(stops, t);
        let target = color.alpha as f32 / 255.0;

        // 1 - target = (1 - a) * (1 - outer_alpha)
        let alpha = if outer_alpha >= 1.0 {
            0.0
        } else {
            (1.0 - (1.0 - target) / (1.0 - outer_alpha)).clamp(0.0, 1.0)
        };
        outer_alpha = outer_alpha.max(target);

        if alpha > 0.0 {
            rings.push((t, rgba8(color.red, color.green, color.blue, (alpha * 255.0).round() as u8)));
        }
    }

    rings
}

// Linear interpolation between gradient stops
pub fn sample_stops(stops: &[(f32, Rgba8)], t: f32) -> Rgba8 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return rgba8(0, 0, 0, 0),
    };
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }

    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t >= t0 && t <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            let f = (t - t0) / span;
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
            return rgba8(
                lerp(c0.red, c1.red),
                lerp(c0.green, c1.green),
                lerp(c0.blue, c1.blue),
                lerp(c0.alpha, c1.alpha),
            );
        }
    }

    last.1
}

// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { bounds: Bounds, background: Rgb8 },
    Line { start: Point2, end: Point2, weight: f32, color: Rgba8 },
    Glow { center: Point2, radius: f32, stops: Vec<(f32, Rgba8)> },
    Marker { center: Point2, half_size: f32, fill: Rgba8, stroke: Rgba8, stroke_weight: f32 },
}

// Headless canvas that records every call
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn clears(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Clear { .. })).count()
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    pub fn markers(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Marker { .. })).count()
    }

    // Ops recorded since the most recent clear, including the clear itself
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear { .. }))
            .unwrap_or(0);
        &self.ops[start..]
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, bounds: Bounds, background: Rgb8) {
        self.ops.push(DrawOp::Clear { bounds, background });
    }

    fn line(&mut self, start: Point2, end: Point2, weight: f32, color: Rgba8) {
        self.ops.push(DrawOp::Line { start, end, weight, color });
    }

    fn radial_glow(&mut self, center: Point2, radius: f32, stops: &[(f32, Rgba8)]) {
        self.ops.push(DrawOp::Glow { center, radius, stops: stops.to_vec() });
    }

    fn square_marker(&mut self, center: Point2, half_size: f32, fill: Rgba8, stroke: Rgba8, stroke_weight: f32) {
        self.ops.push(DrawOp::Marker { center, half_size, fill, stroke, stroke_weight });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> [(f32, Rgba8); 3] {
        [
            (0.0, rgba8(0, 240, 255, 255)),
            (0.4, rgba8(0, 240, 255, 0xaa)),
            (1.0, rgba8(0, 240, 255, 0)),
        ]
    }

    #[test]
    fn sampling_hits_stops_exactly() {
        let stops = stops();
        assert_eq!(sample_stops(&stops, 0.0).alpha, 255);
        assert_eq!(sample_stops(&stops, 0.4).alpha, 0xaa);
        assert_eq!(sample_stops(&stops, 1.0).alpha, 0);
        assert_eq!(sample_stops(&stops, 1.7).alpha, 0);
    }

    #[test]
    fn sampling_interpolates_between_stops() {
        let stops = stops();
        let mid = sample_stops(&stops, 0.7);
        assert_eq!(mid.alpha, 85);
        assert_eq!((mid.red, mid.green, mid.blue), (0, 240, 255));
    }

    #[test]
    fn empty_gradient_samples_transparent() {
        assert_eq!(sample_stops(&[], 0.5).alpha, 0);
    }

    #[test]
    fn glow_rings_run_outside_in() {
        let rings = glow_rings(&stops());
        assert!(!rings.is_empty());
        assert!(rings.windows(2).all(|w| w[0].0 > w[1].0));
        // The outermost ring sits on the transparent stop and is skipped
        assert!(rings[0].0 < 1.0);
    }

    #[test]
    fn recording_canvas_splits_frames_on_clear() {
        let mut canvas = RecordingCanvas::default();
        let bounds = Bounds::new(10.0, 10.0);
        canvas.clear(bounds, rgb8(0, 0, 0));
        canvas.line(pt2(0.0, 0.0), pt2(1.0, 1.0), 1.0, rgba8(0, 0, 0, 10));
        canvas.clear(bounds, rgb8(0, 0, 0));
        canvas.square_marker(pt2(2.0, 2.0), 8.0, rgba8(0, 0, 0, 1), rgba8(0, 0, 0, 2), 2.0);

        assert_eq!(canvas.clears(), 2);
        assert_eq!(canvas.lines(), 1);
        assert_eq!(canvas.last_frame().len(), 2);
    }
}
