/*
 * Surface Module
 *
 * This module defines the SurfaceManager, the single owner of the drawing
 * surface's pixel dimensions. Other components only read the bounds.
 *
 * Resizing never moves existing nodes: a node left outside freshly shrunk
 * bounds drifts back in once the next step reflects its velocity.
 */

use nannou::prelude::*;

// Surface rectangle in pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0) }
    }

    pub fn contains(&self, point: Point2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

pub struct SurfaceManager {
    bounds: Bounds,
    // Fixed surface height; `None` follows the viewport
    fixed_height: Option<f32>,
    // Height of the band nodes drift in
    motion_band: Option<f32>,
}

impl SurfaceManager {
    pub fn new(viewport_width: f32, viewport_height: f32, fixed_height: Option<f32>, motion_band: Option<f32>) -> Self {
        let mut surface = Self {
            bounds: Bounds::new(0.0, 0.0),
            fixed_height,
            motion_band,
        };
        surface.resize(viewport_width, viewport_height);
        surface
    }

    // Apply a viewport size. Width always follows; height only without a fixed height.
    pub fn resize(&mut self, width: f32, height: f32) {
        let height = self.fixed_height.unwrap_or(height);
        self.bounds = Bounds::new(width, height);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    // Rectangle the nodes are kept in
    pub fn field(&self) -> Bounds {
        match self.motion_band {
            Some(band) => Bounds::new(self.bounds.width, self.bounds.height.min(band)),
            None => self.bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_follows_viewport_without_fixed_height() {
        let mut surface = SurfaceManager::new(800.0, 600.0, None, None);
        surface.resize(1024.0, 300.0);
        assert_eq!(surface.bounds(), Bounds::new(1024.0, 300.0));
        assert_eq!(surface.field(), surface.bounds());
    }

    #[test]
    fn fixed_height_ignores_viewport_height() {
        let mut surface = SurfaceManager::new(1280.0, 900.0, Some(400.0), Some(250.0));
        assert_eq!(surface.bounds(), Bounds::new(1280.0, 400.0));
        surface.resize(640.0, 1200.0);
        assert_eq!(surface.bounds(), Bounds::new(640.0, 400.0));
        assert_eq!(surface.field(), Bounds::new(640.0, 250.0));
    }

    #[test]
    fn motion_band_never_exceeds_the_surface() {
        let surface = SurfaceManager::new(500.0, 120.0, None, Some(250.0));
        assert_eq!(surface.field(), Bounds::new(500.0, 120.0));
    }

    #[test]
    fn negative_sizes_collapse_to_zero() {
        let surface = SurfaceManager::new(-5.0, -1.0, None, None);
        assert_eq!(surface.bounds(), Bounds::new(0.0, 0.0));
    }
}
