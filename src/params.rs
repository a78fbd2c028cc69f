/*
 * Network Parameters Module
 *
 * This module defines the NetworkParams struct that holds the fixed,
 * per-instance configuration of a node network engine. Values are chosen
 * once at construction (optionally loaded from a JSON file) and are not
 * adjustable after mount.
 */

use std::ops::RangeInclusive;
use std::path::Path;

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::connections::EdgeStrategy;
use crate::error::ConfigError;
use crate::particle::Glow;

// Two-colour glow palette; a minority (or half) of the nodes get the accent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: [u8; 3],
    pub accent: [u8; 3],
    // Probability that a node is assigned the accent colour
    pub accent_ratio: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: [0x10, 0xB9, 0x81],
            accent: [0x00, 0xF0, 0xFF],
            accent_ratio: 0.5,
        }
    }
}

impl Palette {
    pub fn rgb(&self, glow: Glow) -> [u8; 3] {
        match glow {
            Glow::Primary => self.primary,
            Glow::Accent => self.accent,
        }
    }

    // Colour of a glow with the given alpha
    pub fn with_alpha(&self, glow: Glow, alpha: u8) -> Rgba8 {
        let [r, g, b] = self.rgb(glow);
        rgba8(r, g, b, alpha)
    }
}

// Configuration of one node network instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    pub particle_count: usize,
    // Each velocity axis is drawn uniformly from [-velocity_range, velocity_range]
    pub velocity_range: f32,
    pub connection_distance: f32,
    // Half-size of the square node marker
    pub particle_radius: f32,
    pub glow_radius: f32,
    pub marker_stroke_weight: f32,
    pub palette: Palette,
    pub edge_color: [u8; 3],
    pub edge_alpha: f32,
    pub edge_weight: f32,
    pub background: [u8; 3],
    // Fixed surface height; `None` follows the viewport height
    pub surface_height: Option<f32>,
    // Height of the band the nodes drift in; `None` uses the whole surface
    pub motion_band: Option<f32>,
    pub show_connections: bool,
    pub edge_strategy: EdgeStrategy,
    pub seed: Option<u64>,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            particle_count: 12,
            velocity_range: 0.15,
            connection_distance: 200.0,
            particle_radius: crate::PARTICLE_RADIUS,
            glow_radius: crate::GLOW_RADIUS,
            marker_stroke_weight: 2.0,
            palette: Palette::default(),
            edge_color: [0, 240, 255],
            edge_alpha: 0.15,
            edge_weight: 1.0,
            background: [0x0A, 0x0A, 0x0A],
            surface_height: Some(400.0),
            motion_band: Some(250.0),
            show_connections: true,
            edge_strategy: EdgeStrategy::Pairwise,
            seed: None,
        }
    }
}

impl NetworkParams {
    // Load params from a JSON file; missing fields fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: NetworkParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // Check every numeric value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = Self::particle_count_range();
        check(
            "particle_count",
            self.particle_count as f64,
            (*counts.start() as f64)..=(*counts.end() as f64),
        )?;
        check_f32("velocity_range", self.velocity_range, Self::velocity_range_range())?;
        check_f32("connection_distance", self.connection_distance, Self::distance_range())?;
        check_f32("particle_radius", self.particle_radius, Self::radius_range())?;
        check_f32("glow_radius", self.glow_radius, Self::glow_radius_range())?;
        check_f32("marker_stroke_weight", self.marker_stroke_weight, Self::stroke_weight_range())?;
        check("palette.accent_ratio", self.palette.accent_ratio, Self::ratio_range())?;
        check_f32("edge_alpha", self.edge_alpha, 0.0..=1.0)?;
        check_f32("edge_weight", self.edge_weight, Self::stroke_weight_range())?;
        if let Some(height) = self.surface_height {
            check_f32("surface_height", height, Self::extent_range())?;
        }
        if let Some(band) = self.motion_band {
            check_f32("motion_band", band, Self::extent_range())?;
        }
        Ok(())
    }

    pub fn edge_rgba(&self) -> Rgba8 {
        let [r, g, b] = self.edge_color;
        rgba8(r, g, b, (self.edge_alpha * 255.0).round() as u8)
    }

    pub fn background_rgb(&self) -> Rgb8 {
        let [r, g, b] = self.background;
        rgb8(r, g, b)
    }

    pub fn particle_count_range() -> RangeInclusive<usize> {
        0..=1000
    }

    pub fn velocity_range_range() -> RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn distance_range() -> RangeInclusive<f32> {
        0.0..=2000.0
    }

    pub fn radius_range() -> RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn glow_radius_range() -> RangeInclusive<f32> {
        0.0..=200.0
    }

    pub fn stroke_weight_range() -> RangeInclusive<f32> {
        0.0..=20.0
    }

    pub fn ratio_range() -> RangeInclusive<f64> {
        0.0..=1.0
    }

    pub fn extent_range() -> RangeInclusive<f32> {
        1.0..=16384.0
    }
}

fn check_f32(field: &'static str, value: f32, range: RangeInclusive<f32>) -> Result<(), ConfigError> {
    let range = (*range.start() as f64)..=(*range.end() as f64);
    check(field, value as f64, range)
}

fn check(field: &'static str, value: f64, range: RangeInclusive<f64>) -> Result<(), ConfigError> {
    // NaN fails `contains` too
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(NetworkParams::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params = NetworkParams::from_json(r#"{ "particle_count": 40, "seed": 7 }"#).unwrap();
        assert_eq!(params.particle_count, 40);
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.connection_distance, 200.0);
        assert_eq!(params.palette, Palette::default());
    }

    #[test]
    fn edge_strategy_parses_lowercase() {
        let params = NetworkParams::from_json(r#"{ "edge_strategy": "grid" }"#).unwrap();
        assert_eq!(params.edge_strategy, EdgeStrategy::Grid);
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let err = NetworkParams::from_json(r#"{ "palette": { "accent_ratio": 1.5 } }"#).unwrap_err();
        match err {
            ConfigError::OutOfRange { field, value } => {
                assert_eq!(field, "palette.accent_ratio");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            NetworkParams::from_json("{ particle_count: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            NetworkParams::load("/nonexistent/node-network.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn json_survives_a_save_and_load() {
        let mut params = NetworkParams::default();
        params.show_connections = false;
        params.motion_band = None;
        let json = params.to_json().unwrap();
        assert_eq!(NetworkParams::from_json(&json).unwrap(), params);
    }

    #[test]
    fn edge_colour_uses_configured_alpha() {
        let edge = NetworkParams::default().edge_rgba();
        assert_eq!((edge.red, edge.green, edge.blue), (0, 240, 255));
        assert_eq!(edge.alpha, 38);
    }
}
