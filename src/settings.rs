//! Field configuration
//!
//! Immutable for the life of an animator. Loaded from JSON (a `data-config`
//! attribute on the web, a file on native) with every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::Rgba;

/// Density preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Sparse,
    #[default]
    Normal,
    Dense,
}

impl Density {
    /// Particle count for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            Density::Sparse => 40,
            Density::Normal => 80,
            Density::Dense => 150,
        }
    }
}

/// Opaque colour channels; alpha is decided per draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("particle size range is empty ({min} > {max})")]
    SizeRange { min: f32, max: f32 },
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be in [0, 1], got {value}")]
    AlphaRange { name: &'static str, value: f32 },
}

/// Particle field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Preset used when no explicit `particle_count` is given
    pub density: Density,
    /// Explicit particle count; overrides `density`
    pub particle_count: Option<usize>,
    /// Particle radius range in pixels
    pub size_min: f32,
    pub size_max: f32,
    /// Each velocity component is drawn from [-speed_scale/2, speed_scale/2]
    pub speed_scale: f32,

    // === Particle-particle links ===
    pub connection_distance: f32,
    pub link_color: Rgb,
    pub link_alpha: f32,
    pub link_width: f32,

    // === Cursor ===
    pub cursor_radius: f32,
    pub cursor_link_color: Rgb,
    pub cursor_link_alpha: f32,
    pub cursor_link_width: f32,

    pub particle_color: Rgb,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: Density::Normal,
            particle_count: None,
            size_min: 1.0,
            size_max: 3.0,
            speed_scale: 0.5,

            connection_distance: 150.0,
            link_color: Rgb::new(100, 200, 255),
            link_alpha: 0.2,
            link_width: 0.5,

            cursor_radius: 150.0,
            cursor_link_color: Rgb::new(100, 200, 255),
            cursor_link_alpha: 0.4,
            cursor_link_width: 1.0,

            particle_color: Rgb::new(100, 200, 255),
        }
    }
}

impl FieldConfig {
    /// Defaults with an explicit particle count
    pub fn with_count(count: usize) -> Self {
        Self {
            particle_count: Some(count),
            ..Self::default()
        }
    }

    /// Particles per regeneration: the explicit count, else the preset's
    pub fn particle_count(&self) -> usize {
        self.particle_count
            .unwrap_or_else(|| self.density.particle_count())
    }

    /// Parse and validate a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // serde_json maps out-of-range f32 literals (e.g. 1e40) to infinity
        for (name, value) in [
            ("size_min", self.size_min),
            ("size_max", self.size_max),
            ("speed_scale", self.speed_scale),
            ("connection_distance", self.connection_distance),
            ("link_alpha", self.link_alpha),
            ("link_width", self.link_width),
            ("cursor_radius", self.cursor_radius),
            ("cursor_link_alpha", self.cursor_link_alpha),
            ("cursor_link_width", self.cursor_link_width),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        if self.size_min > self.size_max {
            return Err(ConfigError::SizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        for (name, value) in [
            ("size_min", self.size_min),
            ("connection_distance", self.connection_distance),
            ("cursor_radius", self.cursor_radius),
            ("link_width", self.link_width),
            ("cursor_link_width", self.cursor_link_width),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.speed_scale < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "speed_scale",
                value: self.speed_scale,
            });
        }
        for (name, value) in [
            ("link_alpha", self.link_alpha),
            ("cursor_link_alpha", self.cursor_link_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::AlphaRange { name, value });
            }
        }
        Ok(())
    }
}
