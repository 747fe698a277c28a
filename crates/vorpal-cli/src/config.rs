//! Render configuration.
//!
//! A render is described by a [`RenderConfig`], loaded from a JSON file or
//! built from defaults. Command-line flags are collected into
//! [`RenderOverrides`] and applied on top.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Noise family to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    Perlin,
    Simplex,
    Worley,
}

impl NoiseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
            NoiseKind::Worley => "worley",
        }
    }
}

/// Everything needed to render one noise image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub noise: NoiseKind,
    pub width: u32,
    pub height: u32,
    /// Lattice units per pixel.
    pub scale: f64,
    /// Third coordinate; renders a 3D slice when set.
    pub z: Option<f64>,
    /// Fourth coordinate; renders a 4D slice when set (`z` defaults to 0).
    pub w: Option<f64>,
    /// Fractal octaves; 1 renders the plain noise.
    pub octaves: u8,
    pub persistence: f64,
    pub lacunarity: f64,
    /// Perlin repeat period in lattice cells.
    pub repeat: Option<u32>,
    /// Worley feature points per cell.
    pub feature_density: u32,
    /// Worley seed.
    pub worley_seed: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            noise: NoiseKind::Perlin,
            width: 256,
            height: 256,
            scale: 1.0 / 32.0,
            z: None,
            w: None,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            repeat: None,
            feature_density: 1,
            worley_seed: 0,
        }
    }
}

impl RenderConfig {
    /// Largest accepted width or height, in pixels.
    pub const MAX_DIMENSION: u32 = 4096;

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("must be at least 1, got {}x{}", self.width, self.height),
            });
        }
        if self.width > Self::MAX_DIMENSION || self.height > Self::MAX_DIMENSION {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!(
                    "must be at most {}, got {}x{}",
                    Self::MAX_DIMENSION,
                    self.width,
                    self.height
                ),
            });
        }
        for (field, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and > 0, got {}", value),
                });
            }
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "scale",
                reason: format!("must be finite and > 0, got {}", self.scale),
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::Invalid {
                field: "octaves",
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [("z", self.z), ("w", self.w)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ConfigError::Invalid {
                        field,
                        reason: format!("must be finite, got {}", v),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of noise dimensions sampled.
    pub fn dimensions(&self) -> u8 {
        match (self.z, self.w) {
            (_, Some(_)) => 4,
            (Some(_), None) => 3,
            (None, None) => 2,
        }
    }
}

/// Render settings given on the command line. Set fields replace the
/// corresponding config values.
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub noise: Option<NoiseKind>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<f64>,
    pub z: Option<f64>,
    pub w: Option<f64>,
    pub octaves: Option<u8>,
    pub repeat: Option<u32>,
    pub feature_density: Option<u32>,
    pub worley_seed: Option<i32>,
}

impl RenderOverrides {
    pub fn apply(self, mut config: RenderConfig) -> Result<RenderConfig, ConfigError> {
        if let Some(noise) = self.noise {
            config.noise = noise;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.z.is_some() {
            config.z = self.z;
        }
        if self.w.is_some() {
            config.w = self.w;
        }
        if let Some(octaves) = self.octaves {
            config.octaves = octaves;
        }
        if self.repeat.is_some() {
            config.repeat = self.repeat;
        }
        if let Some(density) = self.feature_density {
            config.feature_density = density;
        }
        if let Some(seed) = self.worley_seed {
            config.worley_seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}
