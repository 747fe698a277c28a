//! Render command implementation
//!
//! Evaluates a noise family over a pixel grid and writes an 8-bit grayscale
//! PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use vorpal_math::noise::{Fbm, Noise, PerlinNoise, SimplexNoise, WorleyNoise};

use crate::config::{NoiseKind, RenderConfig};
use crate::png::GrayImage;

/// Summary printed after a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub output: String,
    pub noise: NoiseKind,
    pub dimensions: u8,
    pub width: u32,
    pub height: u32,
    pub blake3: String,
}

/// Build the configured generator, wrapped in FBM when `octaves > 1`.
pub fn build_noise(config: &RenderConfig) -> Result<Box<dyn Noise>> {
    let base: Box<dyn Noise> = match config.noise {
        NoiseKind::Perlin => match config.repeat {
            Some(period) => Box::new(PerlinNoise::with_repeat(period)?),
            None => Box::new(PerlinNoise::new()),
        },
        NoiseKind::Simplex => Box::new(SimplexNoise),
        NoiseKind::Worley => Box::new(WorleyNoise::new(
            config.feature_density,
            config.worley_seed,
        )?),
    };

    if config.octaves > 1 {
        Ok(Box::new(
            Fbm::new(base)
                .with_octaves(config.octaves)
                .with_persistence(config.persistence)?
                .with_lacunarity(config.lacunarity)?,
        ))
    } else {
        Ok(base)
    }
}

/// Map a noise value to a gray level through the generator's unit range.
fn to_gray(noise: &dyn Noise, value: f64) -> u8 {
    (noise.to_unit(value).clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Evaluate the configured noise over the pixel grid, row-major.
pub fn render_pixels(config: &RenderConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let noise = build_noise(config)?;
    let dimensions = config.dimensions();
    let z = config.z.unwrap_or(0.0);
    let w = config.w.unwrap_or(0.0);

    tracing::debug!(
        noise = config.noise.as_str(),
        dimensions,
        width = config.width,
        height = config.height,
        "rendering noise"
    );

    let mut pixels = Vec::with_capacity(config.width as usize * config.height as usize);
    for py in 0..config.height {
        let y = py as f64 * config.scale;
        for px in 0..config.width {
            let x = px as f64 * config.scale;
            let value = match dimensions {
                2 => noise.noise2(x, y),
                3 => noise.noise3(x, y, z),
                _ => noise.noise4(x, y, z, w),
            };
            pixels.push(to_gray(noise.as_ref(), value));
        }
    }
    Ok(pixels)
}

/// Run the render command
///
/// # Arguments
/// * `config` - Fully merged render configuration
/// * `out` - Output PNG path
/// * `json` - Print a JSON report instead of coloured text
pub fn run(config: &RenderConfig, out: &str, json: bool) -> Result<ExitCode> {
    let pixels = render_pixels(config)?;
    let encoded = GrayImage::new(&pixels, config.width, config.height)
        .and_then(|image| image.encode())
        .context("Failed to encode PNG")?;

    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, &encoded.bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    let report = RenderReport {
        output: out.to_string(),
        noise: config.noise,
        dimensions: config.dimensions(),
        width: config.width,
        height: config.height,
        blake3: encoded.blake3,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", "Vorpal Render".cyan().bold());
        println!(
            "  {} {} noise, {}D, {}x{}",
            "->".green(),
            report.noise.as_str(),
            report.dimensions,
            report.width,
            report.height
        );
        println!("  {} wrote {}", "->".green(), report.output);
        println!("  {} blake3 {}", "->".green(), report.blake3.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(noise: NoiseKind) -> RenderConfig {
        RenderConfig {
            noise,
            width: 16,
            height: 8,
            scale: 0.2,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        for kind in [NoiseKind::Perlin, NoiseKind::Simplex, NoiseKind::Worley] {
            let a = render_pixels(&small(kind)).unwrap();
            let b = render_pixels(&small(kind)).unwrap();
            assert_eq!(a.len(), 16 * 8);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_slices_differ_from_plane() {
        let plane = render_pixels(&small(NoiseKind::Simplex)).unwrap();
        let slice = render_pixels(&RenderConfig {
            z: Some(0.37),
            ..small(NoiseKind::Simplex)
        })
        .unwrap();
        assert_ne!(plane, slice);
    }

    #[test]
    fn test_fbm_changes_output() {
        let plain = render_pixels(&small(NoiseKind::Perlin)).unwrap();
        let fractal = render_pixels(&RenderConfig {
            octaves: 4,
            ..small(NoiseKind::Perlin)
        })
        .unwrap();
        assert_ne!(plain, fractal);
    }

    #[test]
    fn test_to_gray() {
        let perlin = build_noise(&small(NoiseKind::Perlin)).unwrap();
        let simplex = build_noise(&small(NoiseKind::Simplex)).unwrap();
        let worley = build_noise(&small(NoiseKind::Worley)).unwrap();
        assert_eq!(to_gray(&perlin, -1.0), 0);
        assert_eq!(to_gray(&simplex, 1.0), 255);
        assert_eq!(to_gray(&perlin, 0.0), 128);
        assert_eq!(to_gray(&worley, 3.0), 255);
        assert_eq!(to_gray(&worley, 0.0), 0);
    }

    #[test]
    fn test_fractal_worley_keeps_distance_mapping() {
        let fractal = build_noise(&RenderConfig {
            octaves: 3,
            ..small(NoiseKind::Worley)
        })
        .unwrap();
        assert_eq!(to_gray(&fractal, 0.5), 128);
        assert_eq!(to_gray(&fractal, -0.5), 0);
    }

    #[test]
    fn test_invalid_generator_parameters() {
        let config = RenderConfig {
            feature_density: 0,
            ..small(NoiseKind::Worley)
        };
        assert!(render_pixels(&config).is_err());

        let config = RenderConfig {
            repeat: Some(0),
            ..small(NoiseKind::Perlin)
        };
        assert!(render_pixels(&config).is_err());
    }
}
