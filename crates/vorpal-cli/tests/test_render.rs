//! End-to-end tests for the render command.

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use vorpal_cli::commands::render;
use vorpal_cli::config::{NoiseKind, RenderConfig, RenderOverrides};
use vorpal_cli::png::digest;

fn small(noise: NoiseKind) -> RenderConfig {
    RenderConfig {
        noise,
        width: 24,
        height: 12,
        scale: 0.15,
        ..RenderConfig::default()
    }
}

// ============================================================================
// Output files
// ============================================================================

/// A render writes a PNG, creating missing parent directories.
#[test]
fn test_render_writes_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested/deeper/perlin.png");

    render::run(&small(NoiseKind::Perlin), out.to_str().unwrap(), true).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

/// Rendering the same config twice produces byte-identical files.
#[test]
fn test_render_hash_is_stable() {
    let dir = tempdir().unwrap();
    for kind in [NoiseKind::Perlin, NoiseKind::Simplex, NoiseKind::Worley] {
        let a = dir.path().join(format!("{}-a.png", kind.as_str()));
        let b = dir.path().join(format!("{}-b.png", kind.as_str()));
        let config = RenderConfig {
            z: Some(0.5),
            w: Some(1.25),
            ..small(kind)
        };

        render::run(&config, a.to_str().unwrap(), true).unwrap();
        render::run(&config, b.to_str().unwrap(), true).unwrap();

        let hash_a = digest(&std::fs::read(&a).unwrap());
        let hash_b = digest(&std::fs::read(&b).unwrap());
        assert_eq!(hash_a, hash_b, "{} render not reproducible", kind.as_str());
    }
}

/// Invalid generator settings surface as errors and write nothing.
#[test]
fn test_render_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bad.png");
    let config = RenderConfig {
        feature_density: 0,
        ..small(NoiseKind::Worley)
    };

    assert!(render::run(&config, out.to_str().unwrap(), true).is_err());
    assert!(!out.exists());
}

// ============================================================================
// Config files
// ============================================================================

/// A JSON config file is loaded and command-line overrides win.
#[test]
fn test_config_file_with_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("render.json");
    std::fs::write(
        &path,
        r#"{ "noise": "simplex", "width": 40, "height": 20, "octaves": 3 }"#,
    )
    .unwrap();

    let base = RenderConfig::load(&path).unwrap();
    assert_eq!(base.noise, NoiseKind::Simplex);
    assert_eq!(base.octaves, 3);

    let merged = RenderOverrides {
        width: Some(8),
        z: Some(-2.0),
        ..Default::default()
    }
    .apply(base)
    .unwrap();
    assert_eq!(merged.width, 8);
    assert_eq!(merged.height, 20);
    assert_eq!(merged.dimensions(), 3);

    let out = dir.path().join("merged.png");
    render::run(&merged, out.to_str().unwrap(), false).unwrap();
    assert!(out.exists());
}

/// A missing config file is an IO error.
#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    assert!(RenderConfig::load(&dir.path().join("absent.json")).is_err());
}
