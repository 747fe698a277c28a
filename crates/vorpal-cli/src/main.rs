//! Vorpal CLI - Command-line front end for the procedural math core
//!
//! Renders noise fields to PNG and summarizes samples drawn from the
//! distribution library.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use vorpal_cli::commands;
use vorpal_cli::commands::sample::DistKind;
use vorpal_cli::config::{NoiseKind, RenderConfig, RenderOverrides};

/// Vorpal - Noise, vectors and randomness for generative sketches
#[derive(Parser)]
#[command(name = "vorpal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Reseed the global generator for reproducible sampling
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a noise field to a grayscale PNG
    Render {
        /// JSON render config; flags override its fields
        #[arg(short, long)]
        config: Option<String>,

        /// Output PNG path
        #[arg(short, long, default_value = "noise.png")]
        out: String,

        /// Noise family
        #[arg(long, value_enum)]
        noise: Option<NoiseKind>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Lattice units per pixel
        #[arg(long)]
        scale: Option<f64>,

        /// Third coordinate (renders a 3D slice)
        #[arg(long, allow_negative_numbers = true)]
        z: Option<f64>,

        /// Fourth coordinate (renders a 4D slice)
        #[arg(long, allow_negative_numbers = true)]
        w: Option<f64>,

        /// Fractal octaves
        #[arg(long)]
        octaves: Option<u8>,

        /// Perlin repeat period in lattice cells
        #[arg(long)]
        repeat: Option<u32>,

        /// Worley feature points per cell
        #[arg(long)]
        feature_density: Option<u32>,

        /// Worley seed
        #[arg(long, allow_negative_numbers = true)]
        worley_seed: Option<i32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Draw from a distribution and print summary statistics
    Sample {
        /// Distribution to sample
        #[arg(short, long, value_enum)]
        dist: DistKind,

        /// Comma-separated distribution parameters
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Vec<f64>,

        /// Number of samples
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_render_config(path: Option<&str>) -> anyhow::Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load render config {}", path)),
        None => Ok(RenderConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(seed) = cli.seed {
        vorpal_math::rng::reseed(seed);
    }

    let result = match cli.command {
        Commands::Render {
            config,
            out,
            noise,
            width,
            height,
            scale,
            z,
            w,
            octaves,
            repeat,
            feature_density,
            worley_seed,
            json,
        } => {
            let overrides = RenderOverrides {
                noise,
                width,
                height,
                scale,
                z,
                w,
                octaves,
                repeat,
                feature_density,
                worley_seed,
            };
            load_render_config(config.as_deref())
                .and_then(|base| overrides.apply(base).map_err(Into::into))
                .and_then(|config| commands::render::run(&config, &out, json))
        }
        Commands::Sample {
            dist,
            params,
            count,
            json,
        } => commands::sample::run(dist, &params, count, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "vorpal",
            "render",
            "--noise",
            "simplex",
            "--width",
            "64",
            "--z",
            "-1.5",
            "--out",
            "out/simplex.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                noise, width, z, out, ..
            } => {
                assert_eq!(noise, Some(NoiseKind::Simplex));
                assert_eq!(width, Some(64));
                assert_eq!(z, Some(-1.5));
                assert_eq!(out, "out/simplex.png");
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_sample() {
        let cli = Cli::try_parse_from([
            "vorpal", "sample", "--dist", "gaussian", "-p", "-2,0.5", "-n", "50", "--seed", "9",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(9));
        match cli.command {
            Commands::Sample {
                dist,
                params,
                count,
                json,
            } => {
                assert_eq!(dist, DistKind::Gaussian);
                assert_eq!(params, vec![-2.0, 0.5]);
                assert_eq!(count, 50);
                assert!(!json);
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_cli_parses_kebab_dist_names() {
        let cli =
            Cli::try_parse_from(["vorpal", "-vv", "sample", "--dist", "uniform-int", "-p", "0,6"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Sample { dist, .. } => assert_eq!(dist, DistKind::UniformInt),
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_noise() {
        assert!(Cli::try_parse_from(["vorpal", "render", "--noise", "value"]).is_err());
    }
}
