// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conway-Hart CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use conway_hart::{analyze, build, EngineConfig, Mesh, PlatonicSolid};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conway-hart")]
#[command(about = "Conway-Hart polyhedron operators and canonicalization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a polyhedron and write it as JSON
    Build {
        /// Seed solid (tetra, cube, octa, dodeca, icosa)
        solid: PlatonicSolid,

        /// Conway notation, applied right to left (e.g. "dk")
        #[arg(long, default_value = "")]
        ops: String,

        /// Canonicalize the result
        #[arg(short, long)]
        canonicalize: bool,

        /// Maximum canonicalization passes
        #[arg(long)]
        iterations: Option<usize>,

        /// Canonicalization step size
        #[arg(long)]
        scale: Option<f64>,

        /// Configuration file (defaults to conway.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print mesh statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Print statistics for a polyhedron
    Stats {
        /// Seed solid (tetra, cube, octa, dodeca, icosa)
        solid: PlatonicSolid,

        /// Conway notation, applied right to left
        #[arg(long, default_value = "")]
        ops: String,

        /// Canonicalize before measuring
        #[arg(short, long)]
        canonicalize: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            solid,
            ops,
            canonicalize,
            iterations,
            scale,
            config,
            output,
            stats,
        } => {
            let mut engine = match config {
                Some(path) => EngineConfig::from_file(path)?,
                None => EngineConfig::load()?,
            };
            if let Some(iterations) = iterations {
                engine.canonicalize.iterations = iterations;
            }
            if let Some(scale) = scale {
                engine.canonicalize.scale_factor = scale;
            }
            build_command(solid, &ops, &engine, canonicalize, output, stats)?;
        }
        Commands::Stats {
            solid,
            ops,
            canonicalize,
        } => {
            let engine = EngineConfig::load()?;
            let mesh = build(solid, &ops, &engine, canonicalize)
                .with_context(|| format!("Failed to build {}{}", ops, solid))?;
            analyze(&mesh)?.print();
        }
        Commands::Version => {
            println!("conway-hart v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_command(
    solid: PlatonicSolid,
    ops: &str,
    engine: &EngineConfig,
    canonical: bool,
    output: Option<PathBuf>,
    stats: bool,
) -> Result<()> {
    let start = std::time::Instant::now();
    let mesh: Mesh = build(solid, ops, engine, canonical)
        .with_context(|| format!("Failed to build {}{}", ops, solid))?;
    info!(
        "Built {}{} in {:.2?}: {} vertices, {} edges, {} faces",
        ops,
        solid,
        start.elapsed(),
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );

    if stats {
        eprint!("{}", analyze(&mesh)?);
    }

    let json = serde_json::to_string_pretty(&mesh).context("Failed to serialize mesh")?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
