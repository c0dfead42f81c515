//! Command-line parsing for the melt moduli generator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "melt", version, about = "Tube-model moduli dataset generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the batch pipeline over a Z range and write the combined CSV.
    Generate(GenerateArgs),
    /// Fit a single Z and export its relaxation spectrum as JSON.
    Spectrum(SpectrumArgs),
}

/// Time-grid and fitting options shared by both subcommands.
#[derive(Debug, Parser, Clone)]
pub struct FitFlags {
    /// Number of Prony anchor terms.
    #[arg(long, default_value_t = 200)]
    pub n_terms: usize,

    /// NNLS iteration cap per Z.
    #[arg(long, default_value_t = 10_000)]
    pub max_iter: usize,

    /// Minimum dimensionless time t/τe.
    #[arg(long, default_value_t = 1e-10)]
    pub t_min: f64,

    /// Maximum dimensionless time t/τe.
    #[arg(long, default_value_t = 1e5)]
    pub t_max: f64,

    /// Number of time grid points.
    #[arg(long, default_value_t = 1500)]
    pub t_points: usize,
}

/// Options for the batch `generate` command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Smallest entanglement number in the batch.
    #[arg(long, default_value_t = 1)]
    pub z_min: u32,

    /// Largest entanglement number in the batch (inclusive).
    #[arg(long, default_value_t = 100)]
    pub z_max: u32,

    /// Legacy override: read up to two Z values from this file instead of
    /// the z-min..z-max loop. A missing file silently falls back to the loop.
    #[arg(long, value_name = "PATH")]
    pub z_file: Option<PathBuf>,

    #[command(flatten)]
    pub fit: FitFlags,

    /// Minimum dimensionless frequency ωτe.
    #[arg(long, default_value_t = 1e-12)]
    pub omega_min: f64,

    /// Maximum dimensionless frequency ωτe.
    #[arg(long, default_value_t = 1e1)]
    pub omega_max: f64,

    /// Number of frequency grid points.
    #[arg(long, default_value_t = 1300)]
    pub omega_points: usize,

    /// Output CSV path.
    #[arg(long, default_value = "moduli.csv")]
    pub out: PathBuf,
}

/// Options for the single-Z `spectrum` command.
#[derive(Debug, Parser)]
pub struct SpectrumArgs {
    /// Entanglement number to fit.
    #[arg(long)]
    pub z: u32,

    #[command(flatten)]
    pub fit: FitFlags,

    /// Output JSON path.
    #[arg(long, default_value = "spectrum.json")]
    pub out: PathBuf,
}
