//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the Z list (flags or legacy override file)
//! - runs the batch pipeline
//! - prints the run summary and warnings
//! - writes the output artifacts

use clap::Parser;

use crate::cli::{Command, GenerateArgs, SpectrumArgs};
use crate::domain::{GridSpec, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `melt` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Spectrum(args) => handle_spectrum(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let output = pipeline::run_generate(&config)?;

    for f in &output.skipped {
        eprintln!("warning: skipped Z={}: {}", f.z, f.reason);
    }

    crate::io::export::write_moduli_csv(&args.out, &output.blocks)?;

    println!("{}", crate::report::format_run_summary(&output, &config));
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn handle_spectrum(args: SpectrumArgs) -> Result<(), AppError> {
    let t_hat = GridSpec::new(args.fit.t_min, args.fit.t_max, args.fit.t_points).build()?;
    let curve = crate::model::tube::evaluate(&t_hat, args.z)?;
    let fit = crate::fit::prony::fit(&curve, args.fit.n_terms, args.fit.max_iter)?;

    crate::io::spectrum::write_spectrum_json(
        &args.out,
        args.z,
        &fit,
        (args.fit.t_min, args.fit.t_max),
    )?;

    println!(
        "Z={}: {} active modes of {}, rmse {:.3e}, relative rms {:.3e}",
        args.z,
        fit.spectrum.nonzero_terms(),
        fit.spectrum.len(),
        fit.quality.rmse,
        crate::fit::prony::relative_rms_error(&curve, &fit.spectrum)
    );
    println!("Wrote {}", args.out.display());
    Ok(())
}

/// Translate `generate` flags into a pipeline configuration.
pub fn run_config_from_args(args: &GenerateArgs) -> Result<RunConfig, AppError> {
    if args.z_min < 1 {
        return Err(AppError::new(2, "z-min must be >= 1."));
    }
    if args.z_max < args.z_min {
        return Err(AppError::new(
            2,
            format!("z-max ({}) must be >= z-min ({}).", args.z_max, args.z_min),
        ));
    }

    let default_range: Vec<u32> = (args.z_min..=args.z_max).collect();
    let z_values = match &args.z_file {
        Some(path) => crate::io::z_input::load_z_list(path, &default_range, 2)?,
        None => default_range,
    };

    Ok(RunConfig {
        z_values,
        time_grid: GridSpec::new(args.fit.t_min, args.fit.t_max, args.fit.t_points),
        frequency_grid: GridSpec::new(args.omega_min, args.omega_max, args.omega_points),
        n_terms: args.fit.n_terms,
        max_iter: args.fit.max_iter,
    })
}
