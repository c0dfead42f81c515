//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - grid specifications (`GridSpec`)
//! - per-Z stage outputs (`RelaxationCurve`, `PronySpectrum`, `FrequencyResponseCurve`)
//! - batch records (`ZBlock`, `ZFailure`, `RunConfig`)
//! - the spectrum JSON schema (`SpectrumFile`)

pub mod types;

pub use types::*;
