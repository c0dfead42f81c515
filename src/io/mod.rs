//! File input/output.
//!
//! - `export`: the combined moduli CSV consumed by surrogate training
//! - `spectrum`: per-Z spectrum JSON for inspection and plotting
//! - `z_input`: legacy two-line override file for the Z list

pub mod export;
pub mod spectrum;
pub mod z_input;
