//! Discrete relaxation-spectrum fitting.
//!
//! Responsibilities:
//!
//! - place log-spaced relaxation-time anchors around the sampled curve
//! - solve the nonnegative regression for the anchor weights

pub mod prony;

pub use prony::*;
