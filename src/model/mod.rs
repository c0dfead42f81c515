//! Time-domain viscoelasticity model for entangled linear melts.

pub mod tube;

pub use tube::*;
