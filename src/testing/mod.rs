//! Verification harness for the generator.
//!
//! This module provides:
//! - A register-free golden model, bit-exact with the pipeline
//! - An ideal floating-point reference
//! - Full-period accuracy sweeps
//!
//! # Usage
//!
//! ```bash
//! sincos-nco --report --data-width 24 --phase-width 20 --table-width 10
//! ```

pub mod golden;
pub mod sweep;

pub use sweep::{ErrorReport, MAX_EXHAUSTIVE_PHASE_WIDTH};
