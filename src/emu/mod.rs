//! Cycle-accurate generator model.
//!
//! This module clocks the datapath described in [`crate::device`]:
//! - Phase accumulation with synchronous reset and enable
//! - Table lookup and optional first-order interpolation
//! - Quadrant reconstruction with the quadrant bits delayed to match
//!
//! # Clocking
//!
//! Every call to [`Generator::tick`] is one rising edge. All registers
//! update together from their pre-edge inputs, so a phase latched on
//! edge `e` reaches the output on edge `e + L` where `L` is the
//! [`PipelineLatency`](crate::timing::PipelineLatency) total.
//!
//! # Example
//!
//! ```
//! use sincos_nco::device::{GeneratorParams, Variant};
//! use sincos_nco::emu::Generator;
//!
//! let params = GeneratorParams::new(16, 16, 10, Variant::Generic).unwrap();
//! let mut gen = Generator::new(params);
//!
//! let (phase, first) = gen.samples().next().unwrap();
//! assert_eq!(phase, 0);
//! assert_eq!((first.sin, first.cos), (0, 32767));
//! ```

pub mod phase;
pub mod interpolator;
pub mod generator;

pub use phase::PhaseAccumulator;
pub use interpolator::{Interpolator, TaylorInterpolator, PI_FRAC_BITS, PI_Q30};
pub use generator::{Generator, Samples};
