//! sincos-nco library
//!
//! Cycle-accurate model of a pipelined fixed-point sine/cosine generator:
//! a phase accumulator drives a quarter-wave table, optional first-order
//! interpolation and quadrant reconstruction, with every stage registered.

pub mod config;
pub mod device;
pub mod timing;
pub mod emu;
pub mod testing;

pub use device::{GeneratorParams, SinCos, Variant};
pub use emu::Generator;
