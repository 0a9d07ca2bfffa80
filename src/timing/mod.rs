//! Cycle timing infrastructure for the generator pipeline.
//!
//! - **Latency**: per-stage cycle counts and the single
//!   [`PipelineLatency`] constant derived from a configuration
//! - **Delay lines**: shift registers used for the quadrant chain and the
//!   interpolation stages
//!
//! # Usage
//!
//! ```
//! use sincos_nco::device::{GeneratorParams, Variant};
//! use sincos_nco::timing::PipelineLatency;
//!
//! let params = GeneratorParams::new(32, 14, 9, Variant::Generic).unwrap();
//! assert_eq!(PipelineLatency::for_params(&params).total(), 8);
//! ```

pub mod latency;
pub mod delay;

pub use latency::PipelineLatency;
pub use delay::DelayLine;
