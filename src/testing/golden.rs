//! Reference models for checking the pipelined generator.
//!
//! - [`evaluate`]: the same datapath with every register removed. It uses
//!   the same mapper, interpolator and reconstruction, so any difference
//!   from the pipelined [`Generator`](crate::emu::Generator) is a timing
//!   fault, not an arithmetic one.
//! - [`ideal`]: floating-point `A·sin θ`, `A·cos θ` for accuracy checks.

use std::f64::consts::TAU;

use crate::device::{mapper_for, GeneratorParams, SinCos, SinCosTable};
use crate::emu::{Interpolator, TaylorInterpolator};
use crate::timing::PipelineLatency;

/// Bit-exact output for one phase, without pipeline delay.
pub fn evaluate(params: &GeneratorParams, table: &SinCosTable, phase: u64) -> SinCos {
    let mapped = mapper_for(params).map(phase);
    let entry = table.get(mapped.address);

    let refined = if params.strategy().interpolates() {
        let stages = PipelineLatency::for_params(params).interpolation_stages();
        TaylorInterpolator::new(params, stages).refine(entry, mapped.remainder)
    } else {
        SinCos::from(entry)
    };

    mapped.quadrant.reconstruct(refined, params.data_width())
}

/// Ideal `(sin, cos)` scaled to full-scale amplitude.
pub fn ideal(params: &GeneratorParams, phase: u64) -> (f64, f64) {
    let theta = TAU * phase as f64 / (1u64 << params.phase_width()) as f64;
    let amplitude = params.amplitude() as f64;
    let (sin, cos) = theta.sin_cos();
    (amplitude * sin, amplitude * cos)
}
