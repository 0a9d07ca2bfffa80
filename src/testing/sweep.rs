//! Full-period accuracy sweep.
//!
//! Runs the pipelined generator over one complete accumulator period and
//! compares every valid sample with the ideal scaled sine and cosine.

use std::fmt;

use super::golden;
use crate::device::GeneratorParams;
use crate::emu::Generator;

/// Accumulator widths above this are sampled, not swept exhaustively.
pub const MAX_EXHAUSTIVE_PHASE_WIDTH: u32 = 20;

/// Accuracy statistics for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorReport {
    /// Samples compared.
    pub samples: u64,
    /// Largest component error, in LSBs.
    pub max_abs_error: f64,
    /// RMS component error, in LSBs.
    pub rms_error: f64,
    /// Largest `|sqrt(sin² + cos²) - A|`, in LSBs.
    pub max_radius_error: f64,
    /// `max_radius_error / A`.
    pub max_relative_radius_error: f64,
    /// Phase at which `max_abs_error` occurred.
    pub worst_phase: u64,
}

impl ErrorReport {
    /// Sweep one period of `params`.
    ///
    /// Accumulators wider than [`MAX_EXHAUSTIVE_PHASE_WIDTH`] are sampled
    /// every `2^(phase_width - MAX_EXHAUSTIVE_PHASE_WIDTH)` phases through
    /// [`golden::evaluate`], which is bit-exact with the pipeline.
    pub fn sweep(params: GeneratorParams) -> Self {
        let mut generator = Generator::new(params);
        let period = 1u64 << params.phase_width();
        let stride = 1u64 << params.phase_width().saturating_sub(MAX_EXHAUSTIVE_PHASE_WIDTH);
        let amplitude = params.amplitude() as f64;

        let mut acc = Accumulator::default();
        if stride == 1 {
            for (phase, out) in generator.samples().take(period as usize) {
                acc.add(phase, out.sin, out.cos, &params, amplitude);
            }
        } else {
            log::debug!("Sampling every {} phases", stride);
            let table = generator.table();
            for phase in (0..period).step_by(stride as usize) {
                let out = golden::evaluate(&params, &table, phase);
                acc.add(phase, out.sin, out.cos, &params, amplitude);
            }
        }

        let report = acc.finish(amplitude);
        log::info!("Sweep {}: {}", params, report);
        report
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, max err {:.3} LSB @ phase {}, rms {:.3} LSB, max radius err {:.3} LSB ({:.3e})",
            self.samples,
            self.max_abs_error,
            self.worst_phase,
            self.rms_error,
            self.max_radius_error,
            self.max_relative_radius_error
        )
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    samples: u64,
    max_abs: f64,
    worst_phase: u64,
    sum_sq: f64,
    max_radius: f64,
}

impl Accumulator {
    fn add(&mut self, phase: u64, sin: i64, cos: i64, params: &GeneratorParams, amplitude: f64) {
        let (ideal_sin, ideal_cos) = golden::ideal(params, phase);
        let es = sin as f64 - ideal_sin;
        let ec = cos as f64 - ideal_cos;

        let worst = es.abs().max(ec.abs());
        if worst > self.max_abs {
            self.max_abs = worst;
            self.worst_phase = phase;
        }
        self.sum_sq += es * es + ec * ec;

        let radius = ((sin as f64).powi(2) + (cos as f64).powi(2)).sqrt();
        self.max_radius = self.max_radius.max((radius - amplitude).abs());
        self.samples += 1;
    }

    fn finish(self, amplitude: f64) -> ErrorReport {
        let rms = if self.samples == 0 {
            0.0
        } else {
            (self.sum_sq / (2 * self.samples) as f64).sqrt()
        };
        ErrorReport {
            samples: self.samples,
            max_abs_error: self.max_abs,
            rms_error: rms,
            max_radius_error: self.max_radius,
            max_relative_radius_error: self.max_radius / amplitude,
            worst_phase: self.worst_phase,
        }
    }
}
