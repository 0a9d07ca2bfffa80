//! Interpolation unit.
//!
//! The pipeline treats the multiply-accumulate that refines a coarse table
//! sample as a black box: it hands over `(table_cos, table_sin, remainder)`
//! and expects `(refined_cos, refined_sin)` a fixed number of cycles later.
//! [`Interpolator`] is that contract; [`TaylorInterpolator`] is the stock
//! first-order implementation.
//!
//! # First-Order Correction
//!
//! With `δ` the angle covered by the remainder:
//!
//! ```text
//! sin(θ + δ) ≈ sin θ + δ · cos θ
//! cos(θ + δ) ≈ cos θ − δ · sin θ
//! ```
//!
//! One remainder LSB is one phase LSB, `2π / 2^phase_width` radians, so
//! `δ · x = r · x · π / 2^(phase_width - 1)`. π is held as a Q30 constant
//! and products are formed in `i128`, then truncated.

use crate::device::fixed;
use crate::device::{GeneratorParams, SinCos, TableEntry};

/// Fractional bits of [`PI_Q30`].
pub const PI_FRAC_BITS: u32 = 30;

/// `round(π · 2^30)`.
pub const PI_Q30: i128 = 3_373_259_426;

/// Multiply-accumulate unit that refines a coarse table sample.
pub trait Interpolator: Send + std::fmt::Debug {
    /// Register stages between operands going in and the refined pair
    /// coming out.
    fn latency(&self) -> u8;

    /// Refined pair for one set of operands.
    ///
    /// The pipeline calls this when operands enter the unit and delays the
    /// result by [`Interpolator::latency`] stages itself.
    fn refine(&self, sample: TableEntry, remainder: u64) -> SinCos;

    /// Get a static string name for this interpolator.
    fn name(&self) -> &'static str;
}

/// First-order Taylor interpolator.
///
/// Results are saturated to `±(2^(data_width-1) - 1)`: the linear term
/// overshoots full scale next to the quadrant edge.
#[derive(Debug, Clone, Copy)]
pub struct TaylorInterpolator {
    data_width: u32,
    /// Right shift that turns `r · x · PI_Q30` into LSBs.
    shift: u32,
    latency: u8,
}

impl TaylorInterpolator {
    /// Create an interpolator for `params` taking `latency` stages.
    pub fn new(params: &GeneratorParams, latency: u8) -> Self {
        Self {
            data_width: params.data_width(),
            shift: PI_FRAC_BITS + params.phase_width() - 1,
            latency,
        }
    }

    /// Correction term `δ · x` for remainder `r`, in LSBs (floored).
    #[inline]
    fn correction(&self, remainder: u64, x: i64) -> i128 {
        (remainder as i128 * x as i128 * PI_Q30) >> self.shift
    }
}

impl Interpolator for TaylorInterpolator {
    fn latency(&self) -> u8 {
        self.latency
    }

    fn refine(&self, sample: TableEntry, remainder: u64) -> SinCos {
        let sin = sample.sin as i128 + self.correction(remainder, sample.cos);
        let cos = sample.cos as i128 - self.correction(remainder, sample.sin);
        SinCos {
            sin: fixed::saturate(sin, self.data_width),
            cos: fixed::saturate(cos, self.data_width),
        }
    }

    fn name(&self) -> &'static str {
        "taylor"
    }
}
