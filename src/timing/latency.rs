//! Pipeline latency for the sine/cosine datapath.
//!
//! Every register stage between the phase accumulator and the output
//! registers is counted here, once. Both the data path and the quadrant
//! delay chain are sized from the same [`PipelineLatency`], so they cannot
//! drift apart.
//!
//! # Stage Budget
//!
//! | Stage                 | Cycles | Notes |
//! |-----------------------|--------|-------|
//! | Address register      | 1      | phase → (address, remainder, quadrant) |
//! | Table read            | 1      | registered ROM output |
//! | Interpolation MAC     | 0/2/5  | none, `data_width < 19`, `data_width >= 19` |
//! | Output register       | 1      | after quadrant reconstruction |
//!
//! Totals: 3 without interpolation, 5 or 8 with it.

use crate::device::GeneratorParams;

/// Phase to address register: 1 cycle.
pub const LATENCY_ADDRESS: u8 = 1;

/// Registered table read: 1 cycle.
pub const LATENCY_TABLE_READ: u8 = 1;

/// Output register after reconstruction: 1 cycle.
pub const LATENCY_OUTPUT: u8 = 1;

/// Multiply-accumulate stages when operands fit one 18-bit multiplier.
pub const LATENCY_MAC_NARROW: u8 = 2;

/// Multiply-accumulate stages when the multiply has to be split.
pub const LATENCY_MAC_WIDE: u8 = 5;

/// Widest data word served by the narrow multiplier.
pub const NARROW_MAC_MAX_WIDTH: u32 = 18;

/// Register stage counts for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLatency {
    /// Stages spent in the interpolation unit (0 when bypassed).
    interpolation: u8,
}

impl PipelineLatency {
    /// Latency for a configuration.
    pub fn for_params(params: &GeneratorParams) -> Self {
        let interpolation = if !params.strategy().interpolates() {
            0
        } else if params.data_width() <= NARROW_MAC_MAX_WIDTH {
            LATENCY_MAC_NARROW
        } else {
            LATENCY_MAC_WIDE
        };
        Self { interpolation }
    }

    /// Stages inside the interpolation unit.
    #[inline]
    pub fn interpolation_stages(&self) -> u8 {
        self.interpolation
    }

    /// Stages from the phase register up to (not including) the output
    /// register. This is the depth of the quadrant delay chain.
    #[inline]
    pub fn quadrant_delay(&self) -> u8 {
        LATENCY_ADDRESS + LATENCY_TABLE_READ + self.interpolation
    }

    /// Cycles from a phase being latched to its (sin, cos) appearing at
    /// the outputs.
    #[inline]
    pub fn total(&self) -> u8 {
        self.quadrant_delay() + LATENCY_OUTPUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Variant;

    fn latency(data: u32, phase: u32, table: u32) -> PipelineLatency {
        let params = GeneratorParams::new(data, phase, table, Variant::Generic).unwrap();
        PipelineLatency::for_params(&params)
    }

    #[test]
    fn test_no_interpolation() {
        assert_eq!(latency(16, 10, 9).total(), 3);
        assert_eq!(latency(32, 11, 9).total(), 3);
        assert_eq!(latency(16, 11, 9).interpolation_stages(), 0);
    }

    #[test]
    fn test_narrow_interpolation() {
        assert_eq!(latency(16, 14, 9).total(), 5);
        assert_eq!(latency(18, 14, 9).total(), 5);
    }

    #[test]
    fn test_wide_interpolation() {
        assert_eq!(latency(19, 14, 9).total(), 8);
        assert_eq!(latency(32, 14, 9).total(), 8);
    }

    #[test]
    fn test_quadrant_delay_matches_data_path() {
        let l = latency(24, 20, 10);
        assert_eq!(
            l.quadrant_delay(),
            LATENCY_ADDRESS + LATENCY_TABLE_READ + l.interpolation_stages()
        );
        assert_eq!(l.total(), l.quadrant_delay() + LATENCY_OUTPUT);
    }

    #[test]
    fn test_variant_does_not_change_latency() {
        let a = GeneratorParams::new(24, 20, 10, Variant::Generic).unwrap();
        let b = GeneratorParams::new(24, 20, 10, Variant::DspSlice).unwrap();
        assert_eq!(PipelineLatency::for_params(&a), PipelineLatency::for_params(&b));
    }
}
