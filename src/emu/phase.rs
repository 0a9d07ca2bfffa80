//! Phase accumulator.
//!
//! A `phase_width`-bit counter that advances by one on every enabled
//! clock and wraps silently. Reset is synchronous and wins over enable.

use crate::device::fixed;
use crate::device::Quadrant;

/// Wrapping phase counter.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    /// Current phase, always below `2^width`.
    phase: u64,
    /// Accumulator width in bits.
    width: u32,
}

impl PhaseAccumulator {
    /// Create an accumulator at phase 0.
    pub fn new(width: u32) -> Self {
        Self { phase: 0, width }
    }

    /// Current phase.
    #[inline]
    pub fn value(&self) -> u64 {
        self.phase
    }

    /// Accumulator width in bits.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of distinct phases, `2^width`.
    #[inline]
    pub fn period(&self) -> u64 {
        fixed::mask(self.width) + 1
    }

    /// Quadrant of the current phase.
    #[inline]
    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_phase(self.phase, self.width)
    }

    /// Clock edge.
    ///
    /// Returns the phase after the edge.
    #[inline]
    pub fn tick(&mut self, reset: bool, enable: bool) -> u64 {
        if reset {
            self.phase = 0;
        } else if enable {
            self.phase = self.phase.wrapping_add(1) & fixed::mask(self.width);
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_when_enabled() {
        let mut acc = PhaseAccumulator::new(8);
        assert_eq!(acc.tick(false, true), 1);
        assert_eq!(acc.tick(false, true), 2);
        assert_eq!(acc.value(), 2);
    }

    #[test]
    fn test_holds_when_disabled() {
        let mut acc = PhaseAccumulator::new(8);
        acc.tick(false, true);
        assert_eq!(acc.tick(false, false), 1);
        assert_eq!(acc.tick(false, false), 1);
    }

    #[test]
    fn test_wraps_silently() {
        let mut acc = PhaseAccumulator::new(4);
        for _ in 0..15 {
            acc.tick(false, true);
        }
        assert_eq!(acc.value(), 15);
        assert_eq!(acc.tick(false, true), 0);
        assert_eq!(acc.period(), 16);
    }

    #[test]
    fn test_reset_overrides_enable() {
        let mut acc = PhaseAccumulator::new(8);
        for _ in 0..10 {
            acc.tick(false, true);
        }
        assert_eq!(acc.tick(true, true), 0);
        assert_eq!(acc.tick(true, false), 0);
    }

    #[test]
    fn test_quadrant_tracks_top_bits() {
        let mut acc = PhaseAccumulator::new(4);
        for _ in 0..4 {
            acc.tick(false, true);
        }
        assert_eq!(acc.quadrant(), Quadrant::Second);
    }

    #[test]
    fn test_wide_accumulator() {
        let mut acc = PhaseAccumulator::new(48);
        assert_eq!(acc.period(), 1u64 << 48);
        acc.tick(false, true);
        assert_eq!(acc.value(), 1);
    }
}
