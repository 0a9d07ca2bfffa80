//! Phase to table-address mapping.
//!
//! Three mappers cover the three width relations. Which one a generator
//! uses is decided once, in [`mapper_for`], and the rest of the pipeline
//! only sees the [`AddressMapper`] trait.
//!
//! ```text
//!  phase (P bits)
//!  ┌────┬──────────────────────┬──────────────┐
//!  │ Q  │ table address (A)    │ remainder    │   d > 2
//!  └────┴──────────────────────┴──────────────┘
//!   2 b                          d - 2 bits
//! ```

use super::fixed;
use super::params::{AddressStrategy, GeneratorParams};
use super::quadrant::Quadrant;

/// One phase split into its datapath fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappedPhase {
    /// Quarter turn selector.
    pub quadrant: Quadrant,
    /// Table address (coarse index).
    pub address: usize,
    /// Fractional remainder, 0 when the mapper produces none.
    pub remainder: u64,
}

/// Splits a phase into quadrant, table address and remainder.
pub trait AddressMapper: Send + Sync + std::fmt::Debug {
    /// Map one phase value. Bits above the phase width are ignored.
    fn map(&self, phase: u64) -> MappedPhase;

    /// Width of the remainder this mapper produces.
    fn remainder_width(&self) -> u32 {
        0
    }

    /// Get a static string name for this mapper.
    fn name(&self) -> &'static str;
}

/// `d < 2`: the in-quadrant phase is shorter than the address, so it is
/// left-aligned and the low address bits are zero.
#[derive(Debug, Clone, Copy)]
pub struct PaddedMapper {
    phase_width: u32,
    pad_bits: u32,
}

impl PaddedMapper {
    /// Create a mapper for the given widths.
    pub fn new(phase_width: u32, address_width: u32) -> Self {
        Self {
            phase_width,
            pad_bits: address_width + 2 - phase_width,
        }
    }
}

impl AddressMapper for PaddedMapper {
    fn map(&self, phase: u64) -> MappedPhase {
        let in_quadrant = phase & fixed::mask(self.phase_width - 2);
        MappedPhase {
            quadrant: Quadrant::from_phase(phase & fixed::mask(self.phase_width), self.phase_width),
            address: (in_quadrant << self.pad_bits) as usize,
            remainder: 0,
        }
    }

    fn name(&self) -> &'static str {
        "padded"
    }
}

/// `d == 2`: every in-quadrant phase bit is an address bit.
#[derive(Debug, Clone, Copy)]
pub struct DirectMapper {
    phase_width: u32,
    address_width: u32,
}

impl DirectMapper {
    /// Create a mapper for the given widths.
    pub fn new(phase_width: u32, address_width: u32) -> Self {
        Self {
            phase_width,
            address_width,
        }
    }
}

impl AddressMapper for DirectMapper {
    fn map(&self, phase: u64) -> MappedPhase {
        MappedPhase {
            quadrant: Quadrant::from_phase(phase & fixed::mask(self.phase_width), self.phase_width),
            address: (phase & fixed::mask(self.address_width)) as usize,
            remainder: 0,
        }
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// `d > 2`: the middle bits address the table, the low `d - 2` bits are
/// handed to the interpolator.
#[derive(Debug, Clone, Copy)]
pub struct SplitMapper {
    phase_width: u32,
    address_width: u32,
    remainder_width: u32,
}

impl SplitMapper {
    /// Create a mapper for the given widths.
    pub fn new(phase_width: u32, address_width: u32) -> Self {
        Self {
            phase_width,
            address_width,
            remainder_width: phase_width - address_width - 2,
        }
    }
}

impl AddressMapper for SplitMapper {
    fn map(&self, phase: u64) -> MappedPhase {
        MappedPhase {
            quadrant: Quadrant::from_phase(phase & fixed::mask(self.phase_width), self.phase_width),
            address: ((phase >> self.remainder_width) & fixed::mask(self.address_width)) as usize,
            remainder: phase & fixed::mask(self.remainder_width),
        }
    }

    fn remainder_width(&self) -> u32 {
        self.remainder_width
    }

    fn name(&self) -> &'static str {
        "split"
    }
}

/// Pick the mapper for a configuration.
pub fn mapper_for(params: &GeneratorParams) -> Box<dyn AddressMapper> {
    let (p, a) = (params.phase_width(), params.table_address_width());
    match params.strategy() {
        AddressStrategy::Padded => Box::new(PaddedMapper::new(p, a)),
        AddressStrategy::Direct => Box::new(DirectMapper::new(p, a)),
        AddressStrategy::Interpolated { .. } => Box::new(SplitMapper::new(p, a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::params::Variant;

    fn params(p: u32, a: u32) -> GeneratorParams {
        GeneratorParams::new(16, p, a, Variant::Generic).unwrap()
    }

    #[test]
    fn test_mapper_selection() {
        assert_eq!(mapper_for(&params(10, 9)).name(), "padded");
        assert_eq!(mapper_for(&params(11, 9)).name(), "direct");
        assert_eq!(mapper_for(&params(14, 9)).name(), "split");
        assert_eq!(mapper_for(&params(14, 9)).remainder_width(), 3);
    }

    #[test]
    fn test_padded_left_aligns() {
        // P = 10, A = 9: 8 in-quadrant bits, one zero pad bit.
        let m = PaddedMapper::new(10, 9);
        let mapped = m.map(0b01_1010_0101);
        assert_eq!(mapped.quadrant, Quadrant::Second);
        assert_eq!(mapped.address, 0b1_0100_1010);
        assert_eq!(mapped.remainder, 0);
    }

    #[test]
    fn test_padded_minimal_phase() {
        // P = 2 leaves no in-quadrant bits at all.
        let m = PaddedMapper::new(2, 1);
        assert_eq!(m.map(0b11).address, 0);
        assert_eq!(m.map(0b11).quadrant, Quadrant::Fourth);
    }

    #[test]
    fn test_direct_one_to_one() {
        let m = DirectMapper::new(11, 9);
        for phase in [0u64, 1, 0x1FF, 0x200, 0x7FF] {
            let mapped = m.map(phase);
            assert_eq!(mapped.address, (phase & 0x1FF) as usize);
            assert_eq!(mapped.quadrant.bits() as u64, phase >> 9);
            assert_eq!(mapped.remainder, 0);
        }
    }

    #[test]
    fn test_split_fields() {
        // P = 14, A = 9, remainder = 3 bits.
        let m = SplitMapper::new(14, 9);
        let phase = (0b11 << 12) | (0x1AB << 3) | 0b101;
        let mapped = m.map(phase);
        assert_eq!(mapped.quadrant, Quadrant::Fourth);
        assert_eq!(mapped.address, 0x1AB);
        assert_eq!(mapped.remainder, 0b101);
    }

    #[test]
    fn test_high_bits_ignored() {
        let m = SplitMapper::new(14, 9);
        assert_eq!(m.map(0x5 | (1 << 20)), m.map(0x5));
    }
}
