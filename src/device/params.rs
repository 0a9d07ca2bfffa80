//! Generator parameters and their validation.
//!
//! In hardware these are elaboration-time generics. Here they are fixed
//! when a [`GeneratorParams`] is constructed and never change afterwards.
//!
//! # Address strategies
//!
//! The relation `d = phase_width - table_address_width` selects how phase
//! bits become a table address:
//!
//! | d     | Strategy       | Remainder bits |
//! |-------|----------------|----------------|
//! | 1     | `Padded`       | 0              |
//! | 2     | `Direct`       | 0              |
//! | > 2   | `Interpolated` | d - 2          |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Narrowest supported output word.
pub const MIN_DATA_WIDTH: u32 = 2;

/// Widest supported output word. Products stay inside `i128`.
pub const MAX_DATA_WIDTH: u32 = 48;

/// Narrowest supported accumulator (just the quadrant bits).
pub const MIN_PHASE_WIDTH: u32 = 2;

/// Widest supported accumulator.
pub const MAX_PHASE_WIDTH: u32 = 48;

/// Smallest table: two entries per quadrant.
pub const MIN_TABLE_ADDRESS_WIDTH: u32 = 1;

/// Largest table: 1M entries per quadrant.
pub const MAX_TABLE_ADDRESS_WIDTH: u32 = 20;

/// Errors raised while building a generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The table would consume every phase bit (or more).
    #[error("table address width {table_address_width} must be less than phase width {phase_width}")]
    TableTooDeep {
        /// Requested table address width.
        table_address_width: u32,
        /// Requested phase width.
        phase_width: u32,
    },

    /// Output word width outside the supported range.
    #[error("data width {width} outside supported range {min}..={max}")]
    DataWidth {
        /// Requested width.
        width: u32,
        /// Smallest allowed.
        min: u32,
        /// Largest allowed.
        max: u32,
    },

    /// Accumulator width outside the supported range.
    #[error("phase width {width} outside supported range {min}..={max}")]
    PhaseWidth {
        /// Requested width.
        width: u32,
        /// Smallest allowed.
        min: u32,
        /// Largest allowed.
        max: u32,
    },

    /// Table address width outside the supported range.
    #[error("table address width {width} outside supported range {min}..={max}")]
    TableAddressWidth {
        /// Requested width.
        width: u32,
        /// Smallest allowed.
        min: u32,
        /// Largest allowed.
        max: u32,
    },

    /// A custom interpolator does not take the number of cycles the
    /// quadrant delay chain was sized for.
    #[error("interpolator latency {actual} does not match pipeline stage count {expected}")]
    LatencyMismatch {
        /// Stages the pipeline reserves for interpolation.
        expected: u8,
        /// Stages the interpolator reports.
        actual: u8,
    },

    /// A custom interpolator was supplied for a configuration with no
    /// fractional remainder.
    #[error("configuration has no fractional remainder; interpolation is not used")]
    InterpolationUnused,

    /// Unknown variant name.
    #[error("unknown variant '{0}' (expected 'generic' or 'dsp-slice')")]
    UnknownVariant(String),
}

/// Target-specific implementation tag.
///
/// Only affects memory style bookkeeping. The numbers a generator produces
/// are identical for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Portable fabric logic.
    #[default]
    Generic,
    /// Multiplier/accumulator mapped onto DSP slices, table in block RAM.
    DspSlice,
}

/// Memory primitive that would hold the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStyle {
    /// LUT-based distributed memory.
    Distributed,
    /// Dedicated block RAM.
    Block,
}

impl Variant {
    /// Get a static string name for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Generic => "generic",
            Variant::DspSlice => "dsp-slice",
        }
    }

    /// Memory style for a table of `2^table_address_width` entries.
    pub fn memory_style(&self, table_address_width: u32) -> MemoryStyle {
        match self {
            // Shallow tables fit in LUTs; deeper ones go to block RAM.
            Variant::Generic if table_address_width <= 6 => MemoryStyle::Distributed,
            Variant::Generic => MemoryStyle::Block,
            Variant::DspSlice => MemoryStyle::Block,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Variant::Generic),
            "dsp-slice" | "dsp_slice" | "dsp" => Ok(Variant::DspSlice),
            other => Err(ParamError::UnknownVariant(other.to_string())),
        }
    }
}

/// How phase bits are turned into a table address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressStrategy {
    /// Table deeper than the in-quadrant phase: left-align, zero-pad.
    Padded,
    /// One table entry per in-quadrant phase value.
    Direct,
    /// Coarse address plus `remainder_width` fractional bits.
    Interpolated {
        /// Width of the fractional remainder.
        remainder_width: u32,
    },
}

impl AddressStrategy {
    /// Whether a fractional remainder is produced.
    pub fn interpolates(&self) -> bool {
        matches!(self, AddressStrategy::Interpolated { .. })
    }
}

/// Validated generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeneratorParams {
    data_width: u32,
    phase_width: u32,
    table_address_width: u32,
    variant: Variant,
}

impl GeneratorParams {
    /// Validate and build a configuration.
    pub fn new(
        data_width: u32,
        phase_width: u32,
        table_address_width: u32,
        variant: Variant,
    ) -> Result<Self, ParamError> {
        if !(MIN_DATA_WIDTH..=MAX_DATA_WIDTH).contains(&data_width) {
            return Err(ParamError::DataWidth {
                width: data_width,
                min: MIN_DATA_WIDTH,
                max: MAX_DATA_WIDTH,
            });
        }
        if !(MIN_PHASE_WIDTH..=MAX_PHASE_WIDTH).contains(&phase_width) {
            return Err(ParamError::PhaseWidth {
                width: phase_width,
                min: MIN_PHASE_WIDTH,
                max: MAX_PHASE_WIDTH,
            });
        }
        if !(MIN_TABLE_ADDRESS_WIDTH..=MAX_TABLE_ADDRESS_WIDTH).contains(&table_address_width) {
            return Err(ParamError::TableAddressWidth {
                width: table_address_width,
                min: MIN_TABLE_ADDRESS_WIDTH,
                max: MAX_TABLE_ADDRESS_WIDTH,
            });
        }
        if table_address_width >= phase_width {
            return Err(ParamError::TableTooDeep {
                table_address_width,
                phase_width,
            });
        }

        Ok(Self {
            data_width,
            phase_width,
            table_address_width,
            variant,
        })
    }

    /// Output word width in bits.
    #[inline]
    pub fn data_width(&self) -> u32 {
        self.data_width
    }

    /// Accumulator width in bits.
    #[inline]
    pub fn phase_width(&self) -> u32 {
        self.phase_width
    }

    /// log2 of the number of table entries.
    #[inline]
    pub fn table_address_width(&self) -> u32 {
        self.table_address_width
    }

    /// Target variant.
    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of table entries.
    #[inline]
    pub fn table_depth(&self) -> usize {
        1usize << self.table_address_width
    }

    /// Full-scale amplitude, `2^(data_width-1) - 1`.
    #[inline]
    pub fn amplitude(&self) -> i64 {
        (1i64 << (self.data_width - 1)) - 1
    }

    /// Phase bits not consumed by the table address (`d`, always >= 1).
    #[inline]
    pub fn spare_phase_bits(&self) -> u32 {
        self.phase_width - self.table_address_width
    }

    /// Address strategy implied by the widths.
    pub fn strategy(&self) -> AddressStrategy {
        match self.spare_phase_bits() {
            0 | 1 => AddressStrategy::Padded,
            2 => AddressStrategy::Direct,
            d => AddressStrategy::Interpolated {
                remainder_width: d - 2,
            },
        }
    }

    /// Width of the fractional remainder (0 when not interpolating).
    pub fn remainder_width(&self) -> u32 {
        match self.strategy() {
            AddressStrategy::Interpolated { remainder_width } => remainder_width,
            _ => 0,
        }
    }

    /// Memory style the variant would pick for this table.
    pub fn memory_style(&self) -> MemoryStyle {
        self.variant.memory_style(self.table_address_width)
    }
}

impl fmt::Display for GeneratorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data={}b phase={}b table={}b ({})",
            self.data_width, self.phase_width, self.table_address_width, self.variant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let p = GeneratorParams::new(16, 14, 9, Variant::Generic).unwrap();
        assert_eq!(p.data_width(), 16);
        assert_eq!(p.table_depth(), 512);
        assert_eq!(p.amplitude(), 32767);
        assert_eq!(p.spare_phase_bits(), 5);
    }

    #[test]
    fn test_table_must_be_narrower_than_phase() {
        let err = GeneratorParams::new(16, 10, 10, Variant::Generic).unwrap_err();
        assert_eq!(
            err,
            ParamError::TableTooDeep {
                table_address_width: 10,
                phase_width: 10
            }
        );

        assert!(matches!(
            GeneratorParams::new(16, 8, 12, Variant::Generic),
            Err(ParamError::TableTooDeep { .. })
        ));
    }

    #[test]
    fn test_rejection_is_deterministic() {
        let a = GeneratorParams::new(16, 9, 9, Variant::DspSlice);
        let b = GeneratorParams::new(16, 9, 9, Variant::DspSlice);
        assert_eq!(a, b);
        assert!(a.is_err());
    }

    #[test]
    fn test_width_ranges() {
        assert!(matches!(
            GeneratorParams::new(1, 14, 9, Variant::Generic),
            Err(ParamError::DataWidth { width: 1, .. })
        ));
        assert!(matches!(
            GeneratorParams::new(49, 14, 9, Variant::Generic),
            Err(ParamError::DataWidth { width: 49, .. })
        ));
        assert!(matches!(
            GeneratorParams::new(16, 64, 9, Variant::Generic),
            Err(ParamError::PhaseWidth { width: 64, .. })
        ));
        assert!(matches!(
            GeneratorParams::new(16, 30, 21, Variant::Generic),
            Err(ParamError::TableAddressWidth { width: 21, .. })
        ));
        assert!(matches!(
            GeneratorParams::new(16, 14, 0, Variant::Generic),
            Err(ParamError::TableAddressWidth { width: 0, .. })
        ));
    }

    #[test]
    fn test_strategy_selection() {
        let padded = GeneratorParams::new(16, 10, 9, Variant::Generic).unwrap();
        assert_eq!(padded.strategy(), AddressStrategy::Padded);
        assert_eq!(padded.remainder_width(), 0);

        let direct = GeneratorParams::new(16, 11, 9, Variant::Generic).unwrap();
        assert_eq!(direct.strategy(), AddressStrategy::Direct);
        assert_eq!(direct.remainder_width(), 0);

        let interp = GeneratorParams::new(16, 14, 9, Variant::Generic).unwrap();
        assert_eq!(
            interp.strategy(),
            AddressStrategy::Interpolated { remainder_width: 3 }
        );
        assert!(interp.strategy().interpolates());
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("generic".parse::<Variant>().unwrap(), Variant::Generic);
        assert_eq!("DSP-Slice".parse::<Variant>().unwrap(), Variant::DspSlice);
        assert!(matches!(
            "asic".parse::<Variant>(),
            Err(ParamError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_memory_style() {
        assert_eq!(Variant::Generic.memory_style(6), MemoryStyle::Distributed);
        assert_eq!(Variant::Generic.memory_style(9), MemoryStyle::Block);
        assert_eq!(Variant::DspSlice.memory_style(4), MemoryStyle::Block);
    }
}
