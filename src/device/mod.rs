//! Static structure of the sine/cosine generator.
//!
//! This module provides the parts of the datapath that hold no clocked
//! state:
//! - Parameter validation and the address strategy they imply
//! - The first-quadrant (cos, sin) table
//! - Phase to table-address mappers
//! - Quadrant decode and reconstruction
//! - Two's-complement helpers for arbitrary word widths
//!
//! # Datapath Overview
//!
//! ```text
//!  ┌───────┐   ┌─────────┐   ┌───────┐   ┌─────────────┐   ┌──────────┐   ┌────────┐
//!  │ Phase │──►│ Address │──►│ Table │──►│ Interpolate │──►│ Quadrant │──►│ Output │
//!  │  acc  │   │ mapper  │   │ read  │   │ (d > 2)     │   │ rebuild  │   │  regs  │
//!  └───────┘   └────┬────┘   └───────┘   └─────────────┘   └────▲─────┘   └────────┘
//!                   │             quadrant delay chain          │
//!                   └───────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use sincos_nco::device::{GeneratorParams, Variant, SinCosTable};
//!
//! let params = GeneratorParams::new(16, 14, 9, Variant::Generic).unwrap();
//! let table = SinCosTable::generate(params.data_width(), params.table_address_width());
//! assert_eq!(table.get(0).cos, 32767);
//! assert_eq!(table.get(0).sin, 0);
//! ```

pub mod params;
pub mod fixed;
pub mod table;
pub mod address;
pub mod quadrant;

pub use params::{AddressStrategy, GeneratorParams, MemoryStyle, ParamError, Variant};
pub use table::{SinCosTable, TableEntry};
pub use address::{mapper_for, AddressMapper, DirectMapper, MappedPhase, PaddedMapper, SplitMapper};
pub use quadrant::Quadrant;

/// A (sin, cos) pair of `data_width`-bit two's-complement values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SinCos {
    /// Sine component.
    pub sin: i64,
    /// Cosine component.
    pub cos: i64,
}

impl SinCos {
    /// Create a pair.
    pub const fn new(sin: i64, cos: i64) -> Self {
        Self { sin, cos }
    }

    /// `sin² + cos²` as a float, for magnitude checks.
    pub fn magnitude_squared(&self) -> f64 {
        let (s, c) = (self.sin as f64, self.cos as f64);
        s * s + c * c
    }
}

impl From<TableEntry> for SinCos {
    fn from(entry: TableEntry) -> Self {
        Self {
            sin: entry.sin,
            cos: entry.cos,
        }
    }
}
