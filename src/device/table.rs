//! First-quadrant cos/sin table.
//!
//! Entry `i` holds `round(A·cos θ)` and `round(A·sin θ)` for
//! `θ = i · π / (2 · depth)`, where `A = 2^(data_width-1) - 1`. The table
//! stops one step short of π/2; the quadrant logic covers the rest.
//!
//! Rounding is half-away-from-zero, which is what `f64::round` does.

use super::fixed;
use std::f64::consts::FRAC_PI_2;

/// One table word: a (cos, sin) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TableEntry {
    /// Cosine sample.
    pub cos: i64,
    /// Sine sample.
    pub sin: i64,
}

/// Immutable first-quadrant lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinCosTable {
    data_width: u32,
    address_width: u32,
    entries: Vec<TableEntry>,
}

impl SinCosTable {
    /// Compute the table for the given widths.
    pub fn generate(data_width: u32, address_width: u32) -> Self {
        let depth = 1usize << address_width;
        let amplitude = fixed::max_value(data_width) as f64;
        let step = FRAC_PI_2 / depth as f64;

        let entries = (0..depth)
            .map(|i| {
                let (sin, cos) = (step * i as f64).sin_cos();
                TableEntry {
                    cos: quantize(amplitude * cos, data_width),
                    sin: quantize(amplitude * sin, data_width),
                }
            })
            .collect();

        log::debug!(
            "Generated {}-entry sin/cos table at {} bits",
            depth,
            data_width
        );

        Self {
            data_width,
            address_width,
            entries,
        }
    }

    /// Word width of each component.
    #[inline]
    pub fn data_width(&self) -> u32 {
        self.data_width
    }

    /// log2 of the depth.
    #[inline]
    pub fn address_width(&self) -> u32 {
        self.address_width
    }

    /// Number of entries.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Read one entry. Addresses are taken modulo the depth, as a
    /// hardware address decoder would.
    #[inline]
    pub fn get(&self, address: usize) -> TableEntry {
        self.entries[address & (self.entries.len() - 1)]
    }

    /// All entries in address order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Iterate over `(address, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, TableEntry)> + '_ {
        self.entries.iter().copied().enumerate()
    }
}

/// Round half away from zero into a `width`-bit register.
fn quantize(value: f64, width: u32) -> i64 {
    fixed::wrap(value.round() as i128, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_depth() {
        let table = SinCosTable::generate(16, 9);
        assert_eq!(table.depth(), 512);
        assert_eq!(table.address_width(), 9);
        assert_eq!(table.data_width(), 16);
    }

    #[test]
    fn test_entry_zero_is_exact() {
        for width in [2, 8, 16, 18, 19, 24, 32, 48] {
            let table = SinCosTable::generate(width, 6);
            let first = table.get(0);
            assert_eq!(first.cos, (1i64 << (width - 1)) - 1, "width {}", width);
            assert_eq!(first.sin, 0, "width {}", width);
        }
    }

    #[test]
    fn test_known_values_16bit() {
        let table = SinCosTable::generate(16, 9);
        // 32767 * sin(pi/1024) = 100.53
        assert_eq!(table.get(1), TableEntry { cos: 32767, sin: 101 });
        assert_eq!(table.get(511), TableEntry { cos: 101, sin: 32767 });
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(quantize(2.5, 16), 3);
        assert_eq!(quantize(-2.5, 16), -3);
        assert_eq!(quantize(2.4999, 16), 2);
    }

    #[test]
    fn test_within_half_lsb() {
        let table = SinCosTable::generate(20, 8);
        let amplitude = ((1i64 << 19) - 1) as f64;
        let step = FRAC_PI_2 / 256.0;
        for (i, entry) in table.iter() {
            let theta = step * i as f64;
            assert!((entry.cos as f64 - amplitude * theta.cos()).abs() <= 0.5);
            assert!((entry.sin as f64 - amplitude * theta.sin()).abs() <= 0.5);
        }
    }

    #[test]
    fn test_first_quadrant_monotonic() {
        let table = SinCosTable::generate(16, 7);
        for pair in table.entries().windows(2) {
            assert!(pair[1].sin >= pair[0].sin);
            assert!(pair[1].cos <= pair[0].cos);
        }
    }

    #[test]
    fn test_regeneration_is_bit_identical() {
        let a = SinCosTable::generate(32, 10);
        let b = SinCosTable::generate(32, 10);
        assert_eq!(a, b);
    }
}
