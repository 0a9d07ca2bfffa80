//! Quadrant decode and output reconstruction.
//!
//! The table only covers `[0, π/2)`. The top two phase bits say which
//! quarter turn we are in, and the reconstruction swaps and negates the
//! first-quadrant values accordingly:
//!
//! | quadrant | sin   | cos   |
//! |----------|-------|-------|
//! | 0        |  s    |  c    |
//! | 1        |  c    | -s    |
//! | 2        | -s    | -c    |
//! | 3        | -c    |  s    |

use super::fixed;
use super::SinCos;

/// One quarter of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quadrant {
    /// `[0, π/2)`
    #[default]
    First,
    /// `[π/2, π)`
    Second,
    /// `[π, 3π/2)`
    Third,
    /// `[3π/2, 2π)`
    Fourth,
}

impl Quadrant {
    /// Decode from the top two bits of a `phase_width`-bit phase.
    #[inline]
    pub fn from_phase(phase: u64, phase_width: u32) -> Self {
        Self::from_bits((phase >> (phase_width - 2)) as u8)
    }

    /// Decode from a two-bit selector (higher bits ignored).
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Quadrant::First,
            1 => Quadrant::Second,
            2 => Quadrant::Third,
            _ => Quadrant::Fourth,
        }
    }

    /// Two-bit selector value.
    #[inline]
    pub fn bits(&self) -> u8 {
        match self {
            Quadrant::First => 0,
            Quadrant::Second => 1,
            Quadrant::Third => 2,
            Quadrant::Fourth => 3,
        }
    }

    /// Map a first-quadrant pair onto this quadrant.
    ///
    /// Negation is `width`-bit two's complement and wraps at the most
    /// negative value.
    pub fn reconstruct(&self, refined: SinCos, width: u32) -> SinCos {
        let SinCos { sin, cos } = refined;
        match self {
            Quadrant::First => SinCos { sin, cos },
            Quadrant::Second => SinCos {
                sin: cos,
                cos: fixed::negate(sin, width),
            },
            Quadrant::Third => SinCos {
                sin: fixed::negate(sin, width),
                cos: fixed::negate(cos, width),
            },
            Quadrant::Fourth => SinCos {
                sin: fixed::negate(cos, width),
                cos: sin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_phase() {
        assert_eq!(Quadrant::from_phase(0x0000, 16), Quadrant::First);
        assert_eq!(Quadrant::from_phase(0x4000, 16), Quadrant::Second);
        assert_eq!(Quadrant::from_phase(0x8123, 16), Quadrant::Third);
        assert_eq!(Quadrant::from_phase(0xFFFF, 16), Quadrant::Fourth);
        assert_eq!(Quadrant::from_phase(0b10, 2), Quadrant::Third);
    }

    #[test]
    fn test_bits_round_trip() {
        for bits in 0..4 {
            assert_eq!(Quadrant::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn test_reconstruction_table() {
        let v = SinCos { sin: 100, cos: 900 };
        assert_eq!(Quadrant::First.reconstruct(v, 16), SinCos { sin: 100, cos: 900 });
        assert_eq!(Quadrant::Second.reconstruct(v, 16), SinCos { sin: 900, cos: -100 });
        assert_eq!(Quadrant::Third.reconstruct(v, 16), SinCos { sin: -100, cos: -900 });
        assert_eq!(Quadrant::Fourth.reconstruct(v, 16), SinCos { sin: -900, cos: 100 });
    }

    #[test]
    fn test_reconstruction_wraps_most_negative() {
        let v = SinCos { sin: -32768, cos: -32768 };
        let out = Quadrant::Third.reconstruct(v, 16);
        assert_eq!(out, SinCos { sin: -32768, cos: -32768 });
    }
}
