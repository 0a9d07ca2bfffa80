//! Two's-complement helpers for arbitrary word widths.
//!
//! Registers are held in `i64` and always kept sign-extended from their
//! nominal width, so a 12-bit register holding `-1` is `-1i64`, not `0xFFF`.

/// Mask with the low `bits` bits set.
#[inline]
pub const fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Largest value representable in `width` bits.
#[inline]
pub const fn max_value(width: u32) -> i64 {
    (1i64 << (width - 1)) - 1
}

/// Smallest value representable in `width` bits.
#[inline]
pub const fn min_value(width: u32) -> i64 {
    -(1i64 << (width - 1))
}

/// Keep the low `width` bits of `value` and sign-extend them.
///
/// This is what a `width`-bit register does with a wider result.
#[inline]
pub const fn wrap(value: i128, width: u32) -> i64 {
    let shift = 128 - width;
    ((value << shift) >> shift) as i64
}

/// Two's-complement negation (`!x + 1`) at `width` bits.
///
/// The most negative value negates to itself.
#[inline]
pub const fn negate(value: i64, width: u32) -> i64 {
    wrap((!(value as i128)) + 1, width)
}

/// Clamp into the symmetric range `±max_value(width)`.
#[inline]
pub fn saturate(value: i128, width: u32) -> i64 {
    let max = max_value(width) as i128;
    value.clamp(-max, max) as i64
}
