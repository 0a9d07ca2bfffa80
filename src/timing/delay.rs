//! Fixed-depth shift register.
//!
//! A `DelayLine` of depth `n` is `n` registers in series. Clocking it moves
//! every value one stage along; the value clocked in on edge `t` is
//! visible at [`DelayLine::output`] after edge `t + n - 1` and is consumed
//! by whatever register reads it on edge `t + n`.

use smallvec::SmallVec;

/// Longest chain kept inline without a heap allocation.
const INLINE_STAGES: usize = 8;

/// Shift register of `Copy` values.
#[derive(Debug, Clone)]
pub struct DelayLine<T: Copy> {
    /// Ring storage; `head` is the newest stage.
    stages: SmallVec<[T; INLINE_STAGES]>,
    head: usize,
}

impl<T: Copy> DelayLine<T> {
    /// Create a chain of `depth` registers, all holding `init`.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    pub fn new(depth: usize, init: T) -> Self {
        assert!(depth > 0, "delay line needs at least one stage");
        Self {
            stages: SmallVec::from_elem(init, depth),
            head: 0,
        }
    }

    /// Number of register stages.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// Value held in the last stage.
    #[inline]
    pub fn output(&self) -> T {
        self.stages[(self.head + 1) % self.stages.len()]
    }

    /// Clock edge: shift everything one stage and load `input` into the
    /// first stage. Returns the value that fell off the end.
    #[inline]
    pub fn clock(&mut self, input: T) -> T {
        let oldest = (self.head + 1) % self.stages.len();
        let out = self.stages[oldest];
        self.stages[oldest] = input;
        self.head = oldest;
        out
    }

    /// Values from the newest stage to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let n = self.stages.len();
        (0..n).map(move |i| self.stages[(self.head + n - i) % n])
    }

    /// Load every stage with `value`.
    pub fn fill(&mut self, value: T) {
        for stage in self.stages.iter_mut() {
            *stage = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stage() {
        let mut line = DelayLine::new(1, 0u8);
        assert_eq!(line.output(), 0);
        line.clock(7);
        assert_eq!(line.output(), 7);
        assert_eq!(line.clock(9), 7);
        assert_eq!(line.output(), 9);
    }

    #[test]
    fn test_depth_three_timing() {
        let mut line = DelayLine::new(3, -1i32);
        line.clock(10);
        assert_eq!(line.output(), -1);
        line.clock(11);
        assert_eq!(line.output(), -1);
        line.clock(12);
        // Clocked in two edges ago, now in the last stage.
        assert_eq!(line.output(), 10);
        assert_eq!(line.clock(13), 10);
        assert_eq!(line.output(), 11);
    }

    #[test]
    fn test_iter_order() {
        let mut line = DelayLine::new(3, 0u32);
        line.clock(1);
        line.clock(2);
        line.clock(3);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![3, 2, 1]);
        line.clock(4);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn test_deep_line_spills_to_heap() {
        let mut line = DelayLine::new(12, 0u16);
        for i in 1..=12 {
            line.clock(i);
        }
        assert_eq!(line.depth(), 12);
        assert_eq!(line.output(), 1);
    }

    #[test]
    fn test_fill() {
        let mut line = DelayLine::new(4, 0u8);
        line.clock(5);
        line.fill(2);
        assert!(line.iter().all(|v| v == 2));
    }

    #[test]
    #[should_panic]
    fn test_zero_depth_rejected() {
        let _ = DelayLine::new(0, 0u8);
    }
}
