//! Signed saturating counter.
//!
//! The fixed-point arithmetic primitive underlying every weight in the
//! predictor. All mutations clamp to the configured bit-width range; counter
//! arithmetic never overflows and never errors.

/// A signed saturating counter with a configurable bit width.
///
/// A `b`-bit counter holds values in `[-2^(b-1), 2^(b-1)-1]`. Increment,
/// decrement, and add all saturate at the range limits instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedSatCounter {
    /// Inclusive lower bound (`-2^(b-1)`).
    min: i32,
    /// Inclusive upper bound (`2^(b-1)-1`).
    max: i32,
    /// Current value, always within `[min, max]`.
    value: i32,
}

impl SignedSatCounter {
    /// Creates a counter of the given bit width holding `init` (clamped).
    ///
    /// # Panics
    ///
    /// Panics if `bits` is outside `2..=31`.
    pub fn new(bits: u32, init: i32) -> Self {
        assert!(
            (2..=31).contains(&bits),
            "counter width {bits} outside supported range 2..=31"
        );
        let max = (1i32 << (bits - 1)) - 1;
        let min = -(1i32 << (bits - 1));
        Self {
            min,
            max,
            value: init.clamp(min, max),
        }
    }

    /// Adds one, saturating at the upper bound.
    pub fn increment(&mut self) {
        self.value = (self.value + 1).min(self.max);
    }

    /// Subtracts one, saturating at the lower bound.
    pub fn decrement(&mut self) {
        self.value = (self.value - 1).max(self.min);
    }

    /// Adds `delta`, saturating at both bounds.
    pub fn add(&mut self, delta: i32) {
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
    }

    /// Returns the current value. Side-effect free.
    #[inline]
    pub const fn read(&self) -> i32 {
        self.value
    }

    /// Resets the counter to zero.
    pub const fn reset(&mut self) {
        self.value = 0;
    }
}
