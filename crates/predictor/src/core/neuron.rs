//! Predictor entry ("neuron").
//!
//! One table slot's perceptron-like unit. Each neuron scores a branch as a
//! weighted sum over three feature groups:
//! 1. **Dense:** the most recent history bits, one permanent weight each,
//!    plus a bias term.
//! 2. **Active window:** a sliding block of `seg_len` positions currently
//!    being probed as candidate long-range features.
//! 3. **Sparse segments:** a fixed number of long-range positions already
//!    committed as permanent features.
//!
//! Tracking every distant history bit per entry would be prohibitively
//! expensive in weights; instead the active window cycles across the
//! long-range region and, every `active_term` training calls, the most
//! informative position in the window is promoted into the segment slot
//! the window corresponds to.

use tracing::trace;

use crate::common::{HistoryRegister, SignedSatCounter};
use crate::config::SnnConfig;
use crate::core::token::PredictionToken;

/// Coefficient used to calculate the initial training threshold.
const THETA_COEFF: f64 = 1.93;
/// Bias used to calculate the initial training threshold.
const THETA_BIAS: f64 = 14.0;

/// A long-range feature slot.
///
/// While `valid` is false the segment contributes nothing to any score and
/// its weight is not trained; the stored position and weight are meaningful
/// only once a reselection has populated the slot.
#[derive(Clone, Copy, Debug)]
pub struct SparseSegment {
    /// Whether this slot holds a committed feature.
    pub valid: bool,
    /// Absolute history index of the tracked bit.
    pub position: usize,
    /// Weight applied to the tracked bit.
    pub weight: SignedSatCounter,
}

/// One predictor unit: weights, feature-selection state, and training rule.
#[derive(Clone, Debug)]
pub struct Neuron {
    /// Dense history length (copied from config).
    dense_len: usize,
    /// Sparse window length (copied from config).
    seg_len: usize,
    /// Sparse segment count (copied from config).
    n_segs: usize,

    /// Per-entry local history. Maintained through squash recovery but not
    /// consumed by the current prediction or training formulas.
    local_history: HistoryRegister,

    /// `dense_len + 1` counters; the last is the bias term.
    dense_weights: Vec<SignedSatCounter>,
    /// Weights over the active window's positions.
    active_weights: Vec<SignedSatCounter>,
    /// Committed long-range feature slots.
    segments: Vec<SparseSegment>,

    /// First absolute history index of the active window. Always on a
    /// `seg_len`-aligned boundary within `[dense_len, dense_len +
    /// n_segs*seg_len)`.
    active_start: usize,
    /// Training calls since the last reselection.
    active_time: u32,
    /// Training calls per reselection.
    active_term: u32,

    /// Adaptive confidence threshold gating training on correct predictions.
    theta: i32,

    /// Whether this entry emits diagnostic trace events.
    probing: bool,
}

/// Maps an outcome bit to its bipolar input value: taken → +1, not → -1.
const fn bipolar(bit: bool) -> i32 {
    ((bit as i32) << 1) - 1
}

impl Neuron {
    /// Creates a fresh entry from validated configuration.
    pub fn new(config: &SnnConfig) -> Self {
        let dense_len = config.dense_history_len;
        let seg_len = config.sparse_seg_len;
        let n_segs = config.sparse_n_segs;
        let zero = SignedSatCounter::new(config.counter_bits, 0);

        Self {
            dense_len,
            seg_len,
            n_segs,
            local_history: HistoryRegister::new(config.local_history_len),
            dense_weights: vec![zero; dense_len + 1],
            active_weights: vec![zero; seg_len],
            segments: vec![
                SparseSegment {
                    valid: false,
                    position: 0,
                    weight: zero,
                };
                n_segs
            ],
            active_start: dense_len,
            active_time: 0,
            active_term: config.active_term,
            theta: (THETA_COEFF * (dense_len + seg_len) as f64 + THETA_BIAS) as i32,
            probing: false,
        }
    }

    /// Computes the weighted-sum score for the supplied history.
    ///
    /// Pure: identical weights and history always yield the same score. The
    /// predicted direction is `score >= 0`.
    pub fn predict(&self, history: &HistoryRegister) -> i32 {
        let mut sum = self.bias();
        for i in 0..self.dense_len {
            sum += bipolar(history.bit(i)) * self.dense_weights[i].read();
        }
        for i in 0..self.seg_len {
            sum += bipolar(history.bit(self.active_start + i)) * self.active_weights[i].read();
        }
        for seg in &self.segments {
            // Invalid slots contribute nothing regardless of stored weight.
            if seg.valid {
                sum += bipolar(history.bit(seg.position)) * seg.weight.read();
            }
        }

        if self.probing {
            trace!(target: "snnbp", score = sum, "predict");
        }
        sum
    }

    /// Trains the entry against the resolved outcome.
    ///
    /// Confidently-correct predictions (`|score| > theta`) are not
    /// reinforced; this limits weight drift and training cost. All weight
    /// adjustments read the history captured in the token, not the current
    /// (speculatively shifted) registers.
    pub fn fit(&mut self, token: &PredictionToken, taken: bool) {
        if taken == token.predicted_taken() && token.score().abs() > self.theta {
            return;
        }
        if self.probing {
            trace!(
                target: "snnbp",
                old_score = token.score(),
                theta = self.theta,
                "train"
            );
        }

        let bias_idx = self.dense_len;
        if taken {
            self.dense_weights[bias_idx].increment();
        } else {
            self.dense_weights[bias_idx].decrement();
        }

        let history = token.global_history();
        let t = bipolar(taken);

        for i in 0..self.dense_len {
            self.dense_weights[i].add(t * bipolar(history.bit(i)));
        }
        for seg in &mut self.segments {
            if seg.valid {
                seg.weight.add(t * bipolar(history.bit(seg.position)));
            }
        }
        for i in 0..self.seg_len {
            self.active_weights[i].add(t * bipolar(history.bit(self.active_start + i)));
        }

        self.active_time += 1;
        if self.active_time >= self.active_term {
            self.reselect();
        }
    }

    /// Commits the active window's strongest position into its segment slot
    /// and advances the window.
    fn reselect(&mut self) {
        self.active_time = 0;

        // Strongest-magnitude window position; the first occurrence wins ties.
        let mut best = 0;
        let mut best_mag = self.active_weights[0].read().abs();
        for (i, weight) in self.active_weights.iter().enumerate().skip(1) {
            let mag = weight.read().abs();
            if mag > best_mag {
                best_mag = mag;
                best = i;
            }
        }

        let window = (self.active_start - self.dense_len) / self.seg_len;
        let position = self.active_start + best;
        let chosen = self.active_weights[best].read();
        let seg = &mut self.segments[window];

        if !seg.valid {
            // A newly added feature raises the required confidence margin.
            seg.valid = true;
            seg.position = position;
            seg.weight.add(chosen);
            self.theta += 2;
        } else if seg.position != position {
            // Feature churn discards the evidence accumulated for the
            // replaced position; a stable feature keeps its weight.
            seg.position = position;
            seg.weight.reset();
            seg.weight.add(chosen);
        }

        if window == self.n_segs - 1 {
            self.active_start = self.dense_len;
        } else {
            self.active_start += self.seg_len;
        }
        for weight in &mut self.active_weights {
            weight.reset();
        }
    }

    /// The bias term's current value.
    #[inline]
    pub fn bias(&self) -> i32 {
        self.dense_weights[self.dense_len].read()
    }

    /// Reads dense weight `i`.
    #[inline]
    pub fn dense_weight(&self, i: usize) -> i32 {
        self.dense_weights[i].read()
    }

    /// Reads active-window weight `i`.
    #[inline]
    pub fn active_weight(&self, i: usize) -> i32 {
        self.active_weights[i].read()
    }

    /// The committed long-range feature slots.
    #[inline]
    pub fn segments(&self) -> &[SparseSegment] {
        &self.segments
    }

    /// First absolute history index of the active window.
    #[inline]
    pub const fn active_start(&self) -> usize {
        self.active_start
    }

    /// Current adaptive confidence threshold.
    #[inline]
    pub const fn theta(&self) -> i32 {
        self.theta
    }

    /// This entry's local history register.
    #[inline]
    pub const fn local_history(&self) -> &HistoryRegister {
        &self.local_history
    }

    /// Mutable access to the local history, for squash recovery and
    /// BTB-miss repair.
    #[inline]
    pub(crate) const fn local_history_mut(&mut self) -> &mut HistoryRegister {
        &mut self.local_history
    }

    /// Whether this entry emits diagnostic trace events.
    #[inline]
    pub const fn probing(&self) -> bool {
        self.probing
    }

    /// Marks this entry as the diagnostic probe.
    pub(crate) const fn set_probing(&mut self, probing: bool) {
        self.probing = probing;
    }

    /// Current dense weight values, bias last. Used by the weight dump.
    pub(crate) fn dense_values(&self) -> Vec<i32> {
        self.dense_weights.iter().map(SignedSatCounter::read).collect()
    }
}
