//! Predictor operation statistics.
//!
//! This module tracks counters for the predictor's public operations. It
//! provides:
//! 1. **Lookup counts:** Conditional predictions and unconditional
//!    notifications.
//! 2. **Resolution counts:** Commits, mispredictions, and derived accuracy.
//! 3. **Recovery counts:** Explicit squashes and squashed updates.
//! 4. **Diagnostics:** Completed weight dumps.

/// Operation counters accumulated over a predictor's lifetime.
///
/// Counters only ever increase; the host samples them (or a delta between
/// samples) for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictorStats {
    /// Conditional-branch predictions issued.
    pub lookups: u64,
    /// Unconditional-branch notifications received.
    pub uncond_branches: u64,
    /// Normal (non-squashed) resolutions.
    pub commits: u64,
    /// Committed resolutions whose predicted direction was wrong.
    pub mispredictions: u64,
    /// Explicit squash rollbacks.
    pub squashes: u64,
    /// Resolutions delivered with the squashed flag set.
    pub squashed_updates: u64,
    /// Periodic weight dumps completed.
    pub dumps: u64,
}

impl PredictorStats {
    /// Fraction of committed resolutions that were predicted correctly,
    /// or `None` before the first commit.
    pub fn accuracy(&self) -> Option<f64> {
        if self.commits == 0 {
            return None;
        }
        let correct = self.commits - self.mispredictions;
        Some(correct as f64 / self.commits as f64)
    }
}
