//! Branch predictor interface.
//!
//! This module defines the `BranchPredictor` trait: the four entry points a
//! host pipeline drives a direction predictor through, plus the BTB-miss
//! repair hook. The host supplies thread identifiers and branch addresses,
//! receives a [`PredictionToken`] per prediction, and must return every
//! token exactly once — to `update` when the branch resolves, or to
//! `squash` when the pipeline flushes past it.

use crate::core::token::PredictionToken;

/// Trait for branch direction predictors with speculative-state recovery.
///
/// All methods execute synchronously in the caller's control flow; the
/// implementation holds no locks and assumes the host serializes calls
/// across threads.
pub trait BranchPredictor {
    /// Records an unconditional branch for thread `tid`.
    ///
    /// Returns a degenerate token (no table entry, forced taken, no
    /// training effect) and shifts the thread's global history by `true`.
    fn uncond_branch(&mut self, tid: usize) -> PredictionToken;

    /// Predicts the direction of the conditional branch at `addr`.
    ///
    /// Returns the predicted direction and the token the host must hand
    /// back on resolution. The thread's global history is speculatively
    /// shifted by the predicted outcome before this call returns.
    fn predict(&mut self, tid: usize, addr: u64) -> (bool, PredictionToken);

    /// Resolves a prediction with the actual outcome.
    ///
    /// With `squashed` false this is a normal commit: the entry trains on
    /// the history captured in the token. With `squashed` true the
    /// prediction was flushed and later corrected: histories are restored
    /// from the token and re-shifted with the actual outcome, and no
    /// training occurs.
    fn update(&mut self, tid: usize, addr: u64, taken: bool, token: PredictionToken, squashed: bool);

    /// Rolls back the speculative history recorded for a flushed,
    /// still-unresolved prediction.
    ///
    /// Restores global (and, if present, local) history verbatim from the
    /// token's snapshots; no outcome is supplied and nothing trains.
    fn squash(&mut self, tid: usize, token: PredictionToken);

    /// Repairs history after a BTB miss on a just-predicted branch.
    ///
    /// Fetch cannot follow a taken prediction without a target, so the most
    /// recent global-history bit and the indexed entry's local-history bit
    /// are overwritten with not-taken.
    fn btb_update(&mut self, tid: usize, addr: u64);
}
