//! Prediction token.
//!
//! An immutable snapshot taken at prediction time. The token carries the
//! pre-shift history state needed to train on the correct bits later and to
//! roll speculative history back after a pipeline flush. It is produced by
//! exactly one prediction and must be consumed (moved) by exactly one
//! resolution call — either a commit/squashed update or an explicit squash.
//! Single consumption is enforced by ownership: tokens are not `Clone`.

use crate::common::HistoryRegister;

/// One-time capsule linking a prediction to its later resolution.
#[derive(Debug)]
pub struct PredictionToken {
    /// Global history as it was before this prediction shifted it.
    global_history: HistoryRegister,
    /// The indexed entry's local history at prediction time.
    local_history: HistoryRegister,
    /// Table slot the prediction came from; `None` for unconditional
    /// branches, which have no entry and no training effect.
    table_index: Option<usize>,
    /// Predicted direction.
    predicted_taken: bool,
    /// Monotonically increasing prediction identifier; `None` for
    /// unconditional branches.
    prediction_id: Option<u64>,
    /// The raw weighted-sum score behind the prediction.
    score: i32,
}

impl PredictionToken {
    /// Builds a token. Only the predictor table creates these.
    pub(crate) const fn new(
        global_history: HistoryRegister,
        local_history: HistoryRegister,
        table_index: Option<usize>,
        predicted_taken: bool,
        prediction_id: Option<u64>,
        score: i32,
    ) -> Self {
        Self {
            global_history,
            local_history,
            table_index,
            predicted_taken,
            prediction_id,
            score,
        }
    }

    /// The global history snapshot captured before the speculative shift.
    #[inline]
    pub const fn global_history(&self) -> &HistoryRegister {
        &self.global_history
    }

    /// The indexed entry's local history snapshot.
    #[inline]
    pub const fn local_history(&self) -> &HistoryRegister {
        &self.local_history
    }

    /// The table slot this prediction came from, if any.
    #[inline]
    pub const fn table_index(&self) -> Option<usize> {
        self.table_index
    }

    /// The predicted direction.
    #[inline]
    pub const fn predicted_taken(&self) -> bool {
        self.predicted_taken
    }

    /// The prediction identifier, if this was a conditional lookup.
    #[inline]
    pub const fn prediction_id(&self) -> Option<u64> {
        self.prediction_id
    }

    /// The weighted-sum score the direction was derived from.
    #[inline]
    pub const fn score(&self) -> i32 {
        self.score
    }
}
