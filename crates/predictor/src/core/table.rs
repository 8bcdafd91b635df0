//! Predictor table.
//!
//! The host-facing predictor: a direct-mapped array of neurons indexed by a
//! hash of the branch address, plus one global history register per hardware
//! thread. Threads share the one physical table; the host serializes all
//! calls, so there is no internal locking.
//!
//! Predictions are speculative: the predicted outcome is shifted into the
//! thread's global history immediately, because later branches may be
//! predicted before this one resolves. Every prediction returns a
//! [`PredictionToken`] holding the pre-shift state; the host hands it back
//! exactly once, to [`update`](BranchPredictor::update) on resolution or to
//! [`squash`](BranchPredictor::squash) on a pipeline flush, and the token's
//! snapshots drive training or history rollback.

use tracing::trace;

use crate::common::{ConfigError, HistoryRegister};
use crate::config::SnnConfig;
use crate::core::neuron::Neuron;
use crate::core::predictor::BranchPredictor;
use crate::core::probe::WeightSink;
use crate::core::token::PredictionToken;
use crate::stats::PredictorStats;

/// Table entry flagged for diagnostic tracing.
const PROBE_INDEX: usize = 0;

/// Host ticks between periodic weight dumps.
const DUMP_INTERVAL: u64 = 500 * 10_000;

/// Sparse neural-network branch direction predictor.
pub struct SnnPredictor {
    /// The neuron array; size fixed at construction.
    table: Vec<Neuron>,
    /// One global history register per hardware thread.
    global_history: Vec<HistoryRegister>,
    /// 1-bit register snapshotted into unconditional tokens.
    empty_local_history: HistoryRegister,
    /// Number of table entries.
    table_size: usize,
    /// Next conditional-prediction identifier.
    next_prediction_id: u64,
    /// Host tick at which the next periodic weight dump is due.
    next_dump_tick: u64,
    /// Operation counters.
    stats: PredictorStats,
}

impl std::fmt::Debug for SnnPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnnPredictor")
            .field("table_size", &self.table_size)
            .field("num_threads", &self.global_history.len())
            .field("next_prediction_id", &self.next_prediction_id)
            .finish_non_exhaustive()
    }
}

impl SnnPredictor {
    /// Builds a predictor from the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the parameters fail
    /// [`SnnConfig::validate`].
    pub fn new(config: &SnnConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let global_history_len = config.global_history_len();
        let mut table = vec![Neuron::new(config); config.table_size];
        if let Some(entry) = table.get_mut(PROBE_INDEX) {
            entry.set_probing(true);
        }

        Ok(Self {
            table,
            global_history: vec![
                HistoryRegister::new(global_history_len);
                config.num_threads
            ],
            empty_local_history: HistoryRegister::new(1),
            table_size: config.table_size,
            next_prediction_id: 0,
            next_dump_tick: 0,
            stats: PredictorStats::default(),
        })
    }

    /// Maps a branch address to its table slot.
    ///
    /// Direct-mapped with no collision resolution; addresses that alias
    /// modulo the table size share an entry. This is an accepted capacity
    /// trade-off.
    #[inline]
    fn index(&self, addr: u64) -> usize {
        ((addr >> 2) as usize) % self.table_size
    }

    /// The thread's global history register, checked.
    fn ghr_mut(&mut self, tid: usize) -> &mut HistoryRegister {
        assert!(
            tid < self.global_history.len(),
            "thread id {tid} out of range"
        );
        &mut self.global_history[tid]
    }

    /// Number of table entries.
    #[inline]
    pub const fn table_size(&self) -> usize {
        self.table_size
    }

    /// Number of hardware threads.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.global_history.len()
    }

    /// Read access to a table entry, for diagnostics and offline analysis.
    #[inline]
    pub fn neuron(&self, index: usize) -> &Neuron {
        &self.table[index]
    }

    /// Read access to a thread's global history register.
    #[inline]
    pub fn global_history(&self, tid: usize) -> &HistoryRegister {
        &self.global_history[tid]
    }

    /// Operation counters accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    /// Runs the periodic weight dump if the host's logical clock has
    /// reached the next due tick.
    ///
    /// `now` is an opaque, monotonically increasing host counter; the first
    /// call arms the schedule one interval ahead. Dumping is observational
    /// and has no effect on predictor behavior.
    pub fn try_dump(&mut self, now: u64, sink: &mut dyn WeightSink) {
        if self.next_dump_tick == 0 {
            self.next_dump_tick = now + DUMP_INTERVAL;
        }
        if now >= self.next_dump_tick {
            self.dump_weights(now, sink);
            self.next_dump_tick += DUMP_INTERVAL;
        }
    }

    /// Emits every entry's dense weights (bias last) to the sink.
    pub fn dump_weights(&mut self, now: u64, sink: &mut dyn WeightSink) {
        sink.begin_dump(now);
        for (index, entry) in self.table.iter().enumerate() {
            sink.entry(index, &entry.dense_values());
        }
        self.stats.dumps += 1;
    }
}

impl BranchPredictor for SnnPredictor {
    fn uncond_branch(&mut self, tid: usize) -> PredictionToken {
        self.stats.uncond_branches += 1;
        // Score above theta so a later commit's skip rule trains nothing.
        let score = self.table[0].theta() + 1;
        let token = PredictionToken::new(
            self.ghr_mut(tid).snapshot(),
            self.empty_local_history.snapshot(),
            None,
            true,
            None,
            score,
        );
        self.ghr_mut(tid).shift(true);
        token
    }

    fn predict(&mut self, tid: usize, addr: u64) -> (bool, PredictionToken) {
        self.stats.lookups += 1;
        let index = self.index(addr);
        let id = self.next_prediction_id;
        self.next_prediction_id += 1;

        assert!(
            tid < self.global_history.len(),
            "thread id {tid} out of range"
        );
        let entry = &self.table[index];
        if entry.probing() {
            trace!(target: "snnbp", addr, id, "lookup");
        }

        let score = entry.predict(&self.global_history[tid]);
        let taken = score >= 0;
        let token = PredictionToken::new(
            self.global_history[tid].snapshot(),
            entry.local_history().snapshot(),
            Some(index),
            taken,
            Some(id),
            score,
        );

        // History reflects the predicted outcome immediately; later
        // branches may be predicted before this one resolves.
        self.global_history[tid].shift(taken);
        (taken, token)
    }

    fn update(&mut self, tid: usize, addr: u64, taken: bool, token: PredictionToken, squashed: bool) {
        if squashed {
            // Already-superseded speculation being corrected: repair the
            // histories from the snapshot, train nothing.
            self.stats.squashed_updates += 1;
            let ghr = self.ghr_mut(tid);
            ghr.restore(token.global_history());
            ghr.shift(taken);
            if let Some(index) = token.table_index() {
                let local = self.table[index].local_history_mut();
                local.restore(token.local_history());
                local.shift(taken);
            }
            return;
        }

        let index = self.index(addr);
        if let Some(predicted_index) = token.table_index() {
            assert_eq!(
                predicted_index, index,
                "commit resolves a different table slot than its prediction"
            );
        }

        self.stats.commits += 1;
        if taken != token.predicted_taken() {
            self.stats.mispredictions += 1;
        }

        let entry = &mut self.table[index];
        if entry.probing() {
            trace!(
                target: "snnbp",
                addr,
                id = token.prediction_id(),
                correct = taken == token.predicted_taken(),
                "resolve"
            );
        }

        entry.fit(&token, taken);

        if entry.probing() {
            // Re-score the trained entry against the captured history; the
            // call is side-effect free and exists for the trace output.
            let _ = entry.predict(token.global_history());
        }
    }

    fn squash(&mut self, tid: usize, token: PredictionToken) {
        // Undo the speculation verbatim; no re-shift, the flushed branch
        // has not supplied a confirmed outcome yet.
        self.stats.squashes += 1;
        self.ghr_mut(tid).restore(token.global_history());
        if let Some(index) = token.table_index() {
            self.table[index]
                .local_history_mut()
                .restore(token.local_history());
        }
    }

    fn btb_update(&mut self, tid: usize, addr: u64) {
        // The fetch unit cannot redirect on a BTB miss, so the taken bit
        // speculatively shifted in by the lookup becomes not-taken.
        self.ghr_mut(tid).set_bit(0, false);
        let index = self.index(addr);
        self.table[index].local_history_mut().set_bit(0, false);
    }
}
