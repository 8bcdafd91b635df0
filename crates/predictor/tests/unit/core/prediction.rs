//! Prediction Path Tests.
//!
//! Exercises lookup through the public interface: deterministic scoring,
//! direct-mapped modulo indexing (including accepted aliasing), the
//! degenerate unconditional path, speculative history shifts, and BTB-miss
//! repair.

use snnbp_core::config::SnnConfig;
use snnbp_core::core::{BranchPredictor, SnnPredictor};

fn small_config() -> SnnConfig {
    SnnConfig {
        table_size: 4,
        dense_history_len: 4,
        sparse_seg_len: 2,
        sparse_n_segs: 1,
        local_history_len: 4,
        counter_bits: 6,
        active_term: 2,
        num_threads: 2,
    }
}

#[test]
fn test_fresh_table_predicts_taken() {
    // All weights zero → score 0 → taken (score >= 0).
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (taken, token) = p.predict(0, 0x10);
    assert!(taken);
    assert_eq!(token.score(), 0);
    assert!(token.predicted_taken());
}

#[test]
fn test_neuron_scoring_is_pure() {
    let p = SnnPredictor::new(&small_config()).unwrap();
    let entry = p.neuron(0);
    let history = p.global_history(0);
    let first = entry.predict(history);
    let second = entry.predict(history);
    assert_eq!(first, second);
}

#[test]
fn test_identical_sequences_produce_identical_predictions() {
    let config = small_config();
    let mut a = SnnPredictor::new(&config).unwrap();
    let mut b = SnnPredictor::new(&config).unwrap();

    let outcomes = [true, false, true, true, false, false, true, false];
    for (i, &actual) in outcomes.iter().enumerate() {
        let addr = 0x10 + (i as u64 % 3) * 4;
        let (taken_a, token_a) = a.predict(0, addr);
        let (taken_b, token_b) = b.predict(0, addr);
        assert_eq!(taken_a, taken_b);
        assert_eq!(token_a.score(), token_b.score());
        a.update(0, addr, actual, token_a, false);
        b.update(0, addr, actual, token_b, false);
    }
}

#[test]
fn test_modulo_indexing_and_aliasing() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();

    // (0x10 >> 2) % 4 == 0, (0x14 >> 2) % 4 == 1.
    let (_, token) = p.predict(0, 0x10);
    assert_eq!(token.table_index(), Some(0));
    p.squash(0, token);

    let (_, token) = p.predict(0, 0x14);
    assert_eq!(token.table_index(), Some(1));
    p.squash(0, token);

    // 0x30 >> 2 == 12 aliases onto slot 0 with a 4-entry table. Accepted
    // capacity trade-off: both addresses share one entry.
    let (_, token) = p.predict(0, 0x30);
    assert_eq!(token.table_index(), Some(0));
    p.squash(0, token);
}

#[test]
fn test_prediction_shifts_global_history_speculatively() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (taken, _token) = p.predict(0, 0x10);
    // The predicted outcome is visible in the history before resolution.
    assert_eq!(p.global_history(0).bit(0), taken);
}

#[test]
fn test_prediction_ids_are_monotonic() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (_, first) = p.predict(0, 0x10);
    let (_, second) = p.predict(0, 0x14);
    assert_eq!(first.prediction_id(), Some(0));
    assert_eq!(second.prediction_id(), Some(1));
}

#[test]
fn test_threads_have_independent_histories() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (_, _token) = p.predict(0, 0x10);
    assert!(p.global_history(0).bit(0));
    assert!(!p.global_history(1).bit(0));
}

#[test]
fn test_uncond_branch_token_is_degenerate() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let token = p.uncond_branch(0);
    assert_eq!(token.table_index(), None);
    assert_eq!(token.prediction_id(), None);
    assert!(token.predicted_taken());
    assert!(token.score() > p.neuron(0).theta());
    // Unconditional branches still shift the global history as taken.
    assert!(p.global_history(0).bit(0));
}

#[test]
fn test_btb_update_repairs_history() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (taken, token) = p.predict(0, 0x10);
    assert!(taken);
    assert!(p.global_history(0).bit(0));

    // Fetch could not redirect: the speculative taken bit becomes not-taken.
    p.btb_update(0, 0x10);
    assert!(!p.global_history(0).bit(0));
    assert!(!p.neuron(0).local_history().bit(0));
    p.squash(0, token);
}

#[test]
fn test_stats_count_lookups() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let (_, t1) = p.predict(0, 0x10);
    let (_, t2) = p.predict(0, 0x14);
    let t3 = p.uncond_branch(0);
    assert_eq!(p.stats().lookups, 2);
    assert_eq!(p.stats().uncond_branches, 1);
    p.squash(0, t3);
    p.squash(0, t2);
    p.squash(0, t1);
}

#[test]
#[should_panic(expected = "thread id")]
fn test_unknown_thread_id_is_fatal() {
    let mut p = SnnPredictor::new(&small_config()).unwrap();
    let _ = p.predict(7, 0x10);
}

#[test]
fn test_rejects_invalid_config() {
    let config = SnnConfig {
        table_size: 0,
        ..small_config()
    };
    assert!(SnnPredictor::new(&config).is_err());
}
