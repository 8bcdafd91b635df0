//! Sparse neural-network branch direction predictor.
//!
//! This crate implements a perceptron-style branch predictor with adaptive
//! long-range feature selection and speculative-state recovery:
//! 1. **Core:** A direct-mapped table of per-address neurons, each scoring a
//!    weighted sum over dense recent history, a sliding probe window, and
//!    adaptively-selected sparse long-range history bits.
//! 2. **Training:** Threshold-gated perceptron updates with saturating
//!    fixed-point weights and periodic promotion of the most informative
//!    probed position into a permanent sparse feature slot.
//! 3. **Speculation:** Per-thread global histories shifted at prediction
//!    time, with token-based rollback for pipeline flushes and BTB-miss
//!    repair.
//! 4. **Diagnostics:** A probe entry traced via `tracing` and periodic
//!    weight dumps through a host-supplied sink.
//! 5. **Statistics:** Lookup, commit, misprediction, and recovery counters.

/// Common primitives (saturating counter, history register, errors).
pub mod common;
/// Predictor configuration (defaults, validation, serde structures).
pub mod config;
/// Predictor core (neuron, table, token, trait, weight dump).
pub mod core;
/// Operation statistics collection.
pub mod stats;

/// Construction parameters; use `SnnConfig::default()` or deserialize from JSON.
pub use crate::config::SnnConfig;
/// Host-facing predictor trait (predict, update, squash, BTB repair).
pub use crate::core::BranchPredictor;
/// One-time snapshot linking a prediction to its resolution.
pub use crate::core::PredictionToken;
/// The predictor table; construct with `SnnPredictor::new`.
pub use crate::core::SnnPredictor;
