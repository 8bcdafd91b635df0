//! Predictor core.
//!
//! This module contains the learning machine itself: the per-entry neuron
//! with its sparse feature selection, the direct-mapped table the host
//! drives, the prediction-token lifecycle, the host-facing trait, and the
//! diagnostic weight dump.

pub use self::predictor::BranchPredictor;
pub use self::table::SnnPredictor;
pub use self::token::PredictionToken;

/// Per-entry predictor unit and training rule.
pub mod neuron;

/// Host-facing predictor trait.
pub mod predictor;

/// Diagnostic weight-dump sink.
pub mod probe;

/// Direct-mapped predictor table and per-thread histories.
pub mod table;

/// One-time prediction snapshot/capsule.
pub mod token;
