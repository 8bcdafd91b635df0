//! Construction-error definitions.
//!
//! The predictor is a best-effort structure: mispredictions are its normal
//! operating condition, counter arithmetic saturates instead of failing, and
//! table indexing is in range by construction. The only recoverable error
//! class is an invalid set of construction parameters, reported here.
//! Protocol misuse (a token presented to the wrong operation, an unknown
//! thread id) indicates a bug in the host's pipeline logic and is treated as
//! a fatal precondition failure, not an error value.

use thiserror::Error;

/// Rejected construction parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A structural parameter that must be positive was zero.
    #[error("{name} must be non-zero")]
    ZeroParameter {
        /// Name of the offending configuration field.
        name: &'static str,
    },

    /// The weight counter width cannot be represented.
    #[error("counter width {bits} outside supported range 2..=31")]
    CounterWidth {
        /// The rejected bit width.
        bits: u32,
    },
}
