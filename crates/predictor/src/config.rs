//! Configuration for the sparse neural-network predictor.
//!
//! This module defines the construction parameters of the predictor. It
//! provides:
//! 1. **Defaults:** Baseline geometry (table size, history lengths, segment
//!    counts, counter width).
//! 2. **Structure:** A flat, serde-deserializable parameter set supplied
//!    once at construction.
//! 3. **Validation:** A typed check rejecting parameter sets the predictor
//!    cannot be built from.
//!
//! Configuration is supplied via JSON from the host or use
//! `SnnConfig::default()` for a standalone instance.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the predictor.
///
/// These values define the baseline predictor geometry when not explicitly
/// overridden by the host.
mod defaults {
    /// Default number of table entries.
    ///
    /// Addressing is direct-mapped; branches whose addresses collide modulo
    /// the table size share an entry.
    pub const TABLE_SIZE: usize = 2048;

    /// Default dense global history length (12 bits).
    ///
    /// The most recent history bits, each with its own permanent weight.
    pub const DENSE_HISTORY_LEN: usize = 12;

    /// Default sparse segment length (8 bits).
    ///
    /// Width of the sliding window probed for candidate long-range features,
    /// and of each committed segment's selection range.
    pub const SPARSE_SEG_LEN: usize = 8;

    /// Default number of sparse segments (4 windows).
    ///
    /// Each segment can permanently track one long-range history position.
    pub const SPARSE_N_SEGS: usize = 4;

    /// Default per-entry local history length (8 bits).
    pub const LOCAL_HISTORY_LEN: usize = 8;

    /// Default weight counter width (8 bits, values in -128..=127).
    pub const COUNTER_BITS: u32 = 8;

    /// Default reselection period (256 training calls per window).
    ///
    /// How many outcomes a window accumulates before its best position is
    /// committed to a sparse segment and the window advances.
    pub const ACTIVE_TERM: u32 = 256;

    /// Default number of hardware threads (one global history each).
    pub const NUM_THREADS: usize = 1;
}

/// Construction parameters for [`SnnPredictor`](crate::core::SnnPredictor).
///
/// Geometry is fixed at construction; there is no reconfiguration path.
/// The total global history length is
/// `dense_history_len + sparse_n_segs * sparse_seg_len`.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use snnbp_core::config::SnnConfig;
///
/// let config = SnnConfig::default();
/// assert_eq!(config.table_size, 2048);
/// assert_eq!(config.global_history_len(), 12 + 4 * 8);
/// ```
///
/// Deserializing from JSON (typical host usage):
///
/// ```
/// use snnbp_core::config::SnnConfig;
///
/// let json = r#"{
///     "table_size": 4096,
///     "dense_history_len": 16,
///     "sparse_seg_len": 4,
///     "sparse_n_segs": 8,
///     "counter_bits": 6,
///     "active_term": 128,
///     "num_threads": 2
/// }"#;
///
/// let config: SnnConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.table_size, 4096);
/// assert_eq!(config.local_history_len, 8);
/// assert_eq!(config.global_history_len(), 16 + 8 * 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SnnConfig {
    /// Number of table entries (direct-mapped, modulo-indexed).
    #[serde(default = "SnnConfig::default_table_size")]
    pub table_size: usize,

    /// Number of dense (most recent) global history bits.
    #[serde(default = "SnnConfig::default_dense_history_len")]
    pub dense_history_len: usize,

    /// Length of each sparse history segment window.
    #[serde(default = "SnnConfig::default_sparse_seg_len")]
    pub sparse_seg_len: usize,

    /// Number of sparse history segments per entry.
    #[serde(default = "SnnConfig::default_sparse_n_segs")]
    pub sparse_n_segs: usize,

    /// Length of each entry's local history register.
    #[serde(default = "SnnConfig::default_local_history_len")]
    pub local_history_len: usize,

    /// Bit width of every weight counter.
    #[serde(default = "SnnConfig::default_counter_bits")]
    pub counter_bits: u32,

    /// Training calls between sparse segment reselections.
    #[serde(default = "SnnConfig::default_active_term")]
    pub active_term: u32,

    /// Number of hardware threads sharing the table.
    #[serde(default = "SnnConfig::default_num_threads")]
    pub num_threads: usize,
}

impl SnnConfig {
    /// Returns the default table size.
    fn default_table_size() -> usize {
        defaults::TABLE_SIZE
    }

    /// Returns the default dense history length.
    fn default_dense_history_len() -> usize {
        defaults::DENSE_HISTORY_LEN
    }

    /// Returns the default sparse segment length.
    fn default_sparse_seg_len() -> usize {
        defaults::SPARSE_SEG_LEN
    }

    /// Returns the default sparse segment count.
    fn default_sparse_n_segs() -> usize {
        defaults::SPARSE_N_SEGS
    }

    /// Returns the default local history length.
    fn default_local_history_len() -> usize {
        defaults::LOCAL_HISTORY_LEN
    }

    /// Returns the default counter width.
    fn default_counter_bits() -> u32 {
        defaults::COUNTER_BITS
    }

    /// Returns the default reselection period.
    fn default_active_term() -> u32 {
        defaults::ACTIVE_TERM
    }

    /// Returns the default thread count.
    fn default_num_threads() -> usize {
        defaults::NUM_THREADS
    }

    /// Total global history length: dense bits plus all sparse windows.
    #[inline]
    pub const fn global_history_len(&self) -> usize {
        self.dense_history_len + self.sparse_n_segs * self.sparse_seg_len
    }

    /// Checks that a predictor can be built from these parameters.
    ///
    /// A zero dense history length is allowed (the predictor degenerates to
    /// bias plus sparse features); everything else that is iterated over or
    /// divided by must be positive, and the counter width must fit an `i32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_size == 0 {
            return Err(ConfigError::ZeroParameter { name: "table_size" });
        }
        if self.sparse_seg_len == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "sparse_seg_len",
            });
        }
        if self.sparse_n_segs == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "sparse_n_segs",
            });
        }
        if self.local_history_len == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "local_history_len",
            });
        }
        if self.active_term == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "active_term",
            });
        }
        if self.num_threads == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "num_threads",
            });
        }
        if !(2..=31).contains(&self.counter_bits) {
            return Err(ConfigError::CounterWidth {
                bits: self.counter_bits,
            });
        }
        Ok(())
    }
}

impl Default for SnnConfig {
    fn default() -> Self {
        Self {
            table_size: defaults::TABLE_SIZE,
            dense_history_len: defaults::DENSE_HISTORY_LEN,
            sparse_seg_len: defaults::SPARSE_SEG_LEN,
            sparse_n_segs: defaults::SPARSE_N_SEGS,
            local_history_len: defaults::LOCAL_HISTORY_LEN,
            counter_bits: defaults::COUNTER_BITS,
            active_term: defaults::ACTIVE_TERM,
            num_threads: defaults::NUM_THREADS,
        }
    }
}
