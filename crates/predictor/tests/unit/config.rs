//! Configuration Tests.
//!
//! Verifies default values, JSON deserialization with partial overrides,
//! derived geometry, and parameter validation.

use snnbp_core::common::ConfigError;
use snnbp_core::config::SnnConfig;

#[test]
fn test_default_config() {
    let config = SnnConfig::default();
    assert_eq!(config.table_size, 2048);
    assert_eq!(config.dense_history_len, 12);
    assert_eq!(config.sparse_seg_len, 8);
    assert_eq!(config.sparse_n_segs, 4);
    assert_eq!(config.local_history_len, 8);
    assert_eq!(config.counter_bits, 8);
    assert_eq!(config.active_term, 256);
    assert_eq!(config.num_threads, 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_global_history_len_is_dense_plus_windows() {
    let config = SnnConfig::default();
    assert_eq!(config.global_history_len(), 12 + 4 * 8);

    let config = SnnConfig {
        dense_history_len: 0,
        sparse_seg_len: 3,
        sparse_n_segs: 5,
        ..SnnConfig::default()
    };
    assert_eq!(config.global_history_len(), 15);
}

#[test]
fn test_json_full_deserialization() {
    let json = r#"{
        "table_size": 512,
        "dense_history_len": 16,
        "sparse_seg_len": 4,
        "sparse_n_segs": 6,
        "local_history_len": 12,
        "counter_bits": 6,
        "active_term": 64,
        "num_threads": 4
    }"#;

    let config: SnnConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.table_size, 512);
    assert_eq!(config.dense_history_len, 16);
    assert_eq!(config.sparse_seg_len, 4);
    assert_eq!(config.sparse_n_segs, 6);
    assert_eq!(config.local_history_len, 12);
    assert_eq!(config.counter_bits, 6);
    assert_eq!(config.active_term, 64);
    assert_eq!(config.num_threads, 4);
}

#[test]
fn test_json_partial_deserialization_uses_defaults() {
    let json = r#"{ "table_size": 64, "num_threads": 2 }"#;
    let config: SnnConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.table_size, 64);
    assert_eq!(config.num_threads, 2);
    assert_eq!(config.dense_history_len, 12);
    assert_eq!(config.counter_bits, 8);
}

#[test]
fn test_empty_json_is_default_config() {
    let config: SnnConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.table_size, SnnConfig::default().table_size);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_table() {
    let config = SnnConfig {
        table_size: 0,
        ..SnnConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroParameter { name: "table_size" })
    );
}

#[test]
fn test_validate_rejects_zero_segment_geometry() {
    let config = SnnConfig {
        sparse_seg_len: 0,
        ..SnnConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroParameter {
            name: "sparse_seg_len"
        })
    );

    let config = SnnConfig {
        sparse_n_segs: 0,
        ..SnnConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroParameter {
            name: "sparse_n_segs"
        })
    );
}

#[test]
fn test_validate_rejects_bad_counter_width() {
    for bits in [0, 1, 32, 64] {
        let config = SnnConfig {
            counter_bits: bits,
            ..SnnConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CounterWidth { bits }));
    }
}

#[test]
fn test_validate_rejects_zero_threads_and_term() {
    let config = SnnConfig {
        num_threads: 0,
        ..SnnConfig::default()
    };
    assert!(config.validate().is_err());

    let config = SnnConfig {
        active_term: 0,
        ..SnnConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_dense_history_is_allowed() {
    let config = SnnConfig {
        dense_history_len: 0,
        ..SnnConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_name_the_field() {
    let err = ConfigError::ZeroParameter { name: "table_size" };
    assert_eq!(err.to_string(), "table_size must be non-zero");

    let err = ConfigError::CounterWidth { bits: 40 };
    assert_eq!(
        err.to_string(),
        "counter width 40 outside supported range 2..=31"
    );
}
