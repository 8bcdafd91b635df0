//! Weight-sink test doubles.

use mockall::mock;
use snnbp_core::core::probe::WeightSink;

mock! {
    /// Mockall-generated sink for expectation-style tests.
    pub DumpSink {}
    impl WeightSink for DumpSink {
        fn begin_dump(&mut self, tick: u64);
        fn entry(&mut self, index: usize, weights: &[i32]);
    }
}

/// A sink that records everything it receives, for content assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Ticks passed to `begin_dump`, in order.
    pub headers: Vec<u64>,
    /// Entry rows received, in order.
    pub rows: Vec<(usize, Vec<i32>)>,
}

impl WeightSink for RecordingSink {
    fn begin_dump(&mut self, tick: u64) {
        self.headers.push(tick);
    }

    fn entry(&mut self, index: usize, weights: &[i32]) {
        self.rows.push((index, weights.to_vec()));
    }
}
