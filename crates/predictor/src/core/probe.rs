//! Diagnostic weight dumps.
//!
//! The predictor can periodically emit every entry's dense weights for
//! offline inspection. The cadence is keyed by an opaque, monotonically
//! increasing host tick — the predictor has no clock of its own — and the
//! destination is a [`WeightSink`] the host supplies. Dumping is purely
//! observational; it never changes predictor state beyond its own counter.

use std::io::{self, Write};

/// Receiver for periodic weight dumps.
pub trait WeightSink {
    /// Called once at the start of each dump with the host tick that
    /// triggered it.
    fn begin_dump(&mut self, tick: u64);

    /// Called once per table entry with its dense weights, bias last.
    fn entry(&mut self, index: usize, weights: &[i32]);
}

/// A [`WeightSink`] writing comma-separated rows to any writer.
///
/// Each dump is preceded by a `==dump==` header line; each entry becomes
/// one row of `index,w0,w1,…,bias,`. Write errors are latched: the first
/// failure is kept and later calls become no-ops, so a broken sink can
/// never disturb the predictor.
#[derive(Debug)]
pub struct CsvWeightSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> CsvWeightSink<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Consumes the sink, returning the writer and the first write error,
    /// if any occurred.
    pub fn into_inner(self) -> (W, Option<io::Error>) {
        (self.writer, self.error)
    }

    fn write(&mut self, run: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(e) = run(&mut self.writer) {
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> WeightSink for CsvWeightSink<W> {
    fn begin_dump(&mut self, _tick: u64) {
        self.write(|w| writeln!(w, "==dump=="));
    }

    fn entry(&mut self, index: usize, weights: &[i32]) {
        self.write(|w| {
            write!(w, "{index},")?;
            for value in weights {
                write!(w, "{value},")?;
            }
            writeln!(w)
        });
    }
}
