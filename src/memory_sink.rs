// SPDX-License-Identifier: MIT OR Apache-2.0

//! A capturing sink for tests and embedded inspection.
//!
//! `MemorySink` stores every record it receives instead of writing
//! anywhere, so tests can assert on what a logger actually dispatched, and
//! adversarial environments (wasm in a browser with a throttled console,
//! redirected stderr) can collect output for later retrieval.

use crate::log_record::LogRecord;
use crate::sink::Sink;
use std::sync::Mutex;

/// A sink that buffers records in memory.
///
/// Thread-safe; share it by `Arc` and install it as a shared override or an
/// instance sink.
///
/// ```
/// use std::sync::Arc;
/// use conso::{args, InstanceOptions, Logger, MemorySink, SharedConfig};
///
/// let shared = Arc::new(SharedConfig::new());
/// let sink = Arc::new(MemorySink::new());
/// shared.set_sink(Some(sink.clone()));
///
/// let logger = Logger::with_shared("test", InstanceOptions::new(), shared);
/// logger.log(&args!["captured"]);
/// assert_eq!(sink.len(), 1);
/// assert!(sink.drain_text().contains("captured"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink {
            records: Mutex::new(Vec::new()),
        }
    }

    /// A copy of the buffered records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Removes and returns all buffered records.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }

    /// Drains the buffer rendered as text-mode lines joined by newlines.
    ///
    /// Always the text rendering, whatever JSON mode says; this is for
    /// humans and assertions.
    pub fn drain_text(&self) -> String {
        self.drain()
            .iter()
            .map(|record| crate::console_sink::render_text(record, None))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/*
Boilerplate notes.

Clone is deliberately absent: duplicating the buffer is never what a test
wants; share the one sink by Arc instead.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::level::Level;
    use crate::namespace::Namespace;

    #[test]
    fn drain_empties_the_buffer() {
        let sink = MemorySink::new();
        sink.emit(&LogRecord::new(
            Level::Info,
            Namespace::from("t"),
            args!["one"],
        ));
        assert_eq!(sink.len(), 1);
        assert!(sink.drain_text().contains("one"));
        assert!(sink.is_empty());
        assert_eq!(sink.drain_text(), "");
    }
}
