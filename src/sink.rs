// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;
use std::sync::Arc;

/// The final destination of a normalized log record.
///
/// Exactly one sink receives each log call, chosen by a fixed precedence:
/// shared override, then instance sink, then the automatic color sink, then
/// the default console sink. A sink that panics propagates to the caller of
/// the logging method; a broken custom sink is a caller configuration
/// error, not something the pipeline hides.
pub trait Sink: Debug + Send + Sync {
    /// Writes the record.
    fn emit(&self, record: &LogRecord);
}

/// Adapts a closure into a [`Sink`].
///
/// ```
/// use std::sync::Arc;
/// let sink = conso::sink_fn(|record| {
///     eprintln!("custom: {}", record.first_arg_string());
/// });
/// let shared = Arc::new(conso::SharedConfig::new());
/// shared.set_sink(Some(sink));
/// ```
pub fn sink_fn<F>(f: F) -> Arc<dyn Sink>
where
    F: Fn(&LogRecord) + Send + Sync + 'static,
{
    Arc::new(FnSink(f))
}

struct FnSink<F>(F);

impl<F> Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSink")
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(&LogRecord) + Send + Sync,
{
    fn emit(&self, record: &LogRecord) {
        (self.0)(record)
    }
}

/*
Boilerplate notes.

No async variant: every log call is synchronous by contract, and the only
async surface in the crate (the batch forwarder) buffers records rather
than awaiting sinks.
Clone on Sink makes no sense; sinks are shared by Arc.
*/
