// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger itself: four severity methods over one dispatch pipeline.
//!
//! Every call runs the same synchronous sequence to completion before the
//! method returns: build the record, resolve the effective configuration,
//! invoke the hook, normalize the arguments, invoke exactly one sink.
//! Nothing suspends, blocks on I/O beyond the final write, or escapes the
//! call — the only asynchronous surface in the crate is the batch
//! forwarder, which observes records through the hook.

use crate::arg::Arg;
use crate::color_sink::ColorSink;
use crate::config::{self, InstanceOptions, SharedConfig};
use crate::console_sink::ConsoleSink;
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::namespace::Namespace;
use crate::normalize;
use crate::sink::Sink;
use std::sync::Arc;

/// A namespaced logger.
///
/// Construction is cheap; loggers are value types that share their
/// [`SharedConfig`] by reference. The four methods map onto the fixed
/// output levels (`debug`→DEBUG, `log`→INFO, `warn`→WARNING,
/// `error`→ERROR) and each returns the string coercion of its first
/// argument, which makes `Err(MyError::new(logger.error(&args)))` patterns
/// work without repeating the message. [`Logger::log`] is the default
/// entry point.
///
/// ```
/// use conso::{args, Logger};
///
/// let logger = Logger::new("worker");
/// logger.log(&args!["job finished", 42]);
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    namespace: Namespace,
    options: InstanceOptions,
    shared: Arc<SharedConfig>,
}

impl Logger {
    /// A logger over the well-known shared configuration.
    pub fn new(namespace: impl Into<Namespace>) -> Logger {
        Logger::with_shared(namespace, InstanceOptions::new(), SharedConfig::global().clone())
    }

    /// A logger with per-instance settings over the well-known shared
    /// configuration.
    pub fn with_options(namespace: impl Into<Namespace>, options: InstanceOptions) -> Logger {
        Logger::with_shared(namespace, options, SharedConfig::global().clone())
    }

    /// A logger over an explicitly injected shared configuration.
    pub fn with_shared(
        namespace: impl Into<Namespace>,
        options: InstanceOptions,
        shared: Arc<SharedConfig>,
    ) -> Logger {
        Logger {
            namespace: namespace.into(),
            options,
            shared,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// DEBUG-level output. A no-op (hook and sink both skipped) when the
    /// effective debug-enabled setting is false; the return value is
    /// unaffected either way.
    pub fn debug(&self, args: &[Arg]) -> String {
        self.dispatch(Level::Debug, args)
    }

    /// INFO-level output. The general method and default entry point.
    pub fn log(&self, args: &[Arg]) -> String {
        self.dispatch(Level::Info, args)
    }

    /// WARNING-level output.
    pub fn warn(&self, args: &[Arg]) -> String {
        self.dispatch(Level::Warning, args)
    }

    /// ERROR-level output.
    pub fn error(&self, args: &[Arg]) -> String {
        self.dispatch(Level::Error, args)
    }

    fn dispatch(&self, level: Level, args: &[Arg]) -> String {
        let ret = config::first_arg_string(args);
        let eff = config::resolve(&self.options, &self.shared);
        if level == Level::Debug && !eff.debug_enabled {
            return ret;
        }

        let mut record = LogRecord::new(level, self.namespace.clone(), args.to_vec());
        if let Some(metadata) = &eff.metadata {
            record.set_metadata(metadata());
        }

        // The hook sees the record before normalization, for every call,
        // always ahead of the sink.
        if let Some(hook) = &eff.hook {
            hook(&record);
        }

        normalize::normalize(&mut record, &eff);

        // Exactly one sink, fixed precedence.
        if let Some(sink) = &eff.shared_sink {
            sink.emit(&record);
        } else if let Some(sink) = &eff.instance_sink {
            sink.emit(&record);
        } else if let Some(color) = eff
            .color
            .as_ref()
            .filter(|_| eff.runtime.supports_styling())
        {
            ColorSink::for_namespace(eff.runtime, eff.json, color, &self.namespace).emit(&record);
        } else {
            ConsoleSink::new(eff.runtime, eff.json).emit(&record);
        }
        ret
    }
}
