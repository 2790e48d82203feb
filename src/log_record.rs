// SPDX-License-Identifier: MIT OR Apache-2.0

//! The log record type.
//!
//! A [`LogRecord`] captures one log call before any formatting decision is
//! made: severity, namespace, the raw argument list, a timestamp taken at
//! call time, and optional metadata from the configured metadata getter.
//! Records are created fresh per call, handed to the hook, rewritten in
//! place by the normalizer, and then consumed by exactly one sink (or
//! copied into a batch buffer by the forwarder).

use crate::arg::Arg;
use crate::level::Level;
use crate::namespace::Namespace;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// A single log call.
#[derive(Debug, Clone)]
pub struct LogRecord {
    level: Level,
    namespace: Namespace,
    args: Vec<Arg>,
    timestamp: DateTime<Utc>,
    metadata: Option<Map<String, Value>>,
    /// Stack-trace text destined for the dedicated JSON field.
    pub(crate) stack: Option<String>,
    /// Set once the normalizer has joined the args into a single value.
    pub(crate) concatenated: bool,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    pub fn new(level: Level, namespace: Namespace, args: Vec<Arg>) -> Self {
        LogRecord {
            level,
            namespace,
            args,
            timestamp: Utc::now(),
            metadata: None,
            stack: None,
            concatenated: false,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Metadata attached by the configured metadata getter, if any.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    /// The string coercion of the first argument; empty for zero arguments.
    ///
    /// This is what every logger method returns, independent of sink, JSON
    /// or concat mode.
    pub fn first_arg_string(&self) -> String {
        self.args.first().map(Arg::to_display_string).unwrap_or_default()
    }

    /// RFC 3339 timestamp with millisecond precision and a `Z` suffix.
    pub(crate) fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(crate) fn set_metadata(&mut self, metadata: Map<String, Value>) {
        self.metadata = Some(metadata);
    }

    pub(crate) fn set_args(&mut self, args: Vec<Arg>) {
        self.args = args;
    }
}

/*
Boilerplate notes.

Clone is needed so the forwarder can buffer what a sink also receives.
PartialEq would have to answer for Arg::Dyn; skipped along with Hash.
Default makes no sense without a level and a timestamp.
Display is deliberately absent: there are two textual renderings (text line
and JSON line) and picking one as "the" Display would mislead.
*/
