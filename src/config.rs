// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide and per-instance configuration, and the per-call merge.
//!
//! # Architecture
//!
//! Three layers feed every log call, merged under a fixed precedence:
//!
//! 1. per-instance settings ([`InstanceOptions`], highest),
//! 2. the shared record ([`SharedConfig`]),
//! 3. built-in defaults (lowest).
//!
//! The merge result ([`Effective`]) is recomputed on every call and never
//! persisted, so a change to the shared record is visible on the very next
//! call of every logger that references it.
//!
//! # The shared record
//!
//! [`SharedConfig`] is an explicitly constructed object passed by `Arc` to
//! every logger at construction time; [`SharedConfig::global`] returns the
//! single well-known default instance used when no override is supplied.
//! That preserves true process-global semantics (one record, visible to
//! every logger) while keeping the sharing mechanism injectable: a test
//! hands each logger its own fresh record and never touches global state.

use crate::arg::Arg;
use crate::log_record::LogRecord;
use crate::runtime::Runtime;
use crate::sink::Sink;
use crate::spinlock::Spinlock;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};

/// Observer invoked on every log call, always before the sink.
pub type Hook = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Produces the metadata map attached to each record.
pub type MetadataFn = Arc<dyn Fn() -> Map<String, Value> + Send + Sync>;

/// Stack-trace capture setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackTrace {
    /// No capture.
    #[default]
    Off,
    /// Full backtrace appended.
    Full,
    /// Backtrace truncated to this many frames.
    Limit(usize),
}

/// Color selection for a logger instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Derive a stable style from the namespace.
    Auto,
    /// Explicit style string: SGR parameters on terminals, CSS on wasm.
    Style(String),
}

/// The mutable knobs of a [`SharedConfig`].
#[derive(Clone)]
struct SharedSettings {
    hook: Option<Hook>,
    sink: Option<Arc<dyn Sink>>,
    json: bool,
    debug: Option<bool>,
    stringify: Option<bool>,
    concat: Option<bool>,
    stacktrace: Option<StackTrace>,
    metadata: Option<MetadataFn>,
    runtime: Runtime,
}

impl SharedSettings {
    fn defaults() -> SharedSettings {
        SharedSettings {
            hook: None,
            sink: None,
            json: false,
            debug: None,
            stringify: None,
            concat: None,
            stacktrace: None,
            metadata: None,
            runtime: Runtime::detect(),
        }
    }
}

/// The shared configuration record.
///
/// One of these is referenced by every logger; mutations are visible to all
/// of them on their next call. Every setter takes `&self` and holds the
/// internal spinlock only long enough to swap the value.
pub struct SharedConfig {
    settings: Spinlock<SharedSettings>,
}

impl SharedConfig {
    /// A fresh record with every knob at its documented default.
    pub fn new() -> SharedConfig {
        SharedConfig {
            settings: Spinlock::new(SharedSettings::defaults()),
        }
    }

    /// The well-known default instance, shared by every logger constructed
    /// with [`Logger::new`](crate::Logger::new) or
    /// [`Logger::with_options`](crate::Logger::with_options).
    pub fn global() -> &'static Arc<SharedConfig> {
        static GLOBAL: OnceLock<Arc<SharedConfig>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SharedConfig::new()))
    }

    /// Restores every knob to its documented default: hook, sink,
    /// stringify, concat, stacktrace, metadata and debug unset, JSON mode
    /// off, runtime re-detected. Intended for test isolation.
    pub fn reset(&self) {
        self.settings.with(|s| *s = SharedSettings::defaults());
    }

    /// Installs (or clears) the observer hook.
    pub fn set_hook(&self, hook: Option<Hook>) {
        self.settings.with(|s| s.hook = hook);
    }

    /// Installs (or clears) the sink override. When set, it outranks every
    /// instance sink for every call.
    pub fn set_sink(&self, sink: Option<Arc<dyn Sink>>) {
        self.settings.with(|s| s.sink = sink);
    }

    /// Switches the default sink between text lines and one-object-per-line
    /// JSON on server runtimes.
    pub fn set_json(&self, on: bool) {
        self.settings.with(|s| s.json = on);
    }

    /// Process-wide debug-enabled value; instances may override either way.
    pub fn set_debug(&self, on: Option<bool>) {
        self.settings.with(|s| s.debug = on);
    }

    pub fn set_stringify(&self, on: Option<bool>) {
        self.settings.with(|s| s.stringify = on);
    }

    pub fn set_concat(&self, on: Option<bool>) {
        self.settings.with(|s| s.concat = on);
    }

    pub fn set_stacktrace(&self, setting: Option<StackTrace>) {
        self.settings.with(|s| s.stacktrace = setting);
    }

    /// Installs (or clears) the metadata getter, called once per record.
    pub fn set_metadata(&self, metadata: Option<MetadataFn>) {
        self.settings.with(|s| s.metadata = metadata);
    }

    /// Overrides the detected runtime, e.g. to force plain output in tests.
    pub fn set_runtime(&self, runtime: Runtime) {
        self.settings.with(|s| s.runtime = runtime);
    }

    /// Current JSON-mode flag.
    pub fn json(&self) -> bool {
        self.settings.with(|s| s.json)
    }

    /// Current runtime classification.
    pub fn runtime(&self) -> Runtime {
        self.settings.with(|s| s.runtime)
    }

    fn snapshot(&self) -> SharedSettings {
        self.settings.with(|s| s.clone())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        SharedConfig::new()
    }
}

impl std::fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.snapshot();
        f.debug_struct("SharedConfig")
            .field("hook", &s.hook.is_some())
            .field("sink", &s.sink)
            .field("json", &s.json)
            .field("debug", &s.debug)
            .field("stringify", &s.stringify)
            .field("concat", &s.concat)
            .field("stacktrace", &s.stacktrace)
            .field("metadata", &s.metadata.is_some())
            .field("runtime", &s.runtime)
            .finish()
    }
}

/// Per-instance settings, supplied at logger construction.
///
/// Every field outranks the shared record's value for that knob; unset
/// fields fall through.
#[derive(Clone, Default)]
pub struct InstanceOptions {
    pub(crate) debug: Option<bool>,
    pub(crate) color: Option<Color>,
    pub(crate) stringify: Option<bool>,
    pub(crate) concat: Option<bool>,
    pub(crate) stacktrace: Option<StackTrace>,
    pub(crate) sink: Option<Arc<dyn Sink>>,
}

impl InstanceOptions {
    pub fn new() -> InstanceOptions {
        InstanceOptions::default()
    }

    /// Explicit debug-enabled value; outranks the shared setting either way.
    pub fn debug(mut self, on: bool) -> Self {
        self.debug = Some(on);
        self
    }

    /// Namespace color; activates the color-aware sink on styling runtimes.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn stringify(mut self, on: bool) -> Self {
        self.stringify = Some(on);
        self
    }

    pub fn concat(mut self, on: bool) -> Self {
        self.concat = Some(on);
        self
    }

    pub fn stacktrace(mut self, setting: StackTrace) -> Self {
        self.stacktrace = Some(setting);
        self
    }

    /// Per-instance sink; outranked only by the shared sink override.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl std::fmt::Debug for InstanceOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceOptions")
            .field("debug", &self.debug)
            .field("color", &self.color)
            .field("stringify", &self.stringify)
            .field("concat", &self.concat)
            .field("stacktrace", &self.stacktrace)
            .field("sink", &self.sink)
            .finish()
    }
}

/// The merge result for one call. Never stored.
pub(crate) struct Effective {
    pub debug_enabled: bool,
    pub json: bool,
    pub stringify: bool,
    pub concat: bool,
    pub stacktrace: StackTrace,
    pub color: Option<Color>,
    pub hook: Option<Hook>,
    pub shared_sink: Option<Arc<dyn Sink>>,
    pub instance_sink: Option<Arc<dyn Sink>>,
    pub metadata: Option<MetadataFn>,
    pub runtime: Runtime,
}

/// Merges instance > shared > default for each independent knob.
pub(crate) fn resolve(options: &InstanceOptions, shared: &SharedConfig) -> Effective {
    let s = shared.snapshot();
    let concat = options.concat.or(s.concat).unwrap_or(false);
    // Invariant: concat forces stringify, even against an explicit
    // stringify=false at either layer.
    let stringify = concat || options.stringify.or(s.stringify).unwrap_or(false);
    Effective {
        debug_enabled: options.debug.or(s.debug).unwrap_or(true),
        json: s.json,
        stringify,
        concat,
        stacktrace: options.stacktrace.or(s.stacktrace).unwrap_or_default(),
        color: options.color.clone(),
        hook: s.hook,
        shared_sink: s.sink,
        instance_sink: options.sink.clone(),
        metadata: s.metadata,
        runtime: s.runtime,
    }
}

/// `args.first()` coercion shared by the logger and the wrappers.
pub(crate) fn first_arg_string(args: &[Arg]) -> String {
    args.first().map(Arg::to_display_string).unwrap_or_default()
}
