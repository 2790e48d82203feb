// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message normalizer.
//!
//! Rewrites a record's argument list according to the effective stringify,
//! concat and stacktrace settings before the sink sees it:
//!
//! 1. styled fragments wrap in SGR sequences on terminals, stay tagged for
//!    the browser sink's format-string folding, or reduce to plain text,
//!    with empty fragments removed; non-primitive arguments stringify to
//!    their structured text when requested;
//! 2. a stack trace is appended (trailing argument in text mode, dedicated
//!    field in JSON mode);
//! 3. concat folds everything, including the line prefix, into exactly one
//!    string so the sink receives a single value.
//!
//! Stringification cannot fail out of this module: a value whose
//! structured rendering errors degrades to its plain string.

use crate::arg::Arg;
use crate::config::{Effective, StackTrace};
use crate::log_record::LogRecord;
use crate::runtime::Runtime;
use crate::style;

pub(crate) fn normalize(record: &mut LogRecord, eff: &Effective) {
    let mut out: Vec<Arg> = Vec::with_capacity(record.args().len());
    for arg in record.args() {
        match arg {
            Arg::Styled { text, style } => expand_styled(&mut out, eff.runtime, text, style),
            other if eff.stringify && !other.is_primitive() => {
                out.push(Arg::Str(stringify_arg(other)));
            }
            other => out.push(other.clone()),
        }
    }

    if let Some(stack) = capture_stack(eff.stacktrace) {
        if eff.json {
            record.stack = Some(stack);
        } else {
            out.push(Arg::Str(stack));
        }
    }

    if eff.concat {
        let mut joined = prefix(record);
        for arg in &out {
            joined.push(' ');
            joined.push_str(&arg.to_display_string());
        }
        out = vec![Arg::Str(joined)];
        record.concatenated = true;
    }

    record.set_args(out);
}

/// The `[timestamp] [LEVEL] [namespace]` prefix folded into concat output.
fn prefix(record: &LogRecord) -> String {
    let mut prefix = format!("[{}] [{}]", record.timestamp_rfc3339(), record.level());
    if let Some(token) = record.namespace().bracketed() {
        prefix.push(' ');
        prefix.push_str(&token);
    }
    prefix
}

/// Styled fragments are recognized regardless of stringify/concat. Empty
/// text drops the fragment outright so no stray style strings or escape
/// sequences reach the sink.
fn expand_styled(out: &mut Vec<Arg>, runtime: Runtime, text: &str, style: &str) {
    if text.is_empty() {
        return;
    }
    match runtime {
        Runtime::Terminal => out.push(Arg::Str(style::ansi_wrap(text, style))),
        Runtime::Browser => {
            // Consoles only interpret %c directives inside the first
            // argument, so the fragment stays tagged and the browser sink
            // folds it into the leading format string.
            out.push(Arg::Styled {
                text: text.to_string(),
                style: style.to_string(),
            });
        }
        Runtime::Headless | Runtime::Unknown => out.push(Arg::Str(text.to_string())),
    }
}

/// Structured text for a non-primitive argument; plain coercion on failure.
fn stringify_arg(arg: &Arg) -> String {
    match arg {
        Arg::Json(v) => v.to_string(),
        Arg::Dyn(v) => match v.structured() {
            Ok(json) => json.to_string(),
            Err(_) => v.plain(),
        },
        other => other.to_display_string(),
    }
}

/// Captures the current backtrace text, truncated to `Limit(n)` frames.
///
/// Capture is expensive; the setting exists for local debugging and the
/// cost is the caller's responsibility.
fn capture_stack(setting: StackTrace) -> Option<String> {
    let limit = match setting {
        StackTrace::Off => return None,
        StackTrace::Full => None,
        StackTrace::Limit(n) => Some(n),
    };
    let trace = std::backtrace::Backtrace::force_capture().to_string();
    match limit {
        None => Some(trace),
        Some(n) => {
            let mut frames = 0usize;
            let mut kept = Vec::new();
            for line in trace.lines() {
                // Frame headers look like "  3: symbol"; location lines are
                // indented continuations.
                if line.trim_start().split(':').next().is_some_and(|head| {
                    head.chars().all(|c| c.is_ascii_digit()) && !head.is_empty()
                }) {
                    frames += 1;
                    if frames > n {
                        break;
                    }
                }
                kept.push(line);
            }
            Some(kept.join("\n"))
        }
    }
}
