// SPDX-License-Identifier: MIT OR Apache-2.0

//! The default environment-aware sink.
//!
//! Output shape depends on the runtime the sink was built for:
//!
//! - Browser: `[namespace] arg0 arg1 ...` to the matching console channel,
//!   no timestamp and no structure;
//! - Terminal / Headless, text mode: one line
//!   `[<RFC3339>] [<LEVEL>] [<namespace>] arg0 arg1 ...`;
//! - Terminal / Headless, JSON mode: a one-line JSON object with
//!   `timestamp`, `level`, `namespace`, `message` and `arg_N` fields.
//!
//! The `[<namespace>]` segment is omitted entirely (never emitted as empty
//! brackets) when the namespace is absent. Native output goes to stderr,
//! one locked write per line.

use crate::arg::Arg;
use crate::log_record::LogRecord;
use crate::runtime::Runtime;
use crate::sink::Sink;
use serde_json::{Map, Value};

/// The default sink. Cheap to construct; the dispatcher builds one per call
/// when nothing outranks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSink {
    runtime: Runtime,
    json: bool,
}

impl ConsoleSink {
    pub fn new(runtime: Runtime, json: bool) -> ConsoleSink {
        ConsoleSink { runtime, json }
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, record: &LogRecord) {
        #[cfg(target_arch = "wasm32")]
        if self.runtime == Runtime::Browser {
            browser_emit(record, None);
            return;
        }
        // A Browser classification without a wasm console (e.g. forced in a
        // native test) degrades to the text line.
        let line = if self.json && self.runtime != Runtime::Browser {
            render_json(record)
        } else {
            render_text(record, None)
        };
        write_line(&line);
    }
}

/// Renders the text-mode line. `namespace_style` wraps the namespace label
/// in an SGR sequence when the color sink is active.
pub(crate) fn render_text(record: &LogRecord, namespace_style: Option<&str>) -> String {
    if record.concatenated {
        // The normalizer already folded prefix and args into one value.
        return record.first_arg_string();
    }
    let mut line = format!("[{}] [{}]", record.timestamp_rfc3339(), record.level());
    if let Some(ns) = record.namespace().as_deref() {
        let label = match namespace_style {
            Some(style) => crate::style::ansi_wrap(ns, style),
            None => ns.to_string(),
        };
        line.push_str(" [");
        line.push_str(&label);
        line.push(']');
    }
    // Empty strings keep their positional gap; only the normalizer drops
    // empty styled fragments.
    for arg in record.args() {
        line.push(' ');
        line.push_str(&arg.to_display_string());
    }
    line
}

/// Renders the one-line JSON object.
pub(crate) fn render_json(record: &LogRecord) -> String {
    let mut obj = Map::new();
    obj.insert(
        "timestamp".to_string(),
        Value::String(record.timestamp_rfc3339()),
    );
    obj.insert(
        "level".to_string(),
        Value::String(record.level().as_str().to_string()),
    );
    obj.insert(
        "namespace".to_string(),
        match record.namespace().as_deref() {
            Some(ns) => Value::String(ns.to_string()),
            None => Value::Null,
        },
    );
    let mut args = record.args().iter();
    obj.insert(
        "message".to_string(),
        args.next()
            .map(Arg::to_json_value)
            .unwrap_or_else(|| Value::String(String::new())),
    );
    for (i, arg) in args.enumerate() {
        obj.insert(format!("arg_{i}"), arg.to_json_value());
    }
    if let Some(stack) = &record.stack {
        obj.insert("stack".to_string(), Value::String(stack.clone()));
    }
    if let Some(metadata) = record.metadata() {
        for (key, value) in metadata {
            // Reserved fields win over metadata on collision.
            obj.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    Value::Object(obj).to_string()
}

/// One locked write per line. Logging to a broken stderr is unrecoverable
/// anyway.
pub(crate) fn write_line(line: &str) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::Write;
        let mut lock = std::io::stderr().lock();
        lock.write_all(line.as_bytes()).expect("Can't log to stderr");
        lock.write_all(b"\n").expect("Can't log to stderr");
    }
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&line.into());
    }
}

/// Folds the namespace token and the arguments into one console format
/// string plus its `%c` substitution list.
///
/// Consoles only interpret directives inside the first argument, so every
/// styled segment must land in that leading string. A `%c` with an empty
/// style resets styling before plain text that follows a styled segment.
#[cfg(any(test, target_arch = "wasm32"))]
pub(crate) fn browser_format(
    record: &LogRecord,
    namespace_style: Option<&str>,
) -> (String, Vec<String>) {
    let mut segments: Vec<(String, Option<String>)> = Vec::new();
    if let Some(token) = record.namespace().bracketed() {
        let style = namespace_style
            .filter(|style| !style.is_empty())
            .map(str::to_string);
        segments.push((token, style));
    }
    for arg in record.args() {
        match arg {
            Arg::Styled { text, style } if !style.is_empty() => {
                segments.push((text.clone(), Some(style.clone())));
            }
            other => segments.push((other.to_display_string(), None)),
        }
    }

    let mut fmt = String::new();
    let mut styles = Vec::new();
    let mut styled = false;
    for (i, (text, style)) in segments.iter().enumerate() {
        if i > 0 {
            fmt.push(' ');
        }
        match style {
            Some(style) => {
                fmt.push_str("%c");
                fmt.push_str(text);
                styles.push(style.clone());
                styled = true;
            }
            None => {
                if styled && !text.is_empty() {
                    fmt.push_str("%c");
                    styles.push(String::new());
                    styled = false;
                }
                fmt.push_str(text);
            }
        }
    }
    (fmt, styles)
}

/// Browser emission on the channel matching the record's level.
#[cfg(target_arch = "wasm32")]
pub(crate) fn browser_emit(record: &LogRecord, namespace_style: Option<&str>) {
    use crate::level::Level;

    let (fmt, styles) = browser_format(record, namespace_style);
    let list = js_sys::Array::new();
    if !fmt.is_empty() || !styles.is_empty() {
        list.push(&fmt.as_str().into());
        for style in styles {
            list.push(&style.into());
        }
    }
    match record.level() {
        Level::Debug => web_sys::console::debug(&list),
        Level::Info => web_sys::console::log(&list),
        Level::Warning => web_sys::console::warn(&list),
        Level::Error => web_sys::console::error(&list),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::level::Level;
    use crate::namespace::Namespace;
    use serde_json::json;

    fn record(namespace: Namespace, args: Vec<Arg>) -> LogRecord {
        LogRecord::new(Level::Info, namespace, args)
    }

    #[test]
    fn text_line_shape() {
        let line = render_text(&record("foo".into(), args!["bar", "baz"]), None);
        // ^\[.*\] \[INFO\] \[foo\] bar baz$
        assert!(line.starts_with('['), "line: {line}");
        assert!(line.ends_with("] [INFO] [foo] bar baz"), "line: {line}");
    }

    #[test]
    fn text_line_omits_absent_namespace() {
        let line = render_text(&record(Namespace::NONE, args!["bar"]), None);
        assert!(line.ends_with("] [INFO] bar"), "line: {line}");
        assert!(!line.contains("[]"), "no empty brackets: {line}");
    }

    #[test]
    fn json_line_fields() {
        let rec = record(
            "api".into(),
            args!["Request received", json!({"method": "GET"})],
        );
        let parsed: Value = serde_json::from_str(&render_json(&rec)).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["namespace"], "api");
        assert_eq!(parsed["message"], "Request received");
        assert_eq!(parsed["arg_0"], json!({"method": "GET"}));
        assert!(parsed["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn json_line_error_arg_serializes_stack() {
        let rec = record(
            "api".into(),
            vec![
                Arg::from("failed"),
                Arg::Error {
                    message: "boom".into(),
                    stack: "boom\ncaused by: io".into(),
                },
            ],
        );
        let parsed: Value = serde_json::from_str(&render_json(&rec)).unwrap();
        assert_eq!(parsed["arg_0"], "boom\ncaused by: io");
    }

    #[test]
    fn json_metadata_merges_without_clobbering() {
        let mut rec = record("api".into(), args!["msg"]);
        let mut meta = Map::new();
        meta.insert("request_id".into(), json!("abc"));
        meta.insert("level".into(), json!("SHOULD_NOT_WIN"));
        rec.set_metadata(meta);
        let parsed: Value = serde_json::from_str(&render_json(&rec)).unwrap();
        assert_eq!(parsed["request_id"], "abc");
        assert_eq!(parsed["level"], "INFO");
    }

    #[test]
    fn json_absent_namespace_is_null() {
        let parsed: Value =
            serde_json::from_str(&render_json(&record(Namespace::NONE, args!["m"]))).unwrap();
        assert!(parsed["namespace"].is_null());
    }

    #[test]
    fn empty_string_argument_keeps_its_position() {
        let line = render_text(&record("foo".into(), args!["", "x"]), None);
        assert!(line.ends_with("] [foo]  x"), "line: {line}");
    }

    #[test]
    fn browser_format_folds_styled_into_leading_string() {
        let rec = record(
            "ui".into(),
            vec![Arg::from("before"), crate::styled("alert", "color:red")],
        );
        let (fmt, styles) = browser_format(&rec, None);
        assert_eq!(fmt, "[ui] before %calert");
        assert_eq!(styles, ["color:red"]);
    }

    #[test]
    fn browser_format_resets_style_before_trailing_text() {
        let rec = record(
            Namespace::NONE,
            vec![crate::styled("hot", "color:red"), Arg::from("after")],
        );
        let (fmt, styles) = browser_format(&rec, None);
        assert_eq!(fmt, "%chot %cafter");
        assert_eq!(styles, ["color:red", ""]);
    }

    #[test]
    fn browser_format_styles_namespace_token() {
        let rec = record("api".into(), args!["m"]);
        let (fmt, styles) = browser_format(&rec, Some("color:#0074d9"));
        assert_eq!(fmt, "%c[api] %cm");
        assert_eq!(styles, ["color:#0074d9", ""]);
    }

    #[test]
    fn styled_namespace_in_text_line() {
        let line = render_text(&record("foo".into(), args!["x"]), Some("1;35"));
        assert!(line.contains("[\x1b[1;35mfoo\x1b[0m]"), "line: {line}");
    }
}
