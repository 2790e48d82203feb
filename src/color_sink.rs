// SPDX-License-Identifier: MIT OR Apache-2.0

//! The color-aware sink.
//!
//! Wraps the namespace label in the runtime's styled-output mechanism: an
//! SGR sequence combined with the structured timestamp/level prefix on a
//! terminal, a `%c` directive on wasm. On runtimes without styling it falls
//! back silently to the default sink.

use crate::config::Color;
use crate::console_sink::ConsoleSink;
use crate::log_record::LogRecord;
use crate::namespace::Namespace;
use crate::runtime::Runtime;
use crate::sink::Sink;
use crate::style;

/// A sink that styles the namespace label before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSink {
    runtime: Runtime,
    json: bool,
    style: String,
}

impl ColorSink {
    pub fn new(runtime: Runtime, json: bool, style: impl Into<String>) -> ColorSink {
        ColorSink {
            runtime,
            json,
            style: style.into(),
        }
    }

    /// Resolves [`Color::Auto`] against the namespace: a stable SGR style on
    /// terminals, a stable CSS color on wasm.
    pub(crate) fn for_namespace(
        runtime: Runtime,
        json: bool,
        color: &Color,
        namespace: &Namespace,
    ) -> ColorSink {
        let style = match color {
            Color::Style(style) => style.clone(),
            Color::Auto => {
                let label = namespace.as_deref().unwrap_or_default();
                if runtime == Runtime::Browser {
                    style::auto_css(label)
                } else {
                    style::auto_style(label)
                }
            }
        };
        ColorSink::new(runtime, json, style)
    }
}

impl Sink for ColorSink {
    fn emit(&self, record: &LogRecord) {
        // JSON lines are for machines; styling would corrupt them.
        if self.json {
            ConsoleSink::new(self.runtime, true).emit(record);
            return;
        }
        match self.runtime {
            Runtime::Terminal => {
                let line = crate::console_sink::render_text(record, Some(&self.style));
                crate::console_sink::write_line(&line);
            }
            #[cfg(target_arch = "wasm32")]
            Runtime::Browser => {
                crate::console_sink::browser_emit(record, Some(&self.style));
            }
            _ => ConsoleSink::new(self.runtime, self.json).emit(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;

    #[test]
    fn auto_resolves_to_sgr_on_terminal() {
        let sink = ColorSink::for_namespace(
            Runtime::Terminal,
            false,
            &Color::Auto,
            &Namespace::from("worker"),
        );
        assert!(sink.style.starts_with("38;5;"));
    }

    #[test]
    fn explicit_style_passes_through() {
        let sink = ColorSink::for_namespace(
            Runtime::Terminal,
            false,
            &Color::Style("1;31".into()),
            &Namespace::from("worker"),
        );
        assert_eq!(sink.style, "1;31");
    }
}
