// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four-severity console shape and the namespace wrapper.
//!
//! [`Console`] abstracts over anything with the four severity methods: a
//! [`Logger`], the host console, or another wrapper. [`Namespaced`] is a
//! prefix-injecting proxy over any of them — it prepends a bracketed token
//! to the argument list and delegates, re-implementing nothing. Wrapping a
//! wrapped value nests, producing left-to-right token chains. Debug
//! suppression is not the wrapper's business: it is inherited because the
//! wrapped value applies its own effective-config check when the delegated
//! call arrives.

use crate::arg::Arg;
use crate::config::first_arg_string;
use crate::level::Level;
use crate::logger::Logger;
use std::sync::Arc;

/// Anything exposing the four severity methods.
///
/// Each method returns the string coercion of the first *caller-supplied*
/// argument, so the thrown-error pattern survives arbitrary wrapping.
pub trait Console {
    fn debug(&self, args: &[Arg]) -> String;
    fn log(&self, args: &[Arg]) -> String;
    fn warn(&self, args: &[Arg]) -> String;
    fn error(&self, args: &[Arg]) -> String;
}

impl Console for Logger {
    fn debug(&self, args: &[Arg]) -> String {
        Logger::debug(self, args)
    }
    fn log(&self, args: &[Arg]) -> String {
        Logger::log(self, args)
    }
    fn warn(&self, args: &[Arg]) -> String {
        Logger::warn(self, args)
    }
    fn error(&self, args: &[Arg]) -> String {
        Logger::error(self, args)
    }
}

impl<C: Console + ?Sized> Console for &C {
    fn debug(&self, args: &[Arg]) -> String {
        (**self).debug(args)
    }
    fn log(&self, args: &[Arg]) -> String {
        (**self).log(args)
    }
    fn warn(&self, args: &[Arg]) -> String {
        (**self).warn(args)
    }
    fn error(&self, args: &[Arg]) -> String {
        (**self).error(args)
    }
}

impl<C: Console + ?Sized> Console for Arc<C> {
    fn debug(&self, args: &[Arg]) -> String {
        (**self).debug(args)
    }
    fn log(&self, args: &[Arg]) -> String {
        (**self).log(args)
    }
    fn warn(&self, args: &[Arg]) -> String {
        (**self).warn(args)
    }
    fn error(&self, args: &[Arg]) -> String {
        (**self).error(args)
    }
}

/// Wraps a console in a namespace prefix.
///
/// ```
/// use conso::{args, namespaced, Console, Logger};
///
/// let inner = namespaced(Logger::new(None::<&str>), "module");
/// let outer = namespaced(inner, "sub");
/// // output carries "[module] [sub] started"
/// outer.log(&args!["started"]);
/// ```
pub fn namespaced<C: Console>(inner: C, namespace: &str) -> Namespaced<C> {
    Namespaced {
        inner,
        token: format!("[{namespace}]"),
    }
}

/// A prefix-injecting proxy; see [`namespaced`].
#[derive(Debug, Clone)]
pub struct Namespaced<C> {
    inner: C,
    token: String,
}

impl<C: Console> Namespaced<C> {
    /// The wrapped value.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn prefixed(&self, args: &[Arg]) -> Vec<Arg> {
        let mut prefixed = Vec::with_capacity(args.len() + 1);
        prefixed.push(Arg::Str(self.token.clone()));
        prefixed.extend_from_slice(args);
        prefixed
    }
}

impl<C: Console> Console for Namespaced<C> {
    fn debug(&self, args: &[Arg]) -> String {
        let ret = first_arg_string(args);
        self.inner.debug(&self.prefixed(args));
        ret
    }
    fn log(&self, args: &[Arg]) -> String {
        let ret = first_arg_string(args);
        self.inner.log(&self.prefixed(args));
        ret
    }
    fn warn(&self, args: &[Arg]) -> String {
        let ret = first_arg_string(args);
        self.inner.warn(&self.prefixed(args));
        ret
    }
    fn error(&self, args: &[Arg]) -> String {
        let ret = first_arg_string(args);
        self.inner.error(&self.prefixed(args));
        ret
    }
}

/// The process's native console: four severity channels with no
/// configuration pipeline behind them. Useful as the innermost target of a
/// [`Namespaced`] chain when the full logger is unwanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostConsole;

impl HostConsole {
    fn write(&self, level: Level, args: &[Arg]) -> String {
        let ret = first_arg_string(args);
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = level;
            let line = args
                .iter()
                .map(Arg::to_display_string)
                .collect::<Vec<_>>()
                .join(" ");
            crate::console_sink::write_line(&line);
        }
        #[cfg(target_arch = "wasm32")]
        {
            let list = js_sys::Array::new();
            for arg in args {
                list.push(&arg.to_display_string().into());
            }
            match level {
                Level::Debug => web_sys::console::debug(&list),
                Level::Info => web_sys::console::log(&list),
                Level::Warning => web_sys::console::warn(&list),
                Level::Error => web_sys::console::error(&list),
            }
        }
        ret
    }
}

impl Console for HostConsole {
    fn debug(&self, args: &[Arg]) -> String {
        self.write(Level::Debug, args)
    }
    fn log(&self, args: &[Arg]) -> String {
        self.write(Level::Info, args)
    }
    fn warn(&self, args: &[Arg]) -> String {
        self.write(Level::Warning, args)
    }
    fn error(&self, args: &[Arg]) -> String {
        self.write(Level::Error, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::config::InstanceOptions;
    use crate::memory_sink::MemorySink;
    use crate::SharedConfig;

    fn captured_logger() -> (Logger, Arc<MemorySink>) {
        let shared = Arc::new(SharedConfig::new());
        shared.set_runtime(crate::Runtime::Headless);
        let sink = Arc::new(MemorySink::new());
        shared.set_sink(Some(sink.clone()));
        (
            Logger::with_shared(None::<&str>, InstanceOptions::new(), shared),
            sink,
        )
    }

    #[test]
    fn nesting_orders_tokens_outer_to_inner() {
        let (logger, sink) = captured_logger();
        let wrapped = namespaced(namespaced(logger, "module"), "sub");
        let ret = wrapped.error(&args!["x"]);
        assert_eq!(ret, "x", "return value ignores injected prefixes");

        let records = sink.drain();
        assert_eq!(records.len(), 1);
        let rendered: Vec<String> = records[0]
            .args()
            .iter()
            .map(|a| a.to_display_string())
            .collect();
        assert_eq!(rendered, ["[module]", "[sub]", "x"]);
    }

    #[test]
    fn suppression_is_inherited_from_the_wrapped_logger() {
        let shared = Arc::new(SharedConfig::new());
        shared.set_runtime(crate::Runtime::Headless);
        let sink = Arc::new(MemorySink::new());
        shared.set_sink(Some(sink.clone()));
        let logger = Logger::with_shared("ns", InstanceOptions::new().debug(false), shared);

        let wrapped = namespaced(logger, "outer");
        assert_eq!(wrapped.debug(&args!["quiet"]), "quiet");
        assert!(sink.is_empty(), "the wrapped logger's own check applies");
    }
}
