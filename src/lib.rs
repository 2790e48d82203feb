// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# conso

conso is a namespaced, runtime-adaptive console logger for Rust.

# The problem

Logging output that is pleasant in one environment is noise in another. A
browser tab wants short, styled console entries. A developer at a terminal
wants a colored namespace and a readable line. A server behind a log
shipper wants one JSON object per line and nothing else. Most code wants to
write the log call once and never think about which of those it is in.

conso answers one question per call — what is the final byte sequence, and
which channel receives it — by merging overlapping configuration layers
under a fixed precedence:

| layer              | example                                        |
|--------------------|------------------------------------------------|
| per-instance       | `InstanceOptions::new().debug(false)`          |
| shared record      | `SharedConfig::set_json(true)`                 |
| built-in default   | debug enabled, text mode, detected runtime     |

Higher layers win per individual knob; the merge is recomputed on every
call, so flipping a shared setting is visible immediately on every logger
that references that record.

# The API

```rust
use conso::{args, Logger};

let logger = Logger::new("worker");
logger.log(&args!["job finished", 42]);
let message = logger.error(&args!["job failed"]);
assert_eq!(message, "job failed");
```

Four severity methods map onto four fixed output levels: `debug`→`DEBUG`,
`log`→`INFO`, `warn`→`WARNING`, `error`→`ERROR`. Each returns the string
coercion of its first argument so the logged text can double as an error
message. `debug` is suppressible per instance or process-wide; the other
three always emit.

# Sinks and hooks

Each call invokes exactly one [`Sink`], chosen by fixed precedence: the
shared override, the instance sink, the automatic color sink, the default
console sink. An optional [`Hook`] observes every record before the sink
fires — that is the attachment point for side channels like the
[batch forwarder](forward::BatchForwarder), which buffers records and
flushes them through an async delivery function on a time/count policy.

# Shared state

There is no ambient global lookup. A [`SharedConfig`] is an ordinary
object passed by `Arc` to each logger; [`SharedConfig::global`] is the one
well-known default instance, and tests inject their own fresh record
instead of mutating it.
*/

mod arg;
mod color_sink;
mod config;
mod console_sink;
mod level;
mod log_record;
mod logger;
mod macros;
mod memory_sink;
mod namespace;
mod normalize;
mod runtime;
mod sink;
mod spinlock;
pub mod style;
mod wrap;

#[cfg(not(target_arch = "wasm32"))]
pub mod forward;

pub use arg::{Arg, ToStructured};
pub use config::{Color, Hook, InstanceOptions, MetadataFn, SharedConfig, StackTrace};
pub use color_sink::ColorSink;
pub use console_sink::ConsoleSink;
pub use level::Level;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use memory_sink::MemorySink;
pub use namespace::Namespace;
pub use runtime::Runtime;
pub use sink::{sink_fn, Sink};
pub use style::styled;
pub use wrap::{namespaced, Console, HostConsole, Namespaced};
