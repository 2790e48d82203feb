// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace wrapper nesting over a real logger.

use conso::{args, namespaced, Console, InstanceOptions, Logger, MemorySink, Namespace, Runtime,
            SharedConfig};
use std::sync::Arc;

fn captured_logger() -> (Logger, Arc<MemorySink>) {
    let shared = Arc::new(SharedConfig::new());
    shared.set_runtime(Runtime::Headless);
    let sink = Arc::new(MemorySink::new());
    shared.set_sink(Some(sink.clone()));
    (
        Logger::with_shared(Namespace::NONE, InstanceOptions::new(), shared),
        sink,
    )
}

#[test]
fn double_wrap_produces_outer_to_inner_tokens() {
    let (logger, sink) = captured_logger();
    let wrapped = namespaced(namespaced(logger, "module"), "sub");

    let ret = wrapped.error(&args!["x"]);
    assert_eq!(ret, "x", "thrown-error pattern keeps the original message");

    let line = sink.drain_text();
    let module_at = line.find("[module]").expect("outer token present");
    let sub_at = line.find("[sub]").expect("inner token present");
    assert!(module_at < sub_at, "outer-to-inner order in: {line}");
    assert!(line.ends_with("[module] [sub] x"), "line: {line}");
}

#[test]
fn wrapper_works_over_all_four_methods() {
    let (logger, sink) = captured_logger();
    let wrapped = namespaced(logger, "w");

    wrapped.debug(&args!["a"]);
    wrapped.log(&args!["b"]);
    wrapped.warn(&args!["c"]);
    wrapped.error(&args!["d"]);

    let records = sink.drain();
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.args()[0].to_display_string(), "[w]");
    }
}

#[test]
fn wrapping_another_wrapper_by_reference() {
    let (logger, sink) = captured_logger();
    let inner = namespaced(logger, "inner");
    // A wrapper over a borrowed console delegates identically.
    let outer = namespaced(&inner, "outer");
    outer.log(&args!["deep"]);

    let line = sink.drain_text();
    assert!(line.ends_with("[inner] [outer] deep"), "line: {line}");
}
