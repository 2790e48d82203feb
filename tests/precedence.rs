// SPDX-License-Identifier: MIT OR Apache-2.0

//! Precedence resolution across the configuration layers, observed from
//! outside: debug suppression, sink selection, hook ordering.

use conso::{args, InstanceOptions, Logger, MemorySink, Runtime, SharedConfig};
use std::sync::{Arc, Mutex};

fn shared_with_sink() -> (Arc<SharedConfig>, Arc<MemorySink>) {
    let shared = Arc::new(SharedConfig::new());
    shared.set_runtime(Runtime::Headless);
    let sink = Arc::new(MemorySink::new());
    shared.set_sink(Some(sink.clone()));
    (shared, sink)
}

#[test]
fn instance_debug_true_overrides_shared_false() {
    let (shared, sink) = shared_with_sink();
    shared.set_debug(Some(false));
    let logger = Logger::with_shared("d", InstanceOptions::new().debug(true), shared);
    logger.debug(&args!["visible"]);
    assert_eq!(sink.len(), 1);
}

#[test]
fn instance_debug_false_overrides_shared_true() {
    let (shared, sink) = shared_with_sink();
    shared.set_debug(Some(true));
    let logger = Logger::with_shared("d", InstanceOptions::new().debug(false), shared);
    assert_eq!(logger.debug(&args!["hidden"]), "hidden");
    assert!(sink.is_empty());
}

#[test]
fn debug_defaults_to_enabled() {
    let (shared, sink) = shared_with_sink();
    let logger = Logger::with_shared("d", InstanceOptions::new(), shared);
    logger.debug(&args!["default"]);
    assert_eq!(sink.len(), 1);
}

#[test]
fn shared_sink_outranks_instance_sink_every_call() {
    let shared = Arc::new(SharedConfig::new());
    shared.set_runtime(Runtime::Headless);
    let override_sink = Arc::new(MemorySink::new());
    let instance_sink = Arc::new(MemorySink::new());
    shared.set_sink(Some(override_sink.clone()));
    let logger = Logger::with_shared(
        "s",
        InstanceOptions::new().sink(instance_sink.clone()),
        shared.clone(),
    );

    for _ in 0..3 {
        logger.log(&args!["x"]);
        logger.error(&args!["y"]);
    }
    assert_eq!(override_sink.len(), 6);
    assert!(instance_sink.is_empty());

    // Clearing the override hands the calls to the instance sink.
    shared.set_sink(None);
    logger.log(&args!["z"]);
    assert_eq!(instance_sink.len(), 1);
}

#[test]
fn hook_commits_before_sink_every_call() {
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let shared = Arc::new(SharedConfig::new());
    shared.set_runtime(Runtime::Headless);
    let hook_order = order.clone();
    shared.set_hook(Some(Arc::new(move |_| {
        hook_order.lock().unwrap().push("hook");
    })));
    let sink_order = order.clone();
    shared.set_sink(Some(conso::sink_fn(move |_| {
        sink_order.lock().unwrap().push("sink");
    })));

    let logger = Logger::with_shared("h", InstanceOptions::new(), shared);
    logger.log(&args!["1"]);
    logger.warn(&args!["2"]);
    logger.error(&args!["3"]);

    assert_eq!(
        *order.lock().unwrap(),
        ["hook", "sink", "hook", "sink", "hook", "sink"]
    );
}

#[test]
fn hook_fires_even_for_instance_sink_calls() {
    let hits = Arc::new(Mutex::new(0usize));
    let shared = Arc::new(SharedConfig::new());
    shared.set_runtime(Runtime::Headless);
    let hook_hits = hits.clone();
    shared.set_hook(Some(Arc::new(move |_| {
        *hook_hits.lock().unwrap() += 1;
    })));
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_shared("h", InstanceOptions::new().sink(sink.clone()), shared);

    logger.log(&args!["x"]);
    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn metadata_getter_attaches_to_every_record() {
    let (shared, sink) = shared_with_sink();
    shared.set_metadata(Some(Arc::new(|| {
        let mut map = serde_json::Map::new();
        map.insert("request_id".into(), serde_json::json!("r-1"));
        map
    })));
    let logger = Logger::with_shared("m", InstanceOptions::new(), shared);
    logger.log(&args!["x"]);

    let records = sink.drain();
    let metadata = records[0].metadata().expect("metadata attached");
    assert_eq!(metadata["request_id"], serde_json::json!("r-1"));
}
