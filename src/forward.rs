// SPDX-License-Identifier: MIT OR Apache-2.0

//! The batch forwarder.
//!
//! Accumulates log records and flushes them through a user-supplied async
//! delivery function on a time and/or count policy. The buffering,
//! threshold and interval mechanics all ride on tokio primitives
//! (`Notify`, `watch`, the timer); this module's own logic is the overflow
//! cap, the requeue-on-failure rule, and the adapter that turns the logger
//! hook into a batch add without feeding the forwarder its own output.
//!
//! The forwarder is the only asynchronous surface of the crate: log calls
//! themselves never await anything. Cancellation exists as [`stop`]
//! (interval timer) and [`drain`] (flush-then-stop, idempotent); nothing
//! here models timeouts.
//!
//! [`stop`]: BatchForwarder::stop
//! [`drain`]: BatchForwarder::drain

use crate::config::Hook;
use crate::log_record::LogRecord;
use serde::Serialize;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{watch, Notify};

type FlushFn =
    Arc<dyn Fn(Vec<LogRecord>) -> Pin<Box<dyn Future<Output = bool> + Send>> + Send + Sync>;

/// Flush policy. `flush_interval` and `flush_at` may be combined; whichever
/// fires first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwarderOptions {
    /// Time-based flush period for the interval task; `None` disables it.
    pub flush_interval: Option<Duration>,
    /// Count threshold that wakes the interval task early; `None` disables it.
    pub flush_at: Option<usize>,
    /// Hard cap on buffered records. Once exceeded, the oldest records are
    /// discarded silently; overflow does not itself trigger a flush.
    pub max_buffered: usize,
}

impl Default for ForwarderOptions {
    fn default() -> Self {
        ForwarderOptions {
            flush_interval: Some(Duration::from_secs(5)),
            flush_at: Some(32),
            max_buffered: 1024,
        }
    }
}

/// Snapshot published to subscribers on every observable change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ForwarderState {
    /// Records currently buffered.
    pub buffered: usize,
    /// Records delivered successfully since construction.
    pub flushed: u64,
    /// Whether the interval task is running.
    pub running: bool,
}

struct Inner {
    buffer: Mutex<VecDeque<LogRecord>>,
    options: Mutex<ForwarderOptions>,
    flush: FlushFn,
    state_tx: watch::Sender<ForwarderState>,
    kick: Notify,
    running: AtomicBool,
    in_flush: AtomicBool,
    flushed: AtomicU64,
}

impl Inner {
    fn publish(&self) {
        let state = ForwarderState {
            buffered: self.buffer.lock().unwrap().len(),
            flushed: self.flushed.load(Ordering::Relaxed),
            running: self.running.load(Ordering::Relaxed),
        };
        self.state_tx.send_replace(state);
    }

    fn push(&self, record: LogRecord) {
        let at_threshold = {
            let mut buffer = self.buffer.lock().unwrap();
            let options = *self.options.lock().unwrap();
            buffer.push_back(record);
            while buffer.len() > options.max_buffered {
                // Oldest first, silently; overflow never triggers a flush.
                buffer.pop_front();
            }
            options.flush_at.is_some_and(|n| buffer.len() >= n)
        };
        if at_threshold {
            self.kick.notify_one();
        }
        self.publish();
    }

    async fn flush_once(&self) -> bool {
        let batch: Vec<LogRecord> = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.drain(..).collect()
        };
        if batch.is_empty() {
            return true;
        }
        // Records produced while the delivery function runs must not feed
        // back into the buffer through the hook adapter.
        self.in_flush.store(true, Ordering::SeqCst);
        let ok = (self.flush)(batch.clone()).await;
        self.in_flush.store(false, Ordering::SeqCst);
        if ok {
            self.flushed
                .fetch_add(batch.len() as u64, Ordering::Relaxed);
        } else {
            // Failed delivery: requeue at the front in original order, then
            // re-apply the cap.
            let mut buffer = self.buffer.lock().unwrap();
            for record in batch.into_iter().rev() {
                buffer.push_front(record);
            }
            let max = self.options.lock().unwrap().max_buffered;
            while buffer.len() > max {
                buffer.pop_front();
            }
        }
        self.publish();
        ok
    }

    fn threshold_reached(&self) -> bool {
        let buffered = self.buffer.lock().unwrap().len();
        self.options
            .lock()
            .unwrap()
            .flush_at
            .is_some_and(|n| buffered >= n)
    }
}

/// Handle over a running (or stopped) batch pipeline.
///
/// ```no_run
/// use conso::forward::{BatchForwarder, ForwarderOptions};
/// use conso::{args, Logger, SharedConfig};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let forwarder = Arc::new(BatchForwarder::new(
///     |batch| async move {
///         // deliver the batch somewhere; true on success
///         !batch.is_empty()
///     },
///     ForwarderOptions::default(),
/// ));
/// forwarder.start();
///
/// let shared = Arc::new(SharedConfig::new());
/// shared.set_hook(Some(forwarder.hook()));
/// let logger = Logger::with_shared("api", Default::default(), shared);
/// logger.log(&args!["observed and buffered"]);
///
/// forwarder.drain().await;
/// # }
/// ```
pub struct BatchForwarder {
    inner: Arc<Inner>,
    task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl BatchForwarder {
    /// Builds a forwarder over an async delivery function. The function
    /// receives each batch oldest-first and reports success.
    pub fn new<F, Fut>(flush: F, options: ForwarderOptions) -> BatchForwarder
    where
        F: Fn(Vec<LogRecord>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let flush: FlushFn = Arc::new(move |batch| Box::pin(flush(batch)));
        let (state_tx, _) = watch::channel(ForwarderState::default());
        BatchForwarder {
            inner: Arc::new(Inner {
                buffer: Mutex::new(VecDeque::new()),
                options: Mutex::new(options),
                flush,
                state_tx,
                kick: Notify::new(),
                running: AtomicBool::new(false),
                in_flush: AtomicBool::new(false),
                flushed: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    /// Buffers one record, applying the overflow cap.
    pub fn push(&self, record: LogRecord) {
        self.inner.push(record);
    }

    /// Flushes the current buffer immediately. Returns the delivery result;
    /// an empty buffer is a trivial success. On failure the batch is
    /// requeued at the front, subject to the cap.
    pub async fn flush_now(&self) -> bool {
        self.inner.flush_once().await
    }

    /// Starts the interval task. No-op if already running. Must be called
    /// from within a tokio runtime.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        self.inner.running.store(true, Ordering::SeqCst);
        let inner = self.inner.clone();
        *task = Some(tokio::spawn(async move {
            loop {
                let interval = inner.options.lock().unwrap().flush_interval;
                let should_flush = tokio::select! {
                    _ = inner.kick.notified() => inner.threshold_reached(),
                    _ = async {
                        match interval {
                            Some(period) => tokio::time::sleep(period).await,
                            None => std::future::pending::<()>().await,
                        }
                    } => true,
                };
                if should_flush {
                    inner.flush_once().await;
                }
            }
        }));
        drop(task);
        self.inner.publish();
    }

    /// Stops the interval task. Buffered records stay buffered.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
        self.inner.running.store(false, Ordering::SeqCst);
        self.inner.publish();
    }

    /// Flush, then stop. Idempotent: draining a drained forwarder is a
    /// trivial success.
    pub async fn drain(&self) -> bool {
        let ok = self.flush_now().await;
        self.stop();
        ok
    }

    /// Discards the buffer without flushing.
    pub fn clear(&self) {
        self.inner.buffer.lock().unwrap().clear();
        self.inner.publish();
    }

    /// A copy of the current buffer, oldest first.
    pub fn dump(&self) -> Vec<LogRecord> {
        self.inner.buffer.lock().unwrap().iter().cloned().collect()
    }

    /// Replaces the flush policy. The interval task picks up a new period
    /// on its next wakeup; the cap applies on the next push.
    pub fn reconfigure(&self, options: ForwarderOptions) {
        *self.inner.options.lock().unwrap() = options;
        self.inner.publish();
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ForwarderState> {
        self.inner.state_tx.subscribe()
    }

    /// Adapts this forwarder to the logger hook signature.
    ///
    /// The returned hook buffers a copy of every record it observes, except
    /// while a flush is in progress: anything logged by the delivery path
    /// itself is dropped rather than recursively re-buffered.
    pub fn hook(&self) -> Hook {
        let inner = self.inner.clone();
        Arc::new(move |record: &LogRecord| {
            if inner.in_flush.load(Ordering::SeqCst) {
                return;
            }
            inner.push(record.clone());
        })
    }
}

impl std::fmt::Debug for BatchForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchForwarder")
            .field("state", &*self.inner.state_tx.borrow())
            .finish()
    }
}

impl Drop for BatchForwarder {
    fn drop(&mut self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
    }
}
