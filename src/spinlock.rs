// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The shared configuration is read on every log call, including from the wasm
main thread, where blocking is not an option. A spinlock with very short
critical sections keeps that path safe everywhere.

Hold times must stay minimal: callers clone a handful of `Arc`s and `Copy`
flags inside the closure and do all real work outside it.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

pub(crate) struct Spinlock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub(crate) const fn new(value: T) -> Self {
        Spinlock {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Runs `f` with exclusive access to the value.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        while self
            .locked
            .compare_exchange_weak(false, true, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        // SAFETY: the flag grants exclusive access until the store below
        let result = unsafe { f(&mut *self.value.get()) };
        self.locked.store(false, Release);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn exclusive_under_contention() {
        let lock = Arc::new(Spinlock::new(0u64));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let lock = lock.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    lock.with(|v| *v += 1);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lock.with(|v| *v), 4000);
    }
}
