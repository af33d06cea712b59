// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;

/// Records every invocation of a callback.
///
/// Clones share the same log, so a clone can be moved into the callback while
/// the test keeps another for assertions.
///
/// ```rust
/// use debouncer_test_utils::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// let inside = recorder.clone();
///
/// inside.record("a");
/// inside.record("b");
///
/// assert_eq!(recorder.count(), 2);
/// assert_eq!(recorder.last(), Some("b"));
/// ```
#[derive(Debug)]
pub struct CallRecorder<A> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A> CallRecorder<A> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, args: A) {
        self.calls.lock().push(args);
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl<A: Clone> CallRecorder<A> {
    /// All recorded arguments, oldest first.
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<A> {
        self.calls.lock().last().cloned()
    }
}

impl<A> Clone for CallRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<A> Default for CallRecorder<A> {
    fn default() -> Self {
        Self::new()
    }
}
