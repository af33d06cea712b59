// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! State attached to one debounce cycle.

use core::mem;
use debouncer_core::{
    CancellationToken, DebounceAbortError, DebounceError, DebounceState, Deferred, Promise,
};
use debouncer_runtime::runtime::Runtime;
use debouncer_runtime::TimerTask;
use futures::future::BoxFuture;

/// User callback with the cancellation token as an explicit argument.
pub(crate) type Callback<Args, T, E> =
    dyn Fn(Args, CancellationToken) -> BoxFuture<'static, Result<T, E>> + Send + Sync;

/// Callback bound to its latest arguments and to the record's token.
pub(crate) type Thunk<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

enum Phase<T, E, R: Runtime> {
    Scheduled {
        thunk: Thunk<T, E>,
        timer: Option<TimerTask<R>>,
    },
    Running,
}

/// The single in-flight operation owned by a `Debouncer`.
///
/// The deferred and the signal are created once per record and survive
/// reschedules; only the thunk and the timer are replaced. A record is never
/// reused once the scheduler goes back to idle.
pub(crate) struct OperationRecord<T, E, R: Runtime> {
    id: u64,
    generation: u64,
    phase: Phase<T, E, R>,
    deferred: Deferred<T, DebounceError<E>>,
    signal: CancellationToken,
}

impl<T, E, R: Runtime> OperationRecord<T, E, R> {
    /// New scheduled record. `bind` receives the record's token and returns the thunk.
    pub(crate) fn new(id: u64, bind: impl FnOnce(&CancellationToken) -> Thunk<T, E>) -> Self {
        let signal = CancellationToken::new();
        let thunk = bind(&signal);

        Self {
            id,
            generation: 0,
            phase: Phase::Scheduled { thunk, timer: None },
            deferred: Deferred::new(),
            signal,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub(crate) fn state(&self) -> DebounceState {
        match self.phase {
            Phase::Scheduled { .. } => DebounceState::Scheduled,
            Phase::Running => DebounceState::Running,
        }
    }

    pub(crate) fn signal(&self) -> &CancellationToken {
        &self.signal
    }

    pub(crate) fn promise(&self) -> Promise<T, DebounceError<E>> {
        self.deferred.promise()
    }

    /// Replace the thunk of a scheduled record. No effect once running.
    pub(crate) fn rebind(&mut self, bind: impl FnOnce(&CancellationToken) -> Thunk<T, E>) {
        if let Phase::Scheduled { thunk, .. } = &mut self.phase {
            *thunk = bind(&self.signal);
        }
    }

    /// Bump the timer generation. Timers armed with an older generation are stale.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install the pending timer, dropping (and thereby cancelling) the previous one.
    pub(crate) fn arm(&mut self, task: TimerTask<R>) {
        if let Phase::Scheduled { timer, .. } = &mut self.phase {
            *timer = Some(task);
        }
    }

    /// Move to running: cancel the timer and hand out the thunk.
    ///
    /// Returns `None` if the record was already running.
    pub(crate) fn start(&mut self) -> Option<Thunk<T, E>> {
        match mem::replace(&mut self.phase, Phase::Running) {
            Phase::Scheduled { thunk, timer } => {
                drop(timer);
                Some(thunk)
            }
            Phase::Running => None,
        }
    }

    pub(crate) fn settle(&self, outcome: Result<T, DebounceError<E>>) -> bool {
        self.deferred.settle(outcome)
    }
}

impl<T, E, R: Runtime> Drop for OperationRecord<T, E, R> {
    fn drop(&mut self) {
        let reason = if std::thread::panicking() {
            "callback panicked"
        } else {
            "operation dropped"
        };

        if self
            .deferred
            .reject(DebounceAbortError::with_reason(reason).into())
        {
            warn!(
                "debounce: operation {} discarded before settling ({reason})",
                self.id
            );
        }
    }
}
