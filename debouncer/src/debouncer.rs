// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The debounce scheduler.
//!
//! A [`Debouncer`] owns at most one operation at a time and is always in one
//! of three states:
//!
//! | state | meaning |
//! |---|---|
//! | `idle` | nothing pending |
//! | `scheduled` | a timer is pending; the callback has not started |
//! | `running` | the callback is executing |
//!
//! Every entry point takes the record lock for its synchronous steps only, so
//! timer firings and caller operations never interleave mid-transition. The
//! lock is never held while user code runs.

use crate::record::{Callback, OperationRecord, Thunk};
use crate::DefaultRuntime;
use core::fmt;
use core::future::Future;
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use debouncer_core::{
    resolve_abort_error, AbortAction, AbortOptions, CancelAction, CancellationToken,
    DebounceAbortError, DebounceError, DebounceResult, DebounceState, FlushResult, Promise,
    ReadyAction,
};
use debouncer_runtime::mutex::MutexLike;
use debouncer_runtime::runtime::Runtime;
use debouncer_runtime::TimerTask;
use futures::FutureExt;
use std::sync::Arc;

/// Coalesces repeated requests into at most one pending execution of a callback.
///
/// Each call to [`exec`](Self::exec) or [`exec_unsafe`](Self::exec_unsafe)
/// made before the delay elapses resets the delay and rebinds the callback to
/// the newest arguments. Every caller of the same cycle observes the same
/// outcome.
///
/// The callback receives the arguments of the last call and a
/// [`CancellationToken`] that [`abort`](Self::abort) triggers while it runs.
/// Honouring the token is up to the callback.
///
/// Cloning a `Debouncer` yields another handle to the same scheduler.
///
/// # Example
///
/// ```
/// use debouncer::{Debouncer, DebounceResult};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let search = Debouncer::new(
///     |query: String, _token| async move { Ok::<_, String>(format!("results for {query}")) },
///     Duration::from_millis(50),
/// );
///
/// let first = search.exec("r".to_string());
/// let last = search.exec("rust".to_string());
///
/// // Both callers observe the single execution with the last arguments
/// assert_eq!(first.await, DebounceResult::Ok("results for rust".to_string()));
/// assert_eq!(last.await, DebounceResult::Ok("results for rust".to_string()));
/// # }
/// ```
///
/// # Panics
///
/// Scheduling spawns the delay timer on the runtime `R`; with Tokio this
/// panics outside of a Tokio runtime context.
pub struct Debouncer<Args, T: Send, E: Send, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<Args, T, E, R>>,
}

struct Shared<Args, T: Send, E: Send, R: Runtime> {
    callback: Arc<Callback<Args, T, E>>,
    delay: Duration,
    slot: R::Mutex<Option<OperationRecord<T, E, R>>>,
    next_id: AtomicU64,
}

impl<Args, T, E> Debouncer<Args, T, E, DefaultRuntime>
where
    Args: Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Debounce an async `callback` by `delay` on the default runtime.
    pub fn new<F, Fut>(callback: F, delay: Duration) -> Self
    where
        F: Fn(Args, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::with_runtime(callback, delay)
    }

    /// Debounce a synchronous `callback` by `delay` on the default runtime.
    ///
    /// The callback runs when the operation starts, on the task that starts
    /// it. Since it cannot yield, an `abort` can only be observed by callbacks
    /// that check the token themselves.
    pub fn from_fn<F>(callback: F, delay: Duration) -> Self
    where
        F: Fn(Args, &CancellationToken) -> Result<T, E> + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        Self::with_runtime(
            move |args, token: CancellationToken| {
                let callback = callback.clone();
                async move { callback(args, &token) }
            },
            delay,
        )
    }
}

impl<Args, T, E, R> Debouncer<Args, T, E, R>
where
    Args: Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    R: Runtime,
{
    /// Debounce an async `callback` by `delay` on the runtime `R`.
    pub fn with_runtime<F, Fut>(callback: F, delay: Duration) -> Self
    where
        F: Fn(Args, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let callback: Arc<Callback<Args, T, E>> =
            Arc::new(move |args: Args, token: CancellationToken| callback(args, token).boxed());

        Self {
            shared: Arc::new(Shared {
                callback,
                delay,
                slot: MutexLike::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.shared.delay
    }

    /// Schedule the callback with `args`, returning a promise of its outcome.
    ///
    /// - `idle`: a new operation is scheduled after the delay
    /// - `scheduled`: the delay restarts and the callback is rebound to `args`;
    ///   the same promise is returned, so earlier callers are not orphaned
    /// - `running`: nothing is scheduled; the in-flight promise is returned
    ///
    /// Scheduling happens when this method is called, not when the promise is
    /// first polled.
    ///
    /// # Errors
    ///
    /// The promise resolves to `DebounceError::Callback` with whatever the
    /// callback failed with, or `DebounceError::Aborted` if the operation was
    /// cancelled before it ran. Prefer [`exec`](Self::exec) to receive a
    /// tagged result instead.
    pub fn exec_unsafe(&self, args: Args) -> Promise<T, DebounceError<E>> {
        let mut slot = self.shared.slot.lock();

        match slot.as_mut() {
            Some(record) if record.is_running() => {
                debug!(
                    "debounce: operation {} is running; request ignored",
                    record.id()
                );
                record.promise()
            }
            Some(record) => {
                record.rebind(|signal| self.shared.bind(args, signal));
                self.arm(record);
                debug!(
                    "debounce: operation {} rescheduled in {:?}",
                    record.id(),
                    self.shared.delay
                );
                record.promise()
            }
            None => {
                let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
                let record = slot.insert(OperationRecord::new(id, |signal| {
                    self.shared.bind(args, signal)
                }));
                self.arm(record);
                debug!(
                    "debounce: operation {id} scheduled in {:?}",
                    self.shared.delay
                );
                record.promise()
            }
        }
    }

    /// Schedule the callback with `args`, resolving to a tagged result.
    ///
    /// Same scheduling behavior as [`exec_unsafe`](Self::exec_unsafe). The
    /// returned future never fails: a cancelled operation, or a callback
    /// error that is (or type-erases) a [`DebounceAbortError`], resolves to
    /// [`DebounceResult::Abort`].
    pub fn exec(&self, args: Args) -> impl Future<Output = DebounceResult<T, E>> + Send + 'static {
        let promise = self.exec_unsafe(args);

        async move {
            match promise.await {
                Ok(value) => DebounceResult::Ok(value),
                Err(DebounceError::Aborted(abort)) => DebounceResult::Abort(abort),
                Err(DebounceError::Callback(error)) => match resolve_abort_error(error) {
                    Ok(abort) => DebounceResult::Abort(abort),
                    Err(error) => DebounceResult::Error(error),
                },
            }
        }
    }

    /// Complete a scheduled operation with `value` without running the callback.
    ///
    /// Returns `noop` when idle and `running` when the callback is already
    /// executing (it cannot be preempted).
    pub fn ready(&self, value: T) -> ReadyAction {
        let record = {
            let mut slot = self.shared.slot.lock();
            match slot.as_ref() {
                None => return ReadyAction::Noop,
                Some(record) if record.is_running() => return ReadyAction::Running,
                Some(_) => slot.take(),
            }
        };

        if let Some(record) = record {
            record.settle(Ok(value));
            debug!("debounce: operation {} resolved early", record.id());
        }

        ReadyAction::Resolved
    }

    /// Complete any pending operation now instead of waiting out the delay.
    ///
    /// - `idle`: resolves to [`FlushResult::None`]
    /// - `scheduled`: the timer is cancelled and the callback starts right
    ///   away on its own task (the state is `running` as soon as this method
    ///   returns)
    /// - `running`: the in-flight operation is awaited, not restarted
    ///
    /// Flushing never cancels anything, so it never reports an abort. A
    /// running callback that observes an `abort` and fails is reported as
    /// [`FlushResult::Error`].
    ///
    /// The flushed callback does not depend on the returned future: dropping
    /// it (on a timeout, say) leaves the operation running and its other
    /// waiters unaffected.
    pub fn flush(&self) -> impl Future<Output = FlushResult<T, E>> + Send + 'static {
        let pending = {
            let mut slot = self.shared.slot.lock();
            slot.as_mut()
                .map(|record| (record.id(), record.start(), record.promise()))
        };

        let pending = pending.map(|(id, thunk, promise)| {
            if let Some(thunk) = thunk {
                debug!("debounce: operation {id} flushed");
                self.shared.spawn_run(id, thunk);
            }
            (id, promise)
        });

        async move {
            let Some((id, promise)) = pending else {
                return FlushResult::None;
            };

            match promise.await {
                Ok(value) => FlushResult::Ok(value),
                Err(DebounceError::Callback(error)) => FlushResult::Error(error),
                Err(DebounceError::Aborted(abort)) => {
                    warn!(
                        "debounce: flushed operation {id} was discarded: {:?}",
                        abort.reason()
                    );
                    FlushResult::None
                }
            }
        }
    }

    /// Cancel a scheduled operation; its waiters observe a [`DebounceAbortError`]
    /// carrying `reason` and `options`.
    ///
    /// Returns `noop` when idle and `running` when the callback already
    /// started (use [`abort`](Self::abort) for in-flight work).
    pub fn cancel(&self, reason: Option<String>, options: AbortOptions) -> CancelAction {
        match self.cancel_scheduled(reason, options) {
            Cancelled::Idle => CancelAction::Noop,
            Cancelled::Running(_) => CancelAction::Running,
            Cancelled::Scheduled => CancelAction::Canceled,
        }
    }

    /// Cancel a scheduled operation like [`cancel`](Self::cancel), or request
    /// cooperative cancellation of a running one.
    ///
    /// For a running callback only its [`CancellationToken`] is triggered
    /// (with `reason`); the callback is never interrupted and still settles
    /// the operation itself.
    pub fn abort(&self, reason: Option<String>, options: AbortOptions) -> AbortAction {
        match self.cancel_scheduled(reason.clone(), options) {
            Cancelled::Idle => AbortAction::Noop,
            Cancelled::Scheduled => AbortAction::Canceled,
            Cancelled::Running(signal) => {
                match reason {
                    Some(reason) => signal.cancel_with_reason(reason),
                    None => signal.cancel(),
                }
                debug!("debounce: running operation signalled to abort");
                AbortAction::Aborted
            }
        }
    }

    pub fn state(&self) -> DebounceState {
        self.shared
            .slot
            .lock()
            .as_ref()
            .map_or(DebounceState::Idle, OperationRecord::state)
    }

    pub fn is_running(&self) -> bool {
        self.state() == DebounceState::Running
    }

    fn cancel_scheduled(&self, reason: Option<String>, options: AbortOptions) -> Cancelled {
        let record = {
            let mut slot = self.shared.slot.lock();
            match slot.as_ref() {
                None => return Cancelled::Idle,
                Some(record) if record.is_running() => {
                    return Cancelled::Running(record.signal().clone())
                }
                Some(_) => slot.take(),
            }
        };

        if let Some(record) = record {
            record.settle(Err(DebounceError::Aborted(
                DebounceAbortError::from_parts(reason, options),
            )));
            debug!("debounce: operation {} canceled", record.id());
        }

        Cancelled::Scheduled
    }

    /// Start (or restart) the delay timer of a scheduled record.
    fn arm(&self, record: &mut OperationRecord<T, E, R>) {
        let id = record.id();
        let generation = record.next_generation();
        let shared = self.shared.clone();

        record.arm(TimerTask::after(self.shared.delay, move || {
            Shared::fire(shared, id, generation)
        }));
    }
}

impl<Args, T, E, R> Shared<Args, T, E, R>
where
    Args: Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    R: Runtime,
{
    fn bind(&self, args: Args, signal: &CancellationToken) -> Thunk<T, E> {
        let callback = self.callback.clone();
        let signal = signal.clone();
        Box::new(move || callback(args, signal))
    }

    async fn fire(shared: Arc<Self>, id: u64, generation: u64) {
        let thunk = {
            let mut slot = shared.slot.lock();
            match slot.as_mut() {
                Some(record) if record.id() == id && record.generation() == generation => {
                    record.start()
                }
                _ => None,
            }
        };

        match thunk {
            Some(thunk) => {
                debug!("debounce: operation {id} fired");
                let _ = RunGuard::new(shared, id).run(thunk).await;
            }
            None => warn!("debounce: stale timer {generation} for operation {id} ignored"),
        }
    }

    /// Run a started operation on its own task, detached from any caller.
    fn spawn_run(self: &Arc<Self>, id: u64, thunk: Thunk<T, E>) {
        let guard = RunGuard::new(self.clone(), id);
        R::spawn(async move {
            let _ = guard.run(thunk).await;
        });
    }

    /// Remove the record `id` if it is still the current one.
    fn discard(&self, id: u64) -> Option<OperationRecord<T, E, R>> {
        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(|record| record.id() == id) {
            slot.take()
        } else {
            None
        }
    }
}

enum Cancelled {
    Idle,
    Scheduled,
    Running(CancellationToken),
}

/// Discards the running record if its thunk never settles (panic or drop).
struct RunGuard<Args, T: Send, E: Send, R: Runtime> {
    shared: Arc<Shared<Args, T, E, R>>,
    id: u64,
    armed: bool,
}

impl<Args, T, E, R> RunGuard<Args, T, E, R>
where
    Args: Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    R: Runtime,
{
    fn new(shared: Arc<Shared<Args, T, E, R>>, id: u64) -> Self {
        Self {
            shared,
            id,
            armed: true,
        }
    }

    /// Run the thunk, then settle and discard the record it belongs to.
    async fn run(mut self, thunk: Thunk<T, E>) -> Result<T, E> {
        let outcome = thunk().await;

        self.armed = false;
        match self.shared.discard(self.id) {
            Some(record) => {
                record.settle(outcome.clone().map_err(DebounceError::Callback));
                debug!("debounce: operation {} settled", self.id);
            }
            None => warn!("debounce: operation {} settled after discard", self.id),
        }

        outcome
    }
}

impl<Args, T: Send, E: Send, R: Runtime> Drop for RunGuard<Args, T, E, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut slot = self.shared.slot.lock();
        let record = if slot.as_ref().is_some_and(|record| record.id() == self.id) {
            slot.take()
        } else {
            None
        };
        drop(slot);

        // The record's own drop rejects its waiters
        drop(record);
    }
}

impl<Args, T: Send, E: Send, R: Runtime> Clone for Debouncer<Args, T, E, R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<Args, T: Send, E: Send, R: Runtime> fmt::Debug for Debouncer<Args, T, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .shared
            .slot
            .lock()
            .as_ref()
            .map_or(DebounceState::Idle, OperationRecord::state);

        f.debug_struct("Debouncer")
            .field("delay", &self.shared.delay)
            .field("state", &state)
            .finish()
    }
}
