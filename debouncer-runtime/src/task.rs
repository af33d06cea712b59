// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Spawned delay timers with cancel-on-drop.

use crate::runtime::Runtime;
use crate::timer::Timer;
use core::future::Future;
use core::marker::PhantomData;
use core::time::Duration;
use debouncer_core::CancellationToken;
use futures::future::{select, Either};

/// Handle to a spawned task that is cancelled when the handle is dropped.
///
/// The task receives a [`CancellationToken`] and is expected to watch it;
/// dropping or cancelling the handle only signals the token.
///
/// # Example
///
/// ```rust
/// use debouncer_runtime::impls::tokio::TokioRuntime;
/// use debouncer_runtime::TimerTask;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = TimerTask::<TokioRuntime>::after(Duration::from_millis(50), || async {
///     println!("fired");
/// });
///
/// // Dropping the handle before the deadline disarms the timer
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct TimerTask<R: Runtime> {
    cancel: CancellationToken,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: Runtime> TimerTask<R> {
    /// Spawn a background task with cancellation support.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        R::spawn(f(cancel.clone()));

        Self {
            cancel,
            _runtime: PhantomData,
        }
    }

    /// Run `on_fire` once `delay` has elapsed, unless the handle is cancelled
    /// or dropped first.
    ///
    /// The deadline is fixed here, at arm time, not when the spawned task is
    /// first polled.
    pub fn after<F, Fut>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let sleep = R::Timer::default().sleep_future(delay);

        Self::spawn(move |cancel| async move {
            let sleep = Box::pin(sleep);
            let cancelled = Box::pin(cancel.cancelled());

            match select(sleep, cancelled).await {
                Either::Left(((), _)) if !cancel.is_cancelled() => on_fire().await,
                Either::Left(_) | Either::Right(_) => {}
            }
        })
    }

    /// Signal the task to stop. Does not wait for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<R: Runtime> Drop for TimerTask<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
