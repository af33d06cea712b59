// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot deferred result.
//!
//! A [`Deferred`] separates "the thing to await" ([`Promise`]) from "the
//! trigger that settles it" ([`Deferred::resolve`] / [`Deferred::reject`]).
//! Any number of promises can observe the same deferred; all of them see the
//! first settlement and ignore later ones.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::Arc;

/// Producer side of a one-shot result.
///
/// # Example
///
/// ```
/// use debouncer_core::Deferred;
///
/// # async fn example() {
/// let deferred = Deferred::<&str, ()>::new();
/// let promise = deferred.promise();
///
/// assert!(deferred.resolve("ok"));
/// assert!(!deferred.reject(()));
///
/// assert_eq!(promise.await, Ok("ok"));
/// # }
/// ```
pub struct Deferred<T, E> {
    inner: Arc<Inner<T, E>>,
}

struct Inner<T, E> {
    outcome: Mutex<Option<Result<T, E>>>,
    event: Event,
}

impl<T, E> Deferred<T, E> {
    /// Create an unsettled deferred.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                outcome: Mutex::new(None),
                event: Event::new(),
            }),
        }
    }

    /// A future observing this deferred's settlement.
    pub fn promise(&self) -> Promise<T, E> {
        Promise {
            inner: self.inner.clone(),
            listener: None,
        }
    }

    /// Fulfil with `value`. Returns `false` if already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Reject with `error`. Returns `false` if already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Settle with `outcome`. Only the first settlement has effect.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        {
            let mut slot = self.inner.outcome.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
        }

        self.inner.event.notify(usize::MAX);
        true
    }

    pub fn is_settled(&self) -> bool {
        self.inner.outcome.lock().is_some()
    }
}

impl<T, E> Default for Deferred<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Consumer side of a [`Deferred`].
///
/// Awaiting a promise does not consume the settled value, so clones and late
/// subscribers all observe the same outcome.
pub struct Promise<T, E> {
    inner: Arc<Inner<T, E>>,
    listener: Option<EventListener>,
}

impl<T, E> Promise<T, E> {
    /// Whether the backing deferred has been settled.
    pub fn is_settled(&self) -> bool {
        self.inner.outcome.lock().is_some()
    }

    /// Non-blocking read of the settled outcome.
    pub fn try_get(&self) -> Option<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.outcome.lock().clone()
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            listener: None,
        }
    }
}

impl<T, E> fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T, E> Future for Promise<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            if let Some(outcome) = self.try_get() {
                self.listener = None;
                return Poll::Ready(outcome);
            }

            match self.listener.as_mut() {
                None => {
                    self.listener = Some(self.inner.event.listen());
                }
                Some(listener) => match Pin::new(listener).poll(cx) {
                    Poll::Ready(()) => {
                        self.listener = None;
                    }
                    Poll::Pending => return Poll::Pending,
                },
            }
        }
    }
}
