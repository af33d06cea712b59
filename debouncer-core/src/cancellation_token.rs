// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative cancellation signal handed to debounced callbacks.
//!
//! A running callback receives a [`CancellationToken`] as an ordinary argument.
//! Cancellation never interrupts the callback: it only flips a flag and wakes
//! anyone waiting on [`CancellationToken::cancelled`]. The callback decides
//! when (and whether) to stop.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::Arc;

/// Broadcastable one-shot cancellation signal.
///
/// Cloning a `CancellationToken` yields another handle to the same state. The
/// first cancel request on any clone wins; its reason (if any) is the one
/// reported by [`reason`](Self::reason).
///
/// # Example
///
/// ```
/// use debouncer_core::CancellationToken;
///
/// # async fn example() {
/// let token = CancellationToken::new();
/// let token_clone = token.clone();
///
/// tokio::spawn(async move {
///     token_clone.cancelled().await;
///     println!("Cancelled: {:?}", token_clone.reason());
/// });
///
/// token.cancel_with_reason("user request");
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    reason: Mutex<Option<String>>,
    event: Event,
}

impl CancellationToken {
    /// Create a new cancellation token.
    ///
    /// The token is initially not cancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                reason: Mutex::new(None),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token without a reason, waking all listeners.
    ///
    /// Calling it on an already cancelled token is a no-op.
    pub fn cancel(&self) {
        self.request(None);
    }

    /// Cancel the token with a reason, waking all listeners.
    ///
    /// Only the first cancel request records its reason.
    ///
    /// ```
    /// use debouncer_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// token.cancel_with_reason("first");
    /// token.cancel_with_reason("second");
    ///
    /// assert_eq!(token.reason().as_deref(), Some("first"));
    /// ```
    pub fn cancel_with_reason(&self, reason: impl Into<String>) {
        self.request(Some(reason.into()));
    }

    fn request(&self, reason: Option<String>) {
        {
            let mut slot = self.inner.reason.lock();
            if self.inner.cancelled.load(Ordering::Acquire) {
                return;
            }
            *slot = reason;
            // Release so the reason is visible to anyone observing the flag
            self.inner.cancelled.store(true, Ordering::Release);
        }

        self.inner.event.notify(usize::MAX);
    }

    /// Check if the token has been cancelled (non-blocking).
    ///
    /// # Example
    ///
    /// ```
    /// use debouncer_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Reason recorded by the first cancel request, if one was given.
    pub fn reason(&self) -> Option<String> {
        self.inner.reason.lock().clone()
    }

    /// Wait asynchronously until the token is cancelled.
    ///
    /// If the token is already cancelled, this returns immediately.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                None => {
                    // Re-checked at the top of the loop: cancel() may have run
                    // between the first check and listen()
                    self.listener = Some(self.token.inner.event.listen());
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
