// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tests for the cooperative cancellation token handed to debounced callbacks.

use debouncer_core::CancellationToken;
use futures::FutureExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
    assert_eq!(token.reason(), None);
}

#[test]
fn test_cancel_sets_flag() {
    let token = CancellationToken::new();
    token.cancel();
    assert!(token.is_cancelled());
    assert_eq!(token.reason(), None);
}

#[test]
fn test_cancel_with_reason_records_reason() {
    let token = CancellationToken::new();
    token.cancel_with_reason("user request");
    assert!(token.is_cancelled());
    assert_eq!(token.reason().as_deref(), Some("user request"));
}

#[test]
fn test_first_cancel_wins() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel_with_reason("too late");

    assert!(token.is_cancelled());
    assert_eq!(token.reason(), None);
}

#[test]
fn test_clone_shares_state() {
    let token1 = CancellationToken::new();
    let token2 = token1.clone();

    token2.cancel_with_reason("shared");

    assert!(token1.is_cancelled());
    assert_eq!(token1.reason().as_deref(), Some("shared"));
}

#[test]
fn test_cancelled_is_pending_until_cancel() {
    let token = CancellationToken::new();
    let mut cancelled = Box::pin(token.cancelled());

    assert!(cancelled.as_mut().now_or_never().is_none());

    token.cancel();
    assert!(cancelled.now_or_never().is_some());
}

// ============================================================================
// Async Tests
// ============================================================================

#[tokio::test]
async fn test_cancelled_resolves_immediately_if_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    token.cancelled().await;
}

#[tokio::test]
async fn test_cancelled_waits_until_cancel() {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    let handle = tokio::spawn(async move {
        token_clone.cancelled().await;
        token_clone.reason()
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!handle.is_finished());

    token.cancel_with_reason("stop");

    let reason = tokio::time::timeout(Duration::from_millis(100), handle)
        .await
        .expect("waiter should wake")
        .expect("task should not panic");
    assert_eq!(reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_cancel_wakes_all_waiters() {
    let token = CancellationToken::new();
    let woken = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let token = token.clone();
            let woken = woken.clone();
            tokio::spawn(async move {
                token.cancelled().await;
                woken.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();

    for handle in handles {
        tokio::time::timeout(Duration::from_millis(100), handle)
            .await
            .expect("waiter should wake")
            .expect("task should not panic");
    }

    assert_eq!(woken.load(Ordering::SeqCst), 5);
}
