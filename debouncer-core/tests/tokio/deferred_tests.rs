// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use debouncer_core::Deferred;
use futures::FutureExt;
use std::time::Duration;

#[tokio::test]
async fn test_resolve_fulfils_promise() {
    let deferred = Deferred::<String, String>::new();
    let promise = deferred.promise();

    assert!(deferred.resolve("ok".to_string()));

    assert_eq!(promise.await, Ok("ok".to_string()));
}

#[tokio::test]
async fn test_reject_fails_promise() {
    let deferred = Deferred::<String, String>::new();
    let promise = deferred.promise();

    assert!(deferred.reject("err".to_string()));

    assert_eq!(promise.await, Err("err".to_string()));
}

#[test]
fn test_only_first_settlement_has_effect() {
    let deferred = Deferred::<i32, &str>::new();

    assert!(deferred.resolve(1));
    assert!(!deferred.resolve(2));
    assert!(!deferred.reject("late"));

    assert!(deferred.is_settled());
    assert_eq!(deferred.promise().try_get(), Some(Ok(1)));
}

#[test]
fn test_promise_is_pending_until_settled() {
    let deferred = Deferred::<i32, ()>::new();
    let mut promise = deferred.promise();

    assert!((&mut promise).now_or_never().is_none());
    assert!(!promise.is_settled());

    deferred.resolve(7);
    assert_eq!(promise.now_or_never(), Some(Ok(7)));
}

#[tokio::test]
async fn test_every_reader_observes_the_same_outcome() {
    let deferred = Deferred::<u32, ()>::new();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let promise = deferred.promise();
            tokio::spawn(promise)
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    deferred.resolve(42);

    for reader in readers {
        assert_eq!(reader.await.expect("reader should not panic"), Ok(42));
    }

    // Late subscribers see the settled value as well
    assert_eq!(deferred.promise().await, Ok(42));
}

#[tokio::test]
async fn test_cloned_promise_observes_settlement() {
    let deferred = Deferred::<&'static str, ()>::new();
    let promise = deferred.promise();
    let clone = promise.clone();

    deferred.resolve("shared");

    assert_eq!(promise.await, Ok("shared"));
    assert_eq!(clone.await, Ok("shared"));
}
