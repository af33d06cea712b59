// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::tokio::fixtures::{echo, slow_echo, DELAY};
use debouncer::{
    AbortAction, AbortOptions, CancellationToken, DebounceResult, DebounceState, Debouncer,
    FlushResult,
};
use debouncer_test_utils::{CallRecorder, TestError};
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

#[tokio::test(start_paused = true)]
async fn test_flush_while_idle_returns_none() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = echo(&recorder);

    // Act
    let outcome = debouncer.flush().await;

    // Assert
    assert_eq!(outcome, FlushResult::None);
    assert_eq!(outcome.type_tag(), "none");
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_flush_while_scheduled_runs_callback_immediately() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = echo(&recorder);
    let pending = debouncer.exec(3);
    let started = Instant::now();

    // Act
    let outcome = debouncer.flush().await;

    // Assert
    assert_eq!(outcome, FlushResult::Ok(3));
    assert!(started.elapsed() < DELAY);
    assert_eq!(pending.await, DebounceResult::Ok(3));
    assert_eq!(recorder.calls(), vec![3]);
    assert_eq!(debouncer.state(), DebounceState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_flush_marks_operation_running_before_first_poll() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = echo(&recorder);
    let _pending = debouncer.exec(4);

    // Act
    let flush = debouncer.flush();

    // Assert
    assert_eq!(debouncer.state(), DebounceState::Running);
    assert_eq!(flush.await, FlushResult::Ok(4));

    // The superseded timer must not run the callback a second time
    sleep(DELAY * 2).await;
    assert_eq!(recorder.calls(), vec![4]);
}

#[tokio::test(start_paused = true)]
async fn test_flush_while_scheduled_reports_callback_error() {
    // Arrange
    let debouncer = Debouncer::from_fn(
        |(), _token: &CancellationToken| Err::<(), _>(TestError::failed("boom")),
        DELAY,
    );
    let pending = debouncer.exec(());

    // Act
    let outcome = debouncer.flush().await;

    // Assert
    assert_eq!(outcome, FlushResult::Error(TestError::failed("boom")));
    assert_eq!(pending.await, DebounceResult::Error(TestError::failed("boom")));
}

#[tokio::test(start_paused = true)]
async fn test_flush_while_running_awaits_in_flight_operation() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = slow_echo(&recorder);
    let pending = debouncer.exec(8);
    sleep(DELAY + Duration::from_millis(10)).await;

    // Act
    let outcome = debouncer.flush().await;

    // Assert
    assert_eq!(outcome, FlushResult::Ok(8));
    assert_eq!(pending.await, DebounceResult::Ok(8));
    assert_eq!(recorder.calls(), vec![8]);
    assert_eq!(debouncer.state(), DebounceState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_flush_surfaces_cooperative_abort_as_error() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = slow_echo(&recorder);
    let _pending = debouncer.exec(1);
    sleep(DELAY + Duration::from_millis(10)).await;
    let flush = debouncer.flush();

    // Act
    let action = debouncer.abort(Some("stop".to_string()), AbortOptions::new());

    // Assert
    assert_eq!(action, AbortAction::Aborted);
    assert_eq!(
        flush.await,
        FlushResult::Error(TestError::Cancelled(Some("stop".to_string())))
    );
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_flush_lets_callback_finish_for_other_waiters() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = slow_echo(&recorder);
    let pending = debouncer.exec(7);

    // Act
    let flushed = timeout(Duration::from_millis(10), debouncer.flush()).await;

    // Assert
    assert!(flushed.is_err());
    assert_eq!(debouncer.state(), DebounceState::Running);
    assert_eq!(pending.await, DebounceResult::Ok(7));
    assert_eq!(recorder.calls(), vec![7]);
    assert_eq!(debouncer.state(), DebounceState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_flush_before_poll_still_completes_operation() {
    // Arrange
    let recorder = CallRecorder::new();
    let debouncer = echo(&recorder);
    let pending = debouncer.exec(5);

    // Act
    drop(debouncer.flush());

    // Assert
    assert_eq!(debouncer.state(), DebounceState::Running);
    assert_eq!(pending.await, DebounceResult::Ok(5));
    assert_eq!(recorder.calls(), vec![5]);
    assert_eq!(debouncer.state(), DebounceState::Idle);

    // The cancelled delay timer must not run the callback again
    sleep(DELAY * 2).await;
    assert_eq!(recorder.calls(), vec![5]);
}
