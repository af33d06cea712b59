// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use debouncer::{
    AbortOptions, CancelAction, CancellationToken, DebounceResult, DebounceState, Debouncer,
    FlushResult,
};
use debouncer_runtime::impls::smol::SmolRuntime;
use debouncer_test_utils::{CallRecorder, TestError};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(20);

fn echo(recorder: &CallRecorder<u32>) -> Debouncer<u32, u32, TestError, SmolRuntime> {
    let recorder = recorder.clone();
    Debouncer::with_runtime(
        move |value: u32, _token: CancellationToken| {
            recorder.record(value);
            async move { Ok(value) }
        },
        DELAY,
    )
}

#[test]
fn test_smol_rapid_calls_coalesce() {
    smol::block_on(async {
        // Arrange
        let recorder = CallRecorder::new();
        let debouncer = echo(&recorder);

        // Act
        let first = debouncer.exec(1);
        let second = debouncer.exec(2);

        // Assert
        assert_eq!(first.await, DebounceResult::Ok(2));
        assert_eq!(second.await, DebounceResult::Ok(2));
        assert_eq!(recorder.calls(), vec![2]);
        assert_eq!(debouncer.state(), DebounceState::Idle);
    });
}

#[test]
fn test_smol_flush_and_cancel() {
    smol::block_on(async {
        // Arrange
        let recorder = CallRecorder::new();
        let debouncer = echo(&recorder);

        // Act
        let flushed = debouncer.exec(3);
        let flush = debouncer.flush().await;
        let cancelled = debouncer.exec(4);
        let action = debouncer.cancel(Some("done".to_string()), AbortOptions::new());

        // Assert
        assert_eq!(flush, FlushResult::Ok(3));
        assert_eq!(flushed.await, DebounceResult::Ok(3));
        assert_eq!(action, CancelAction::Canceled);
        assert!(cancelled.await.is_abort());

        smol::Timer::after(DELAY * 2).await;
        assert_eq!(recorder.calls(), vec![3]);
    });
}
