// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use debouncer::{CancellationToken, Debouncer};
use debouncer_test_utils::{CallRecorder, TestError};
use std::time::Duration;
use tokio::time::sleep;

pub const DELAY: Duration = Duration::from_millis(50);
pub const WORK: Duration = Duration::from_millis(100);

/// Debouncer whose callback echoes its argument immediately.
pub fn echo(recorder: &CallRecorder<u32>) -> Debouncer<u32, u32, TestError> {
    let recorder = recorder.clone();
    Debouncer::from_fn(
        move |value: u32, _token: &CancellationToken| {
            recorder.record(value);
            Ok(value)
        },
        DELAY,
    )
}

/// Debouncer whose callback runs for `WORK` and fails early when its token is cancelled.
pub fn slow_echo(recorder: &CallRecorder<u32>) -> Debouncer<u32, u32, TestError> {
    let recorder = recorder.clone();
    Debouncer::new(
        move |value: u32, token: CancellationToken| {
            recorder.record(value);
            async move {
                tokio::select! {
                    () = sleep(WORK) => Ok(value),
                    () = token.cancelled() => Err(TestError::Cancelled(token.reason())),
                }
            }
        },
        DELAY,
    )
}
