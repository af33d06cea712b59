// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::{future::Future, sync::Arc, time::Duration};

#[cfg(feature = "runtime-tokio")]
use crate::{runtime::Runtime, timer::Timer};

/// Tokio-backed runtime. Spawning requires an ambient Tokio runtime.
#[cfg(feature = "runtime-tokio")]
#[derive(Debug)]
pub struct TokioRuntime;

#[cfg(feature = "runtime-tokio")]
impl Runtime for TokioRuntime {
    type Mutex<T: Send + ?Sized> = Arc<parking_lot::Mutex<T>>;
    type Timer = TokioTimer;

    fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(tokio::spawn(future));
    }
}

#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "runtime-tokio")]
impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }
}
