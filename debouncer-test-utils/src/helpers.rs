// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use futures::FutureExt;

/// Poll `future` exactly once without blocking.
pub fn poll_once<F>(future: &mut F) -> Option<F::Output>
where
    F: Future + Unpin,
{
    future.now_or_never()
}

/// Panic if `future` completes on its first poll.
pub fn assert_pending<F>(future: &mut F, context: &str)
where
    F: Future + Unpin,
{
    assert!(
        poll_once(future).is_none(),
        "{context}: expected the future to be pending"
    );
}
