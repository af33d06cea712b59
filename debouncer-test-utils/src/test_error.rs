// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Error returned by test callbacks. Cloneable so it can be shared among waiters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestError {
    #[error("callback failed: {0}")]
    Failed(String),

    #[error("callback observed cancellation: {0:?}")]
    Cancelled(Option<String>),
}

impl TestError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
