// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Leaf utilities shared by the debounce scheduler.
//!
//! - [`CancellationToken`] - cooperative cancellation signal passed to callbacks
//! - [`Deferred`] / [`Promise`] - one-shot result with separate settle triggers
//! - [`DebounceAbortError`] / [`DebounceError`] - failure vocabulary
//! - [`DebounceResult`], [`FlushResult`] and the action tags - tagged outcomes

pub mod abort_error;
pub mod cancellation_token;
pub mod deferred;
pub mod outcome;

pub use self::abort_error::{
    is_abort_error, resolve_abort_error, AbortCause, AbortOptions, DebounceAbortError,
    DebounceError,
};
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::deferred::{Deferred, Promise};
pub use self::outcome::{
    AbortAction, CancelAction, DebounceResult, DebounceState, FlushResult, ReadyAction,
};
