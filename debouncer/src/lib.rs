// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Trailing-edge debouncing of async callbacks.
//!
//! A [`Debouncer`] wraps a callback and a delay. Rapid calls collapse into a
//! single execution with the latest arguments, and every caller of the cycle
//! observes the same outcome. Pending work can be completed early
//! ([`Debouncer::ready`], [`Debouncer::flush`]) or cancelled
//! ([`Debouncer::cancel`], [`Debouncer::abort`]).
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - timers and tasks on Tokio
//! - `runtime-smol` - timers and tasks on smol
//!
//! `tracing` routes the scheduler's diagnostics to the `tracing` crate.
//!
//! # Example
//!
//! ```rust
//! use debouncer::{AbortOptions, CancelAction, Debouncer, DebounceResult};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let save = Debouncer::from_fn(
//!     |doc: String, _token| Ok::<_, String>(doc.len()),
//!     Duration::from_millis(100),
//! );
//!
//! let pending = save.exec("draft".to_string());
//! assert_eq!(
//!     save.cancel(Some("user request".to_string()), AbortOptions::new()),
//!     CancelAction::Canceled
//! );
//!
//! match pending.await {
//!     DebounceResult::Abort(abort) => assert_eq!(abort.reason(), Some("user request")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # }
//! ```

#[macro_use]
mod logging;

pub mod debouncer;
mod record;

pub use self::debouncer::Debouncer;
pub use debouncer_core::{
    is_abort_error, resolve_abort_error, AbortAction, AbortCause, AbortOptions, CancelAction,
    CancellationToken, DebounceAbortError, DebounceError, DebounceResult, DebounceState,
    Deferred, FlushResult, Promise, ReadyAction,
};
pub use debouncer_runtime::runtime::Runtime;

/// Runtime used when `Debouncer` is built without an explicit one.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = debouncer_runtime::impls::tokio::TokioRuntime;

/// Runtime used when `Debouncer` is built without an explicit one.
#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = debouncer_runtime::impls::smol::SmolRuntime;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("enable at least one of the `runtime-tokio` or `runtime-smol` features");
