// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tagged outcomes and action tags reported by the scheduler.
//!
//! Every variant has a lowercase tag (`"ok"`, `"abort"`, `"noop"`, ...) exposed
//! through `type_tag()` / `Display`, so callers can branch on tags the same way
//! across all result kinds.

use crate::abort_error::{DebounceAbortError, DebounceError};
use core::fmt;

/// Outcome of `Debouncer::exec`. Never an error by itself.
#[derive(Clone, Debug, PartialEq)]
pub enum DebounceResult<T, E> {
    /// The callback completed (or `ready` supplied the value).
    Ok(T),
    /// The callback failed.
    Error(E),
    /// The operation was cancelled or aborted.
    Abort(DebounceAbortError),
}

impl<T, E> DebounceResult<T, E> {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Error(_) => "error",
            Self::Abort(_) => "abort",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }

    /// The value, if the operation completed.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error(_) | Self::Abort(_) => None,
        }
    }

    /// Turn failures back into an `Err`, for `?`-style propagation.
    ///
    /// # Errors
    /// Returns `DebounceError::Callback` for `Error` and
    /// `DebounceError::Aborted` for `Abort`.
    pub fn into_result(self) -> Result<T, DebounceError<E>> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(error) => Err(DebounceError::Callback(error)),
            Self::Abort(abort) => Err(DebounceError::Aborted(abort)),
        }
    }
}

impl<T, E> From<Result<T, DebounceError<E>>> for DebounceResult<T, E> {
    fn from(result: Result<T, DebounceError<E>>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(DebounceError::Aborted(abort)) => Self::Abort(abort),
            Err(DebounceError::Callback(error)) => Self::Error(error),
        }
    }
}

/// Outcome of `Debouncer::flush`. Never reports an abort.
#[derive(Clone, Debug, PartialEq)]
pub enum FlushResult<T, E> {
    Ok(T),
    Error(E),
    /// Nothing was pending.
    None,
}

impl<T, E> FlushResult<T, E> {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Error(_) => "error",
            Self::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error(_) | Self::None => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for FlushResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Error(error),
        }
    }
}

macro_rules! define_tag {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_tag! {
    /// Result of `Debouncer::ready`.
    ReadyAction {
        /// Nothing was scheduled.
        Noop => "noop",
        /// The callback is already running and cannot be preempted.
        Running => "running",
        /// The scheduled operation was resolved with the supplied value.
        Resolved => "resolved",
    }
}

define_tag! {
    /// Result of `Debouncer::cancel`.
    CancelAction {
        Noop => "noop",
        Canceled => "canceled",
        /// In-flight work cannot be cancelled; use `abort`.
        Running => "running",
    }
}

define_tag! {
    /// Result of `Debouncer::abort`.
    AbortAction {
        Noop => "noop",
        /// A scheduled operation was cancelled before it ran.
        Canceled => "canceled",
        /// The running callback's cancellation token was triggered.
        Aborted => "aborted",
    }
}

define_tag! {
    /// Scheduler state, derived from the operation record.
    DebounceState {
        Idle => "idle",
        Scheduled => "scheduled",
        Running => "running",
    }
}
