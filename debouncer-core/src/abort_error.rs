// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for debounced operations.
//!
//! A debounced operation fails in one of two ways:
//!
//! - it was cancelled before it started (or its callback chose to report an
//!   abort), producing a [`DebounceAbortError`]
//! - its callback failed, producing the callback's own error `E`
//!
//! [`DebounceError`] is the union of both, and is what
//! `Debouncer::exec_unsafe` rejects with.
//!
//! # Examples
//!
//! ```
//! use debouncer_core::{resolve_abort_error, DebounceAbortError};
//!
//! let error = DebounceAbortError::with_reason("server unreachable");
//! let resolved = resolve_abort_error(error).expect("abort errors resolve");
//! assert_eq!(resolved.reason(), Some("server unreachable"));
//!
//! let other = resolve_abort_error(std::fmt::Error);
//! assert!(other.is_err());
//! ```

use core::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

/// Shared, type-erased cause attached to an abort error.
pub type AbortCause = Arc<dyn StdError + Send + Sync + 'static>;

/// Options accompanying an abort request.
#[derive(Clone, Debug, Default)]
pub struct AbortOptions {
    cause: Option<AbortCause>,
}

impl AbortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the error that led to the abort.
    #[must_use]
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attach an already shared cause.
    #[must_use]
    pub fn with_shared_cause(mut self, cause: AbortCause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn cause(&self) -> Option<&AbortCause> {
        self.cause.as_ref()
    }
}

/// Error raised when a debounced operation is cancelled or aborted.
///
/// Carries an optional textual `reason` and an optional `cause`, exposed
/// through [`std::error::Error::source`] so the usual error-chain walkers see it.
#[derive(Clone, Debug, Default, thiserror::Error)]
#[error("debounced operation aborted")]
pub struct DebounceAbortError {
    reason: Option<String>,
    #[source]
    cause: Option<AbortCause>,
}

impl DebounceAbortError {
    /// Abort error without reason or cause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort error describing why the operation was aborted.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            cause: None,
        }
    }

    /// Build from an optional reason and an options bag.
    pub fn from_parts(reason: Option<String>, options: AbortOptions) -> Self {
        Self {
            reason,
            cause: options.cause,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn cause(&self) -> Option<&AbortCause> {
        self.cause.as_ref()
    }
}

impl PartialEq for DebounceAbortError {
    /// Reasons compare by value; causes compare by their rendered message.
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason
            && self.cause.as_ref().map(ToString::to_string)
                == other.cause.as_ref().map(ToString::to_string)
    }
}

/// Failure of a debounced operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DebounceError<E> {
    /// The operation was cancelled before it ran.
    #[error(transparent)]
    Aborted(DebounceAbortError),

    /// The callback ran and failed.
    #[error("debounced callback failed: {0}")]
    Callback(E),
}

impl<E> DebounceError<E> {
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    pub fn as_abort(&self) -> Option<&DebounceAbortError> {
        match self {
            Self::Aborted(abort) => Some(abort),
            Self::Callback(_) => None,
        }
    }

    /// Split into the abort error or the callback error.
    pub fn into_abort(self) -> Result<DebounceAbortError, E> {
        match self {
            Self::Aborted(abort) => Ok(abort),
            Self::Callback(error) => Err(error),
        }
    }
}

impl<E> From<DebounceAbortError> for DebounceError<E> {
    fn from(abort: DebounceAbortError) -> Self {
        Self::Aborted(abort)
    }
}

/// Return `error` as a [`DebounceAbortError`] if it is one, otherwise hand it back.
///
/// This is the branch point for callers that treat aborts differently from
/// every other failure:
///
/// ```
/// use debouncer_core::{resolve_abort_error, DebounceAbortError, DebounceError};
///
/// let failure: DebounceError<std::io::ErrorKind> =
///     DebounceAbortError::with_reason("cancel").into();
///
/// match failure.into_abort().or_else(resolve_abort_error) {
///     Ok(abort) => assert_eq!(abort.reason(), Some("cancel")),
///     Err(other) => panic!("unexpected failure: {other:?}"),
/// }
/// ```
///
/// Resolves when `error` is a `DebounceAbortError`, or a type-erased
/// [`AbortCause`] / `Box<dyn Error + Send + Sync>` wrapping one. For the
/// scheduler's own [`DebounceError`], split with
/// [`DebounceError::into_abort`] first.
pub fn resolve_abort_error<E: Any>(error: E) -> Result<DebounceAbortError, E> {
    let any: &dyn Any = &error;

    let abort = if let Some(abort) = any.downcast_ref::<DebounceAbortError>() {
        Some(abort)
    } else if let Some(cause) = any.downcast_ref::<AbortCause>() {
        cause.downcast_ref::<DebounceAbortError>()
    } else if let Some(boxed) = any.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
        boxed.downcast_ref::<DebounceAbortError>()
    } else {
        None
    };

    match abort {
        Some(abort) => Ok(abort.clone()),
        None => Err(error),
    }
}

/// Type predicate for [`DebounceAbortError`] behind a `dyn Error`.
pub fn is_abort_error(error: &(dyn StdError + 'static)) -> bool {
    error.is::<DebounceAbortError>()
}
