// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the debouncer workspace.
//!
//! Intended for development and testing only.
//!
//! - [`TestError`] - a cloneable callback error
//! - [`CallRecorder`] - counts callback invocations and keeps their arguments
//! - [`poll_once`] / [`assert_pending`] - single-poll helpers for futures

pub mod call_recorder;
pub mod helpers;
pub mod test_error;

pub use self::call_recorder::CallRecorder;
pub use self::helpers::{assert_pending, poll_once};
pub use self::test_error::TestError;
