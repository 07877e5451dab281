//! Snapshot types for an async operation's lifecycle.

use std::fmt::Display;

/// Message used when an error carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Observable state of one async operation.
///
/// `data` and `error` are never both set: a success clears `error`, a
/// failure clears `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> AsyncState<T> {
    /// State at rest: nothing loaded, nothing pending, no error.
    pub fn rest() -> Self {
        Self::default()
    }

    pub fn is_rest(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.data.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

/// Coarse lifecycle phase derived from an `AsyncState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// What a single `execute` call resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, Some(error)) => Err(error),
            (None, None) => Err(FALLBACK_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Text of an error, or the fallback when it renders empty.
pub fn error_message<E: Display + ?Sized>(err: &E) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        text
    }
}
