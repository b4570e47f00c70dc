// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker error types.

/// Errors surfaced by the tracking lifecycle and the save step.
///
/// Nothing here is retried internally; retrying is the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Location access was not granted; `start` refuses without touching
    /// session state.
    #[error("Location permission not granted")]
    PermissionDenied,

    /// The location provider failed to begin streaming. Fatal to the
    /// attempted transition; the caller decides whether to retry.
    #[error("Location subscription failed: {0}")]
    Subscription(String),

    /// The backing store rejected the write. The in-memory snapshot is
    /// untouched, so the save may be retried with the same data.
    #[error("Failed to persist run: {0}")]
    Persistence(String),

    /// Post-run form data was out of range.
    #[error("Invalid run metadata: {0}")]
    InvalidMetadata(String),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
