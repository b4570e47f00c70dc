// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recorded GPS fix.

use serde::{Deserialize, Serialize};

/// One GPS fix recorded during a tracking session.
///
/// Points are appended to the session route in arrival order and never
/// mutated or removed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Unix timestamp in milliseconds when the fix was recorded
    pub timestamp_ms: i64,
}

impl LocationPoint {
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_ms,
        }
    }
}
