// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - tracking logic layer.

pub mod location;
pub mod recorder;
pub mod session;
pub mod tracker;

pub use location::{
    LocationError, LocationProvider, PermissionStatus, PositionSample, ScriptedLocationProvider,
    WatchHandle, WatchOptions,
};
pub use recorder::RunRecorder;
pub use session::{RunSession, SessionPhase};
pub use tracker::RunTracker;
