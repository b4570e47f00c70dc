// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the tracker.

pub mod point;
pub mod run;
pub mod stats;

pub use point::LocationPoint;
pub use run::{EffortLevel, NewRun, Run, RunMetadata, RunSummary};
pub use stats::RunStats;
