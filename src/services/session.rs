// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run session state machine.
//!
//! Pure state: every transition takes an explicit `now_ms`, so the
//! machine is deterministic under test and owns no timers or I/O. The
//! async driver in [`tracker`](crate::services::tracker) feeds it clock
//! readings and location points.

use crate::models::{LocationPoint, RunStats, RunSummary};

/// Lifecycle phase of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// In-memory state for one start-to-stop tracking session.
///
/// Invalid-state transitions are no-ops returning `false`, so double
/// taps on any lifecycle control cannot corrupt the accounting.
#[derive(Debug, Clone)]
pub struct RunSession {
    phase: SessionPhase,
    start_ms: i64,
    paused_accum_ms: i64,
    last_pause_ms: Option<i64>,
    route: Vec<LocationPoint>,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            start_ms: 0,
            paused_accum_ms: 0,
            last_pause_ms: None,
            route: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True from start until stop, including while paused.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, SessionPhase::Running | SessionPhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn route(&self) -> &[LocationPoint] {
        &self.route
    }

    /// Begin a fresh session, resetting all accumulators and the route.
    /// No-op while a session is active.
    pub fn begin(&mut self, now_ms: i64) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.start_ms = now_ms;
        self.paused_accum_ms = 0;
        self.last_pause_ms = None;
        self.route.clear();
        true
    }

    /// Record the start of a pause. No-op unless actively running.
    pub fn pause(&mut self, now_ms: i64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        self.last_pause_ms = Some(now_ms);
        true
    }

    /// Fold the completed pause interval into the paused-time
    /// accumulator. No-op unless paused.
    pub fn resume(&mut self, now_ms: i64) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        if let Some(paused_at) = self.last_pause_ms.take() {
            self.paused_accum_ms += now_ms - paused_at;
        }
        self.phase = SessionPhase::Running;
        true
    }

    /// Append an arriving fix. Ignored unless actively running: the
    /// subscription only exists then, but a late arrival can race a
    /// pause.
    pub fn record(&mut self, point: LocationPoint) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.route.push(point);
        true
    }

    /// Finalize the session and return the summary snapshot. `None`
    /// unless a session is active.
    pub fn stop(&mut self, now_ms: i64, body_weight_kg: f64) -> Option<RunSummary> {
        if !self.is_running() {
            return None;
        }
        let stats = self.stats(now_ms, body_weight_kg);
        self.phase = SessionPhase::Stopped;
        Some(RunSummary {
            distance_km: stats.distance_km,
            duration_s: stats.duration_s,
            average_pace_min_per_km: stats.average_pace_min_per_km,
            calories: stats.calories,
            route: self.route.clone(),
        })
    }

    /// Derive the live stats snapshot at `now_ms`.
    pub fn stats(&self, now_ms: i64, body_weight_kg: f64) -> RunStats {
        if self.phase == SessionPhase::Idle {
            return RunStats::default();
        }
        RunStats::compute(
            &self.route,
            now_ms,
            self.start_ms,
            self.paused_ms_at(now_ms),
            body_weight_kg,
        )
    }

    /// Paused time to exclude at `now_ms`, counting an in-progress pause
    /// so a mid-pause reading matches the value frozen at pause time.
    fn paused_ms_at(&self, now_ms: i64) -> i64 {
        match self.last_pause_ms {
            Some(paused_at) if self.phase == SessionPhase::Paused => {
                self.paused_accum_ms + (now_ms - paused_at)
            }
            _ => self.paused_accum_ms,
        }
    }
}
