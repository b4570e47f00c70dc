// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run persistence service.
//!
//! Saving is a separate, explicit step after
//! [`RunTracker::stop`](crate::services::RunTracker::stop), so live
//! tracking never depends on backend availability. The summary is
//! borrowed, not consumed: a caller whose save fails can retry the same
//! snapshot.

use std::sync::Arc;

use validator::Validate;

use crate::error::{Result, TrackerError};
use crate::models::{NewRun, Run, RunMetadata, RunSummary};
use crate::store::RunStore;

/// Persists finished runs through the configured store.
pub struct RunRecorder {
    store: Arc<dyn RunStore>,
}

impl RunRecorder {
    pub fn new(store: Arc<dyn RunStore>) -> Self {
        Self { store }
    }

    /// Persist a finished run with its post-run details.
    ///
    /// Returns `Ok(None)` without touching the store when the session
    /// accumulated no distance (an empty run is not worth a record).
    /// Metadata is validated before the store is called.
    pub async fn save_run(
        &self,
        summary: &RunSummary,
        metadata: &RunMetadata,
    ) -> Result<Option<Run>> {
        metadata
            .validate()
            .map_err(|e| TrackerError::InvalidMetadata(e.to_string()))?;

        if summary.distance_km == 0.0 {
            tracing::debug!("Skipping save: no distance accumulated");
            return Ok(None);
        }

        let new_run = NewRun {
            distance_km: summary.distance_km,
            duration_s: summary.duration_s,
            average_pace_min_per_km: summary.average_pace_min_per_km,
            calories: summary.calories,
            route: summary.route.clone(),
            effort_level: metadata.effort_level,
            mood_rating: metadata.mood_rating,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        };

        let run = self
            .store
            .save_run(&new_run)
            .await
            .map_err(|e| TrackerError::Persistence(e.to_string()))?;

        tracing::info!(
            run_id = %run.id,
            distance_km = run.distance_km,
            duration_s = run.duration_s,
            "Run saved"
        );
        Ok(Some(run))
    }
}
