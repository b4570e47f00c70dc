// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run records: the stop-time snapshot, post-run form data, and the
//! persisted run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::LocationPoint;

/// How hard the run felt, reported by the runner afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Easy,
    Moderate,
    Hard,
}

/// Post-run details collected from the runner before saving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct RunMetadata {
    /// Perceived effort
    pub effort_level: EffortLevel,
    /// Mood rating on a 1-5 scale
    #[validate(range(min = 1, max = 5))]
    pub mood_rating: u8,
}

/// Final snapshot returned when a session stops.
///
/// Nothing is persisted at stop time; the caller hands this to
/// [`RunRecorder::save_run`](crate::services::RunRecorder::save_run)
/// together with [`RunMetadata`], and may retry with the same snapshot if
/// the store rejects the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total distance in kilometers
    pub distance_km: f64,
    /// Duration in whole seconds, excluding paused intervals
    pub duration_s: i64,
    /// Average pace in minutes per kilometer
    pub average_pace_min_per_km: f64,
    /// Estimated energy burned
    pub calories: u32,
    /// Full recorded route
    pub route: Vec<LocationPoint>,
}

/// A run ready to persist; the store assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRun {
    pub distance_km: f64,
    pub duration_s: i64,
    pub average_pace_min_per_km: f64,
    pub calories: u32,
    pub route: Vec<LocationPoint>,
    pub effort_level: EffortLevel,
    pub mood_rating: u8,
    /// When the run was saved (ISO 8601)
    pub recorded_at: String,
}

/// Stored run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Generated identifier
    pub id: Uuid,
    pub distance_km: f64,
    pub duration_s: i64,
    pub average_pace_min_per_km: f64,
    pub calories: u32,
    pub route: Vec<LocationPoint>,
    pub effort_level: EffortLevel,
    pub mood_rating: u8,
    /// When the run was saved (ISO 8601)
    pub recorded_at: String,
}

impl Run {
    /// Build a stored record from a pending run and its generated id.
    pub fn from_new(id: Uuid, new_run: NewRun) -> Self {
        Self {
            id,
            distance_km: new_run.distance_km,
            duration_s: new_run.duration_s,
            average_pace_min_per_km: new_run.average_pace_min_per_km,
            calories: new_run.calories,
            route: new_run.route,
            effort_level: new_run.effort_level,
            mood_rating: new_run.mood_rating,
            recorded_at: new_run.recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_rating_range() {
        let valid = RunMetadata {
            effort_level: EffortLevel::Moderate,
            mood_rating: 3,
        };
        assert!(valid.validate().is_ok());

        let too_low = RunMetadata {
            effort_level: EffortLevel::Easy,
            mood_rating: 0,
        };
        assert!(too_low.validate().is_err());

        let too_high = RunMetadata {
            effort_level: EffortLevel::Hard,
            mood_rating: 6,
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn test_effort_level_serializes_lowercase() {
        let json = serde_json::to_string(&EffortLevel::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }
}
