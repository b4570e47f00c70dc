//! Live statistics derived from a recorded route.
//!
//! Everything here is a pure function of the route and elapsed time.
//! The tracker recomputes the whole snapshot on every tick rather than
//! patching fields incrementally, so a missed tick cannot cause drift.

use serde::{Deserialize, Serialize};

use crate::models::LocationPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Trailing window for current pace: at most 5 minutes...
const PACE_WINDOW_MS: i64 = 5 * 60 * 1000;

/// ...or at most 1 km, whichever limit is hit first walking backward.
const PACE_WINDOW_KM: f64 = 1.0;

/// Snapshot of live run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Total route distance in kilometers
    pub distance_km: f64,
    /// Elapsed time in whole seconds, excluding paused intervals
    pub duration_s: i64,
    /// Pace over the trailing window, in minutes per kilometer
    pub current_pace_min_per_km: f64,
    /// Pace over the whole session, in minutes per kilometer
    pub average_pace_min_per_km: f64,
    /// Estimated energy burned
    pub calories: u32,
}

impl RunStats {
    /// Derive a full snapshot from the route and the session's time
    /// accounting. `paused_accum_ms` must already include any pause
    /// interval still in progress at `now_ms`.
    pub fn compute(
        route: &[LocationPoint],
        now_ms: i64,
        start_ms: i64,
        paused_accum_ms: i64,
        body_weight_kg: f64,
    ) -> Self {
        let distance_km = route_distance_km(route);
        let duration_s = (now_ms - start_ms - paused_accum_ms).max(0) / 1000;

        let average_pace_min_per_km = if distance_km > 0.0 {
            duration_s as f64 / 60.0 / distance_km
        } else {
            0.0
        };

        Self {
            distance_km,
            duration_s,
            current_pace_min_per_km: current_pace_min_per_km(route),
            average_pace_min_per_km,
            calories: estimate_calories(distance_km, body_weight_kg),
        }
    }
}

/// Great-circle distance between two coordinates, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of pairwise great-circle distances over consecutive route points.
///
/// Every recorded point counts; there is no smoothing or outlier
/// rejection, so GPS noise inflates the total.
pub fn route_distance_km(route: &[LocationPoint]) -> f64 {
    route
        .windows(2)
        .map(|pair| segment_km(&pair[0], &pair[1]))
        .sum()
}

/// Estimated calories for a run of the given distance.
pub fn estimate_calories(distance_km: f64, body_weight_kg: f64) -> u32 {
    (0.8 * body_weight_kg * distance_km).round() as u32
}

fn segment_km(from: &LocationPoint, to: &LocationPoint) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Pace over the trailing window of the route.
///
/// Walks backward from the newest point, accumulating segments while the
/// older endpoint is within 5 minutes of the newest point and less than
/// 1 km has been collected. The time check is evaluated before the
/// segment is accumulated, so whichever limit trips first ends the walk.
/// A window with zero distance reports 0 (the consumer shows a
/// placeholder instead of dividing).
fn current_pace_min_per_km(route: &[LocationPoint]) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }

    let newest = &route[route.len() - 1];
    let mut window_km = 0.0;
    let mut i = route.len() - 1;
    while i > 0
        && newest.timestamp_ms - route[i - 1].timestamp_ms < PACE_WINDOW_MS
        && window_km < PACE_WINDOW_KM
    {
        window_km += segment_km(&route[i - 1], &route[i]);
        i -= 1;
    }

    let window_min = (newest.timestamp_ms - route[i].timestamp_ms) as f64 / 1000.0 / 60.0;
    if window_km > 0.0 {
        window_min / window_km
    } else {
        0.0
    }
}
