// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stride Tracker demo
//!
//! Replays a scripted route through a full start/pause/resume/stop/save
//! cycle and logs the saved run.

use std::sync::Arc;
use std::time::Duration;

use stride_tracker::{
    config::Config,
    format::{format_distance, format_duration, format_pace},
    models::{EffortLevel, RunMetadata},
    services::{PositionSample, RunRecorder, RunTracker, ScriptedLocationProvider},
    store::{MemoryRunStore, RunStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        body_weight_kg = config.body_weight_kg,
        tick_interval_ms = config.tick_interval_ms,
        "Starting Stride Tracker demo"
    );

    // A short jog north through the Mission, one fix every 250 ms
    let script: Vec<PositionSample> = (0..20)
        .map(|i| PositionSample {
            latitude: 37.7749 + 0.0005 * f64::from(i),
            longitude: -122.4194,
        })
        .collect();
    let provider = Arc::new(ScriptedLocationProvider::new(
        script,
        Duration::from_millis(250),
    ));

    let mut tracker = RunTracker::new(provider, config);
    if !tracker.request_permission().await {
        anyhow::bail!("location permission denied");
    }

    tracker.start().await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    tracker.pause();
    tracing::info!(stats = ?tracker.stats(), "Mid-run snapshot at pause");
    tokio::time::sleep(Duration::from_millis(500)).await;
    tracker.resume().await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let summary = match tracker.stop().await {
        Some(summary) => summary,
        None => anyhow::bail!("no active session to stop"),
    };
    tracing::info!(
        distance = %format_distance(summary.distance_km),
        duration = %format_duration(summary.duration_s),
        average_pace = %format_pace(summary.average_pace_min_per_km),
        calories = summary.calories,
        points = summary.route.len(),
        "Session finished"
    );

    let store = Arc::new(MemoryRunStore::new());
    let recorder = RunRecorder::new(store.clone());
    let metadata = RunMetadata {
        effort_level: EffortLevel::Moderate,
        mood_rating: 4,
    };
    match recorder.save_run(&summary, &metadata).await? {
        Some(run) => tracing::info!(run_id = %run.id, recorded_at = %run.recorded_at, "Run saved"),
        None => tracing::warn!("Nothing to save: empty run"),
    }

    let stored = store.list_runs().await?;
    tracing::info!(count = stored.len(), "Store contents");

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stride_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
