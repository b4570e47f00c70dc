// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live run tracking driver.
//!
//! [`RunTracker`] owns one [`RunSession`] and wires it to its two
//! collaborators: a [`LocationProvider`] pushing position samples, and a
//! periodic tick that recomputes derived stats. Arriving samples are
//! stamped with the tracker's clock and appended to the route; the tick
//! republishes a fresh [`RunStats`] snapshot over a watch channel.
//!
//! Lifecycle misuse (double start, stray pause/resume, stop while idle)
//! is a no-op, never an error, so UI double-taps stay harmless. Only
//! `pause` and `stop` cancel the subscription and tick; both are also
//! released when the tracker is dropped mid-run.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::models::{LocationPoint, RunStats, RunSummary};
use crate::services::location::{
    LocationProvider, PermissionStatus, PositionSample, WatchHandle, WatchOptions,
};
use crate::services::session::RunSession;

/// Buffer for in-flight position samples between provider and ingest.
const SAMPLE_CHANNEL_CAPACITY: usize = 64;

/// Owns one active tracking session.
pub struct RunTracker {
    provider: Arc<dyn LocationProvider>,
    clock: Arc<dyn Clock>,
    config: Config,
    session: Arc<Mutex<RunSession>>,
    stats_tx: Arc<watch::Sender<RunStats>>,
    permission_granted: bool,
    watch_handle: Option<WatchHandle>,
    ingest_task: Option<JoinHandle<()>>,
    tick_task: Option<JoinHandle<()>>,
}

impl RunTracker {
    pub fn new(provider: Arc<dyn LocationProvider>, config: Config) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Build a tracker with an explicit clock (tests, replays).
    pub fn with_clock(
        provider: Arc<dyn LocationProvider>,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (stats_tx, _) = watch::channel(RunStats::default());
        Self {
            provider,
            clock,
            config,
            session: Arc::new(Mutex::new(RunSession::new())),
            stats_tx: Arc::new(stats_tx),
            permission_granted: false,
            watch_handle: None,
            ingest_task: None,
            tick_task: None,
        }
    }

    /// Ask the provider for location access and cache the grant.
    pub async fn request_permission(&mut self) -> bool {
        let status = self.provider.request_permission().await;
        self.permission_granted = status == PermissionStatus::Granted;
        tracing::debug!(granted = self.permission_granted, "Location permission");
        self.permission_granted
    }

    pub fn has_permission(&self) -> bool {
        self.permission_granted
    }

    /// Start a new session.
    ///
    /// No-op if a session is already active. Fails with
    /// [`TrackerError::PermissionDenied`] without a prior grant, and with
    /// [`TrackerError::Subscription`] if the provider cannot begin
    /// streaming; neither failure changes session state.
    pub async fn start(&mut self) -> Result<()> {
        if self.session().is_running() {
            tracing::debug!("Start ignored: session already active");
            return Ok(());
        }
        if !self.permission_granted {
            return Err(TrackerError::PermissionDenied);
        }

        // Acquire the subscription before touching session state, so a
        // failed start leaves the tracker idle and retryable.
        let (handle, rx) = self.subscribe().await?;

        self.session().begin(self.clock.now_ms());
        let _ = self.stats_tx.send(RunStats::default());
        self.watch_handle = Some(handle);
        self.spawn_ingest(rx);
        self.spawn_tick();

        tracing::info!("Run started");
        Ok(())
    }

    /// Pause the active session. No-op unless running un-paused.
    pub fn pause(&mut self) {
        if !self.session().pause(self.clock.now_ms()) {
            return;
        }
        self.halt_sampling();
        tracing::info!("Run paused");
    }

    /// Resume a paused session. No-op unless paused.
    ///
    /// The subscription is re-acquired before the pause interval is
    /// folded in, so a [`TrackerError::Subscription`] failure leaves the
    /// session paused with its accounting intact; the caller may retry.
    pub async fn resume(&mut self) -> Result<()> {
        if !self.session().is_paused() {
            return Ok(());
        }

        let (handle, rx) = self.subscribe().await?;

        self.session().resume(self.clock.now_ms());
        self.watch_handle = Some(handle);
        self.spawn_ingest(rx);
        self.spawn_tick();

        tracing::info!("Run resumed");
        Ok(())
    }

    /// Stop the active session and return the final snapshot.
    ///
    /// `None` if no session is active. The subscription and tick are
    /// fully released before this returns. Nothing is persisted here;
    /// hand the summary to
    /// [`RunRecorder::save_run`](crate::services::RunRecorder::save_run).
    pub async fn stop(&mut self) -> Option<RunSummary> {
        let now_ms = self.clock.now_ms();
        let summary = self.session().stop(now_ms, self.config.body_weight_kg)?;

        if let Some(handle) = self.watch_handle.take() {
            handle.remove();
        }
        if let Some(task) = self.tick_task.take() {
            task.abort();
            let _ = task.await;
        }
        if let Some(task) = self.ingest_task.take() {
            task.abort();
            let _ = task.await;
        }

        tracing::info!(
            distance_km = summary.distance_km,
            duration_s = summary.duration_s,
            points = summary.route.len(),
            "Run stopped"
        );
        Some(summary)
    }

    /// Most recently published stats snapshot.
    pub fn stats(&self) -> RunStats {
        *self.stats_tx.borrow()
    }

    /// Watch channel of live stats updates, one per tick.
    pub fn subscribe_stats(&self) -> watch::Receiver<RunStats> {
        self.stats_tx.subscribe()
    }

    /// Copy of the recorded route so far.
    pub fn route(&self) -> Vec<LocationPoint> {
        self.session().route().to_vec()
    }

    pub fn is_running(&self) -> bool {
        self.session().is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.session().is_paused()
    }

    fn session(&self) -> MutexGuard<'_, RunSession> {
        self.session.lock().expect("session lock poisoned")
    }

    fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            time_interval_ms: self.config.sample_time_interval_ms,
            distance_interval_m: self.config.sample_distance_interval_m,
        }
    }

    async fn subscribe(&self) -> Result<(WatchHandle, mpsc::Receiver<PositionSample>)> {
        let (tx, rx) = mpsc::channel(SAMPLE_CHANNEL_CAPACITY);
        let handle = self
            .provider
            .watch_position(self.watch_options(), tx)
            .await
            .map_err(|e| TrackerError::Subscription(e.to_string()))?;
        Ok((handle, rx))
    }

    /// Append arriving samples to the route, stamped with the tracker
    /// clock.
    fn spawn_ingest(&mut self, mut rx: mpsc::Receiver<PositionSample>) {
        let session = Arc::clone(&self.session);
        let clock = Arc::clone(&self.clock);
        self.ingest_task = Some(tokio::spawn(async move {
            while let Some(sample) = rx.recv().await {
                let point =
                    LocationPoint::new(sample.latitude, sample.longitude, clock.now_ms());
                session
                    .lock()
                    .expect("session lock poisoned")
                    .record(point);
            }
        }));
    }

    /// Recompute and publish stats on every tick while running.
    fn spawn_tick(&mut self) {
        let session = Arc::clone(&self.session);
        let clock = Arc::clone(&self.clock);
        let stats_tx = Arc::clone(&self.stats_tx);
        let body_weight_kg = self.config.body_weight_kg;
        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));

        self.tick_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let stats = {
                    let session = session.lock().expect("session lock poisoned");
                    if !session.is_running() {
                        continue;
                    }
                    session.stats(clock.now_ms(), body_weight_kg)
                };
                let _ = stats_tx.send(stats);
            }
        }));
    }

    fn halt_sampling(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
        if let Some(task) = self.ingest_task.take() {
            task.abort();
        }
        if let Some(handle) = self.watch_handle.take() {
            handle.remove();
        }
    }
}

impl Drop for RunTracker {
    fn drop(&mut self) {
        self.halt_sampling();
    }
}
