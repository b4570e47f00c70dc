// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use stride_tracker::models::{NewRun, Run};
use stride_tracker::services::{
    LocationError, LocationProvider, PermissionStatus, PositionSample, WatchHandle, WatchOptions,
};
use stride_tracker::store::{RunStore, StoreError};

/// Location provider driven by the test: samples are injected with
/// `emit`, so arrival timing and coordinates are fully controlled.
#[allow(dead_code)]
pub struct ManualLocationProvider {
    permission: PermissionStatus,
    fail_watch: AtomicBool,
    sender: Mutex<Option<mpsc::Sender<PositionSample>>>,
}

#[allow(dead_code)]
impl ManualLocationProvider {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Granted,
            fail_watch: AtomicBool::new(false),
            sender: Mutex::new(None),
        })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Denied,
            fail_watch: AtomicBool::new(false),
            sender: Mutex::new(None),
        })
    }

    /// Make the next `watch_position` call fail.
    pub fn fail_next_watch(&self) {
        self.fail_watch.store(true, Ordering::SeqCst);
    }

    /// Inject one synthetic sample into the active watch.
    pub async fn emit(&self, latitude: f64, longitude: f64) {
        let sender = self
            .sender
            .lock()
            .expect("sender lock poisoned")
            .clone()
            .expect("no active watch to emit into");
        sender
            .send(PositionSample {
                latitude,
                longitude,
            })
            .await
            .expect("tracker dropped the sample channel");
    }

    pub fn has_active_watch(&self) -> bool {
        self.sender.lock().expect("sender lock poisoned").is_some()
    }
}

#[async_trait]
impl LocationProvider for ManualLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn watch_position(
        &self,
        _options: WatchOptions,
        samples: mpsc::Sender<PositionSample>,
    ) -> Result<WatchHandle, LocationError> {
        if self.fail_watch.swap(false, Ordering::SeqCst) {
            return Err(LocationError::WatchFailed("gps unavailable".to_string()));
        }

        *self.sender.lock().expect("sender lock poisoned") = Some(samples);
        Ok(WatchHandle::new(|| {}))
    }
}

/// Store wrapper that counts saves and can be told to reject writes.
#[derive(Default)]
#[allow(dead_code)]
pub struct CountingStore {
    inner: stride_tracker::store::MemoryRunStore,
    save_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RunStore for CountingStore {
    async fn save_run(&self, run: &NewRun) -> Result<Run, StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("backend offline".to_string()));
        }
        self.inner.save_run(run).await
    }

    async fn get_run(&self, id: uuid::Uuid) -> Result<Option<Run>, StoreError> {
        self.inner.get_run(id).await
    }

    async fn list_runs(&self) -> Result<Vec<Run>, StoreError> {
        self.inner.list_runs().await
    }
}

/// Poll until the tracker has recorded `expected` route points.
#[allow(dead_code)]
pub async fn wait_for_route_len(tracker: &stride_tracker::services::RunTracker, expected: usize) {
    for _ in 0..500 {
        if tracker.route().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!(
        "route never reached {} points (got {})",
        expected,
        tracker.route().len()
    );
}
