// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Location provider capability.
//!
//! The tracker treats position sampling as a capability: something that
//! can answer a permission request and push samples into a channel until
//! the watch handle is removed. Platform integrations implement
//! [`LocationProvider`]; [`ScriptedLocationProvider`] replays a fixed
//! route for demos, and tests implement the trait to inject synthetic
//! samples with controlled timing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Position fix delivered by a location provider.
///
/// The tracker stamps the arrival time itself, so providers only carry
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Sampling hints passed to [`LocationProvider::watch_position`].
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Requested minimum time between samples (ms)
    pub time_interval_ms: u64,
    /// Requested minimum movement between samples (meters)
    pub distance_interval_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            time_interval_ms: 1000,
            distance_interval_m: 5.0,
        }
    }
}

/// Errors from location providers.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Failed to start position watch: {0}")]
    WatchFailed(String),
}

/// Cancellable handle to an active position watch.
///
/// `remove()` stops delivery; dropping the handle does the same, so a
/// tracker torn down mid-run cannot leak the watch.
pub struct WatchHandle {
    canceller: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchHandle {
    pub fn new(canceller: impl FnOnce() + Send + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    /// Stop delivering samples.
    pub fn remove(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.canceller.take() {
            cancel();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.canceller.is_some())
            .finish()
    }
}

/// Capability for requesting location access and streaming position
/// updates.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for location access.
    async fn request_permission(&self) -> PermissionStatus;

    /// Begin streaming samples into `samples` until the returned handle
    /// is removed.
    async fn watch_position(
        &self,
        options: WatchOptions,
        samples: mpsc::Sender<PositionSample>,
    ) -> Result<WatchHandle, LocationError>;
}

/// Replays a scripted sequence of samples on a fixed cadence.
///
/// The script cursor survives across watch calls, so a pause/resume cycle
/// continues the route instead of restarting it.
pub struct ScriptedLocationProvider {
    script: Arc<Vec<PositionSample>>,
    cursor: Arc<Mutex<usize>>,
    sample_delay: Duration,
    permission: PermissionStatus,
}

impl ScriptedLocationProvider {
    pub fn new(script: Vec<PositionSample>, sample_delay: Duration) -> Self {
        Self {
            script: Arc::new(script),
            cursor: Arc::new(Mutex::new(0)),
            sample_delay,
            permission: PermissionStatus::Granted,
        }
    }

    /// A provider whose permission request is always denied.
    pub fn without_permission() -> Self {
        Self {
            script: Arc::new(Vec::new()),
            cursor: Arc::new(Mutex::new(0)),
            sample_delay: Duration::from_millis(0),
            permission: PermissionStatus::Denied,
        }
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn watch_position(
        &self,
        _options: WatchOptions,
        samples: mpsc::Sender<PositionSample>,
    ) -> Result<WatchHandle, LocationError> {
        if self.permission == PermissionStatus::Denied {
            return Err(LocationError::WatchFailed(
                "location permission not granted".to_string(),
            ));
        }

        let script = Arc::clone(&self.script);
        let cursor = Arc::clone(&self.cursor);
        let delay = self.sample_delay;
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                let next = {
                    let mut position = cursor.lock().expect("script cursor lock poisoned");
                    if *position >= script.len() {
                        break;
                    }
                    let sample = script[*position];
                    *position += 1;
                    sample
                };
                if samples.send(next).await.is_err() {
                    break; // receiver gone, stop replaying
                }
            }
        });

        Ok(WatchHandle::new(move || task.abort()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(latitude: f64, longitude: f64) -> PositionSample {
        PositionSample {
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedLocationProvider::new(
            vec![sample(1.0, 2.0), sample(3.0, 4.0)],
            Duration::from_millis(1),
        );
        let (tx, mut rx) = mpsc::channel(8);

        let handle = provider
            .watch_position(WatchOptions::default(), tx)
            .await
            .expect("watch should start");

        assert_eq!(rx.recv().await, Some(sample(1.0, 2.0)));
        assert_eq!(rx.recv().await, Some(sample(3.0, 4.0)));
        // Script exhausted, sender dropped
        assert_eq!(rx.recv().await, None);
        handle.remove();
    }

    #[tokio::test]
    async fn test_cursor_survives_rewatch() {
        // Slow cadence: the watch is removed while the replay task is
        // sleeping, before it can consume the second sample.
        let provider = ScriptedLocationProvider::new(
            vec![sample(1.0, 0.0), sample(2.0, 0.0)],
            Duration::from_millis(100),
        );

        let (tx, mut rx) = mpsc::channel(8);
        let handle = provider
            .watch_position(WatchOptions::default(), tx)
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(sample(1.0, 0.0)));
        handle.remove();

        let (tx, mut rx) = mpsc::channel(8);
        let _handle = provider
            .watch_position(WatchOptions::default(), tx)
            .await
            .unwrap();
        // Continues where the first watch left off
        assert_eq!(rx.recv().await, Some(sample(2.0, 0.0)));
    }

    #[tokio::test]
    async fn test_denied_provider_refuses_watch() {
        let provider = ScriptedLocationProvider::without_permission();
        assert_eq!(provider.request_permission().await, PermissionStatus::Denied);

        let (tx, _rx) = mpsc::channel(8);
        let result = provider.watch_position(WatchOptions::default(), tx).await;
        assert!(result.is_err());
    }
}
