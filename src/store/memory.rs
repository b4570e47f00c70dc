// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory run store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{NewRun, Run};
use crate::store::{RunStore, StoreError};

/// In-memory [`RunStore`] backed by a concurrent map.
///
/// Used by the demo binary and tests; a product deployment would put a
/// real backend behind the same trait.
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    runs: DashMap<Uuid, Run>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[async_trait]
impl RunStore for MemoryRunStore {
    async fn save_run(&self, run: &NewRun) -> Result<Run, StoreError> {
        let id = Uuid::new_v4();
        let stored = Run::from_new(id, run.clone());
        self.runs.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_run(&self, id: Uuid) -> Result<Option<Run>, StoreError> {
        Ok(self.runs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_runs(&self) -> Result<Vec<Run>, StoreError> {
        let mut runs: Vec<Run> = self
            .runs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        runs.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EffortLevel;

    fn new_run(distance_km: f64, recorded_at: &str) -> NewRun {
        NewRun {
            distance_km,
            duration_s: 600,
            average_pace_min_per_km: 6.0,
            calories: 100,
            route: vec![],
            effort_level: EffortLevel::Easy,
            mood_rating: 4,
            recorded_at: recorded_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_roundtrips() {
        let store = MemoryRunStore::new();
        let saved = store
            .save_run(&new_run(5.0, "2026-08-07T10:00:00Z"))
            .await
            .expect("save should succeed");

        let fetched = store
            .get_run(saved.id)
            .await
            .expect("get should succeed")
            .expect("run should exist");
        assert_eq!(fetched.distance_km, 5.0);
        assert_eq!(fetched.id, saved.id);

        assert!(store
            .get_run(Uuid::new_v4())
            .await
            .expect("get should succeed")
            .is_none());
    }

    #[tokio::test]
    async fn test_list_runs_newest_first() {
        let store = MemoryRunStore::new();
        store
            .save_run(&new_run(1.0, "2026-08-05T10:00:00Z"))
            .await
            .unwrap();
        store
            .save_run(&new_run(2.0, "2026-08-07T10:00:00Z"))
            .await
            .unwrap();
        store
            .save_run(&new_run(3.0, "2026-08-06T10:00:00Z"))
            .await
            .unwrap();

        let runs = store.list_runs().await.expect("list should succeed");
        let distances: Vec<f64> = runs.iter().map(|r| r.distance_km).collect();
        assert_eq!(distances, vec![2.0, 3.0, 1.0]);
    }
}
