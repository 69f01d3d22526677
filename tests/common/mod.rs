//! Common test utilities for integration tests.

pub mod fixtures;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use snapsched::store::{MemoryStore, ScheduleStore};
use snapsched::{Result, VolumeSnapshotSchedule};

pub use fixtures::*;

/// Store wrapper that counts every call reaching the inner store.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScheduleStore for CountingStore {
    async fn create(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        self.tick();
        self.inner.create(schedule).await
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule> {
        self.tick();
        self.inner.get(name, namespace).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<VolumeSnapshotSchedule>> {
        self.tick();
        self.inner.list(namespace).await
    }

    async fn update(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        self.tick();
        self.inner.update(schedule).await
    }

    async fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        self.tick();
        self.inner.delete(name, namespace).await
    }
}
