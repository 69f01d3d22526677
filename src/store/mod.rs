//! Record store contract for schedule objects.
//!
//! The store owns persistence and existence semantics. Everything above it
//! treats a single store call as the unit of atomicity; there are no
//! transactions spanning several schedules.

mod kubernetes;
mod memory;

pub use kubernetes::KubeStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::sync::Arc;

use crate::crd::VolumeSnapshotSchedule;
use crate::error::Result;

/// Persistence for [`VolumeSnapshotSchedule`] objects keyed by
/// `(name, namespace)`.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Create a schedule. Fails with `AlreadyExists` if the identity is taken.
    async fn create(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule>;

    /// Fetch a schedule. Fails with `NotFound` if absent.
    async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule>;

    /// All schedules in a namespace, in the store's listing order.
    async fn list(&self, namespace: &str) -> Result<Vec<VolumeSnapshotSchedule>>;

    /// Persist the status of a schedule.
    ///
    /// Fails with `Conflict` when the object changed since it was read and
    /// with `NotFound` when it no longer exists. The spec is immutable after
    /// create and is not written.
    async fn update(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule>;

    /// Delete a schedule together with its status. Fails with `NotFound` if absent.
    async fn delete(&self, name: &str, namespace: &str) -> Result<()>;
}

#[async_trait]
impl<S: ScheduleStore + ?Sized> ScheduleStore for Arc<S> {
    async fn create(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        (**self).create(schedule).await
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule> {
        (**self).get(name, namespace).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<VolumeSnapshotSchedule>> {
        (**self).list(namespace).await
    }

    async fn update(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        (**self).update(schedule).await
    }

    async fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        (**self).delete(name, namespace).await
    }
}
