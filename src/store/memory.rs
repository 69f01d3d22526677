//! In-process record store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::ScheduleStore;
use crate::crd::{ScheduleId, VolumeSnapshotSchedule};
use crate::error::{Result, ScheduleError, ValidationError};

/// Record store held in memory.
///
/// Objects are keyed by `(namespace, name)`, so a namespace lists in name
/// order like the API server does. Every write bumps a store-wide
/// `resourceVersion`; a status update carrying a stale version is rejected
/// with `Conflict`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<ScheduleId, VolumeSnapshotSchedule>>,
    version: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored schedules across all namespaces.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    fn next_version(&self) -> String {
        (self.version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

fn identity(schedule: &VolumeSnapshotSchedule) -> Result<ScheduleId> {
    let id = schedule.id();
    if id.name.is_empty() {
        return Err(ValidationError::NameRequired.into());
    }
    if id.namespace.is_empty() {
        return Err(ValidationError::NamespaceRequired.into());
    }
    Ok(id)
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn create(&self, mut schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        let id = identity(&schedule)?;
        let mut objects = self.objects.write();
        if objects.contains_key(&id) {
            return Err(ScheduleError::already_exists(id.name, id.namespace));
        }

        schedule.metadata.resource_version = Some(self.next_version());
        objects.insert(id.clone(), schedule.clone());
        debug!(name = %id.name, namespace = %id.namespace, "Stored schedule");
        Ok(schedule)
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule> {
        self.objects
            .read()
            .get(&ScheduleId::new(namespace, name))
            .cloned()
            .ok_or_else(|| ScheduleError::not_found(name, namespace))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<VolumeSnapshotSchedule>> {
        Ok(self
            .objects
            .read()
            .iter()
            .filter(|(id, _)| id.namespace == namespace)
            .map(|(_, schedule)| schedule.clone())
            .collect())
    }

    async fn update(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        let id = identity(&schedule)?;
        let mut objects = self.objects.write();
        let stored = objects
            .get_mut(&id)
            .ok_or_else(|| ScheduleError::not_found(&id.name, &id.namespace))?;

        if let Some(version) = schedule.metadata.resource_version.as_deref() {
            if stored.metadata.resource_version.as_deref() != Some(version) {
                return Err(ScheduleError::conflict(id.name, id.namespace));
            }
        }

        stored.status = schedule.status;
        stored.metadata.resource_version = Some(self.next_version());
        debug!(
            name = %id.name,
            namespace = %id.namespace,
            version = ?stored.metadata.resource_version,
            "Updated schedule status"
        );
        Ok(stored.clone())
    }

    async fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        self.objects
            .write()
            .remove(&ScheduleId::new(namespace, name))
            .map(|_| ())
            .ok_or_else(|| ScheduleError::not_found(name, namespace))
    }
}
