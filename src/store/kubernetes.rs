//! Record store backed by the Kubernetes API server.

use async_trait::async_trait;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::Client;
use tracing::debug;

use super::ScheduleStore;
use crate::crd::VolumeSnapshotSchedule;
use crate::error::{Result, ScheduleError, ValidationError};

/// Store that reads and writes `VolumeSnapshotSchedule` custom resources.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl std::fmt::Debug for KubeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStore").finish_non_exhaustive()
    }
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the in-cluster config or the local kubeconfig.
    pub async fn try_default() -> Result<Self> {
        Ok(Self::new(Client::try_default().await?))
    }

    fn api(&self, namespace: &str) -> Api<VolumeSnapshotSchedule> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// How a 409 from the API server should be read.
#[derive(Clone, Copy)]
enum OnConflict {
    AlreadyExists,
    Conflict,
}

fn map_error(err: kube::Error, name: &str, namespace: &str, on_conflict: OnConflict) -> ScheduleError {
    match &err {
        kube::Error::Api(resp) if resp.code == 404 => ScheduleError::not_found(name, namespace),
        kube::Error::Api(resp) if resp.code == 409 => match on_conflict {
            OnConflict::AlreadyExists => ScheduleError::already_exists(name, namespace),
            OnConflict::Conflict => ScheduleError::conflict(name, namespace),
        },
        _ => ScheduleError::Kube(err),
    }
}

fn namespace_of(schedule: &VolumeSnapshotSchedule) -> Result<String> {
    schedule
        .metadata
        .namespace
        .clone()
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| ValidationError::NamespaceRequired.into())
}

#[async_trait]
impl ScheduleStore for KubeStore {
    async fn create(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        let namespace = namespace_of(&schedule)?;
        let name = schedule.metadata.name.clone().unwrap_or_default();
        debug!(name = %name, namespace = %namespace, "Creating VolumeSnapshotSchedule");

        self.api(&namespace)
            .create(&PostParams::default(), &schedule)
            .await
            .map_err(|e| map_error(e, &name, &namespace, OnConflict::AlreadyExists))
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule> {
        self.api(namespace)
            .get(name)
            .await
            .map_err(|e| map_error(e, name, namespace, OnConflict::Conflict))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<VolumeSnapshotSchedule>> {
        let list = self.api(namespace).list(&ListParams::default()).await?;
        debug!(namespace = %namespace, count = list.items.len(), "Listed VolumeSnapshotSchedules");
        Ok(list.items)
    }

    async fn update(&self, schedule: VolumeSnapshotSchedule) -> Result<VolumeSnapshotSchedule> {
        let namespace = namespace_of(&schedule)?;
        let name = schedule.metadata.name.clone().unwrap_or_default();
        let body = serde_json::to_vec(&schedule)?;

        self.api(&namespace)
            .replace_status(&name, &PostParams::default(), body)
            .await
            .map_err(|e| map_error(e, &name, &namespace, OnConflict::Conflict))
    }

    async fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(|e| map_error(e, name, namespace, OnConflict::Conflict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: "boom".to_string(),
            reason: String::new(),
            code,
        })
    }

    #[test]
    fn test_map_not_found() {
        let err = map_error(api_error(404), "s1", "test", OnConflict::Conflict);
        assert!(err.is_not_found());
        assert_eq!(err.identity(), Some(("s1", "test")));
    }

    #[test]
    fn test_map_conflict_depends_on_operation() {
        let err = map_error(api_error(409), "s1", "test", OnConflict::AlreadyExists);
        assert!(matches!(err, ScheduleError::AlreadyExists { .. }));

        let err = map_error(api_error(409), "s1", "test", OnConflict::Conflict);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = map_error(api_error(500), "s1", "test", OnConflict::Conflict);
        assert!(matches!(err, ScheduleError::Kube(_)));
    }
}
