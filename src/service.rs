//! Request handling: validation, selection, store calls and reporting.
//!
//! Each request runs as one sequential pass. Bulk operations iterate and
//! report per identity; nothing is batched atomically and nothing is
//! retried.

use tracing::{debug, info, warn};

use crate::crd::{
    SchedulePolicyType, ScheduleId, ScheduledSnapshotStatus, VolumeSnapshotSchedule,
};
use crate::error::Result;
use crate::report::{ListReport, ScheduleRow};
use crate::selection::{resolve, Selection, Selector};
use crate::status::last_success_time;
use crate::store::ScheduleStore;
use crate::validation::{validate_create, validate_delete, CreateRequest, DeleteRequest};

/// Outcome for one identity of a bulk request.
#[derive(Debug)]
pub struct ItemOutcome<T> {
    pub id: ScheduleId,
    pub result: Result<T>,
}

impl<T> ItemOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Schedule operations over a record store.
#[derive(Debug, Clone)]
pub struct ScheduleService<S> {
    store: S,
}

impl<S: ScheduleStore> ScheduleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the requested schedule in every target namespace.
    ///
    /// Validation failures return before the store is called. Store
    /// failures (such as `AlreadyExists`) are reported per namespace.
    pub async fn create(&self, req: &CreateRequest) -> Result<Vec<ItemOutcome<VolumeSnapshotSchedule>>> {
        validate_create(req)?;

        let name = &req.names[0];
        let spec = req.to_spec();
        let mut outcomes = Vec::new();

        for namespace in req.target.namespaces() {
            let schedule = VolumeSnapshotSchedule::namespaced(name, namespace, spec.clone());
            let result = self.store.create(schedule).await;
            match &result {
                Ok(_) => info!(
                    name = %name,
                    namespace = %namespace,
                    policy = %spec.schedule_policy_name,
                    "Created VolumeSnapshotSchedule"
                ),
                Err(e) => warn!(name = %name, namespace = %namespace, error = %e, "Create failed"),
            }
            outcomes.push(ItemOutcome {
                id: ScheduleId::new(namespace, name.as_str()),
                result,
            });
        }

        Ok(outcomes)
    }

    /// Fetch one schedule.
    pub async fn get(&self, name: &str, namespace: &str) -> Result<VolumeSnapshotSchedule> {
        self.store.get(name, namespace).await
    }

    /// List schedules matching a selector as report rows.
    ///
    /// A name that does not exist becomes a failure entry and does not stop
    /// the others. Matching nothing is an empty report, not an error.
    pub async fn list(&self, namespace: &str, selector: &Selector) -> Result<ListReport> {
        let mut report = ListReport::default();

        match resolve(&self.store, namespace, selector).await? {
            Selection::Named(ids) => {
                for id in ids {
                    match self.store.get(&id.name, &id.namespace).await {
                        Ok(schedule) => report.rows.push(ScheduleRow::from(&schedule)),
                        Err(e) if e.is_not_found() => {
                            debug!(name = %id.name, namespace = %id.namespace, "Schedule not found");
                            report.failures.push(e);
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            Selection::Listed(schedules) => {
                report.rows = schedules.iter().map(ScheduleRow::from).collect();
            }
        }

        Ok(report)
    }

    /// Delete every schedule the request selects.
    ///
    /// Each identity is deleted independently; a missing one is reported
    /// and the rest are still processed.
    pub async fn delete(&self, req: &DeleteRequest) -> Result<Vec<ItemOutcome<()>>> {
        validate_delete(req)?;

        let selection = resolve(&self.store, &req.namespace, &req.selector).await?;
        let mut outcomes = Vec::with_capacity(selection.len());

        for id in selection.ids() {
            let result = self.store.delete(&id.name, &id.namespace).await;
            match &result {
                Ok(()) => info!(name = %id.name, namespace = %id.namespace, "Deleted VolumeSnapshotSchedule"),
                Err(e) => warn!(name = %id.name, namespace = %id.namespace, error = %e, "Delete failed"),
            }
            outcomes.push(ItemOutcome { id, result });
        }

        Ok(outcomes)
    }

    /// Append an execution record to one bucket of a schedule's history.
    ///
    /// Reads the schedule, appends, and writes the status back. A concurrent
    /// writer makes this fail with `Conflict`; re-fetching and retrying is up
    /// to the caller.
    pub async fn record_execution(
        &self,
        name: &str,
        namespace: &str,
        bucket: SchedulePolicyType,
        record: ScheduledSnapshotStatus,
    ) -> Result<VolumeSnapshotSchedule> {
        let mut schedule = self.store.get(name, namespace).await?;
        let mut status = schedule.history();

        debug!(
            name = %name,
            namespace = %namespace,
            bucket = %bucket,
            execution = %record.name,
            "Recording execution"
        );
        status.append(bucket, record);
        debug!(
            name = %name,
            last_success = ?last_success_time(&status),
            "Resolved last success after append"
        );
        schedule.status = Some(status);

        self.store.update(schedule).await.inspect_err(|e| {
            if e.is_retryable() {
                warn!(name = %name, namespace = %namespace, "Status update lost a race");
            }
        })
    }
}
