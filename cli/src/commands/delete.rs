//! Delete operations

use anyhow::Result;
use clap::{Args, Subcommand};
use snapsched::error::ScheduleError;
use snapsched::report::NO_RESOURCES_FOUND;
use snapsched::selection::Selector;
use snapsched::service::ItemOutcome;
use snapsched::store::ScheduleStore;
use snapsched::validation::{validate_delete, DeleteRequest};
use snapsched::ScheduleService;

use super::summarize;
use crate::client;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(subcommand)]
    resource: DeleteResource,
}

#[derive(Subcommand, Debug)]
enum DeleteResource {
    /// Delete volume snapshot schedules
    #[command(name = "snapshotschedules", visible_aliases = ["snapshotschedule", "vss"])]
    SnapshotSchedules(DeleteScheduleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeleteScheduleArgs {
    /// Schedule names
    pub names: Vec<String>,

    /// Delete every schedule snapshotting this volume claim
    #[arg(short = 'p', long = "pvc")]
    pub pvc: Option<String>,

    /// Delete every schedule related to this cluster pair
    #[arg(short = 'c', long = "clusterPair")]
    pub cluster_pair: Option<String>,
}

impl DeleteScheduleArgs {
    pub fn into_request(self, namespace: &str) -> DeleteRequest {
        DeleteRequest {
            namespace: namespace.to_string(),
            selector: Selector {
                names: self.names,
                volume_claim: self.pvc,
                cluster_pair: self.cluster_pair,
            },
        }
    }
}

pub async fn execute(args: DeleteArgs, config: &Config, namespace: &str) -> Result<()> {
    let DeleteResource::SnapshotSchedules(args) = args.resource;
    let req = args.into_request(namespace);

    // Reject an empty selector before connecting to the cluster
    validate_delete(&req)?;

    let service = ScheduleService::new(client::connect(config).await?);
    delete(&service, &req).await
}

/// Messages for a finished delete: one line per removed schedule, or the
/// "no resources" line when nothing matched, plus the per-item errors
pub fn delete_messages(outcomes: Vec<ItemOutcome<()>>) -> (Vec<String>, Vec<ScheduleError>) {
    if outcomes.is_empty() {
        return (vec![NO_RESOURCES_FOUND.to_string()], Vec::new());
    }

    let mut lines = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(()) => lines.push(format!(
                "VolumeSnapshotSchedule {} deleted successfully",
                outcome.id.name
            )),
            Err(e) => errors.push(e),
        }
    }
    (lines, errors)
}

/// Delete selected schedules, reporting each one
pub async fn delete<S: ScheduleStore>(service: &ScheduleService<S>, req: &DeleteRequest) -> Result<()> {
    let outcomes = service.delete(req).await?;
    let total = outcomes.len();
    let (lines, errors) = delete_messages(outcomes);

    for line in &lines {
        output::success(line);
    }
    for e in &errors {
        output::error(e);
    }

    summarize(errors.len(), total, "deleted")
}
