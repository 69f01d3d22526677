//! Create operations

use anyhow::Result;
use clap::{Args, Subcommand};
use snapsched::store::ScheduleStore;
use snapsched::validation::{validate_create, CreateRequest, CreateTarget};
use snapsched::ScheduleService;

use super::summarize;
use crate::client;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(subcommand)]
    resource: CreateResource,
}

#[derive(Subcommand, Debug)]
enum CreateResource {
    /// Create a volume snapshot schedule
    #[command(name = "snapshotschedules", visible_aliases = ["snapshotschedule", "vss"])]
    SnapshotSchedules(CreateScheduleArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateScheduleArgs {
    /// Schedule name (exactly one)
    pub names: Vec<String>,

    /// Schedule policy to use
    #[arg(short = 's', long = "policyName", default_value = "")]
    pub policy_name: String,

    /// Volume claim to snapshot
    #[arg(short = 'p', long = "pvc", default_value = "")]
    pub pvc: String,

    /// Cluster pair the snapshots relate to
    #[arg(short = 'c', long = "clusterPair", default_value = "")]
    pub cluster_pair: String,

    /// Rule to run before each snapshot
    #[arg(long = "preExecRule")]
    pub pre_exec_rule: Option<String>,

    /// Rule to run after each snapshot
    #[arg(long = "postExecRule")]
    pub post_exec_rule: Option<String>,

    /// Whether the schedule is enabled
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub enabled: bool,

    /// Create the schedule in each of these namespaces
    #[arg(long, value_delimiter = ',', num_args = 0..=1)]
    pub namespaces: Option<Vec<String>>,
}

impl CreateScheduleArgs {
    /// Build the library request, placing it in `namespace` unless bulk
    /// namespaces were given
    pub fn into_request(self, namespace: &str) -> CreateRequest {
        let target = match self.namespaces {
            Some(list) => CreateTarget::Namespaces(list.into_iter().filter(|ns| !ns.is_empty()).collect()),
            None => CreateTarget::Namespace(namespace.to_string()),
        };

        CreateRequest {
            names: self.names,
            target,
            schedule_policy_name: self.policy_name,
            persistent_volume_claim_name: self.pvc,
            cluster_pair: self.cluster_pair,
            pre_exec_rule: self.pre_exec_rule,
            post_exec_rule: self.post_exec_rule,
            enabled: self.enabled,
        }
    }
}

pub async fn execute(args: CreateArgs, config: &Config, namespace: &str) -> Result<()> {
    let CreateResource::SnapshotSchedules(args) = args.resource;
    let req = args.into_request(namespace);

    // Reject incomplete requests before connecting to the cluster
    validate_create(&req)?;

    let service = ScheduleService::new(client::connect(config).await?);
    create(&service, &req).await
}

/// Create schedules and report each namespace's outcome
pub async fn create<S: ScheduleStore>(service: &ScheduleService<S>, req: &CreateRequest) -> Result<()> {
    let outcomes = service.create(req).await?;
    let total = outcomes.len();
    let mut failed = 0;

    for outcome in outcomes {
        match outcome.result {
            Ok(_) => output::success(format!(
                "VolumeSnapshotSchedule {} created successfully",
                outcome.id.name
            )),
            Err(e) => {
                failed += 1;
                output::error(e);
            }
        }
    }

    summarize(failed, total, "created")
}
