//! Get operations

use anyhow::Result;
use clap::{Args, Subcommand};
use snapsched::report::ListReport;
use snapsched::selection::Selector;
use snapsched::store::ScheduleStore;
use snapsched::ScheduleService;

use super::summarize;
use crate::client;
use crate::config::Config;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(subcommand)]
    resource: GetResource,
}

#[derive(Subcommand, Debug)]
enum GetResource {
    /// List volume snapshot schedules
    #[command(name = "snapshotschedules", visible_aliases = ["snapshotschedule", "vss"])]
    SnapshotSchedules(GetScheduleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GetScheduleArgs {
    /// Schedule names (all schedules when omitted)
    pub names: Vec<String>,

    /// Only schedules snapshotting this volume claim
    #[arg(short = 'p', long = "pvc")]
    pub pvc: Option<String>,

    /// Only schedules related to this cluster pair
    #[arg(short = 'c', long = "clusterPair")]
    pub cluster_pair: Option<String>,
}

impl GetScheduleArgs {
    pub fn selector(&self) -> Selector {
        Selector {
            names: self.names.clone(),
            volume_claim: self.pvc.clone(),
            cluster_pair: self.cluster_pair.clone(),
        }
    }
}

pub async fn execute(
    args: GetArgs,
    config: &Config,
    namespace: &str,
    format: OutputFormat,
) -> Result<()> {
    let GetResource::SnapshotSchedules(args) = args.resource;
    let service = ScheduleService::new(client::connect(config).await?);
    let report = list(&service, namespace, &args.selector()).await?;
    print_report(&report, format)
}

/// Resolve the selector into a report
pub async fn list<S: ScheduleStore>(
    service: &ScheduleService<S>,
    namespace: &str,
    selector: &Selector,
) -> Result<ListReport> {
    Ok(service.list(namespace, selector).await?)
}

/// Print rows, then any per-name failures
pub fn print_report(report: &ListReport, format: OutputFormat) -> Result<()> {
    if !report.rows.is_empty() || !report.has_failures() {
        output::print_rows(&report.rows, format)?;
    }
    for failure in &report.failures {
        output::error(failure);
    }
    summarize(
        report.failures.len(),
        report.rows.len() + report.failures.len(),
        "found",
    )
}
