//! snapsched - policy-driven volume snapshot schedules as Kubernetes custom resources.
//!
//! A `VolumeSnapshotSchedule` names a volume claim, a cadence policy and a
//! paired cluster. An external trigger appends the outcome of every snapshot
//! attempt to the schedule's status, one history per cadence bucket
//! (interval, daily, weekly, monthly). This crate models that history,
//! derives the most recent successful execution across all buckets, and
//! resolves create/list/delete requests against a record store.
//!
//! # Architecture
//!
//! ```text
//! request ──► validation ──► selection ──► store ──► status ──► report
//!             (pure)         (names,        (kube or   (last      (rows)
//!                             claim, all)    memory)    success)
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use snapsched::selection::Selector;
//! use snapsched::service::ScheduleService;
//! use snapsched::store::KubeStore;
//!
//! #[tokio::main]
//! async fn main() -> snapsched::Result<()> {
//!     let service = ScheduleService::new(KubeStore::try_default().await?);
//!     let report = service.list("default", &Selector::all()).await?;
//!     println!("{}", snapsched::report::render_table(&report.rows));
//!     Ok(())
//! }
//! ```

pub mod crd;
pub mod error;
pub mod report;
pub mod selection;
pub mod service;
pub mod status;
pub mod store;
pub mod validation;

pub use crd::{
    SchedulePolicyType, ScheduleId, ScheduledSnapshotStatus, SnapshotCondition,
    VolumeSnapshotSchedule, VolumeSnapshotScheduleSpec, VolumeSnapshotScheduleStatus,
};
pub use error::{Result, ScheduleError, ValidationError};
pub use service::ScheduleService;
