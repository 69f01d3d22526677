//! Custom Resource Definition for volume snapshot schedules.
//!
//! A [`VolumeSnapshotSchedule`] pairs an immutable spec (which claim to
//! snapshot, under which policy, towards which cluster pair) with an
//! append-only execution history kept per cadence bucket.

use chrono::{DateTime, Utc};
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// API group of the schedule resource.
pub const GROUP: &str = "stork.libopenstorage.org";

/// API version of the schedule resource.
pub const VERSION: &str = "v1alpha1";

/// Kind of the schedule resource.
pub const KIND: &str = "VolumeSnapshotSchedule";

/// Fully qualified plural, as the API server reports it in errors.
pub const PLURAL_GROUP: &str = "volumesnapshotschedules.stork.libopenstorage.org";

// ============================================================================
// VolumeSnapshotSchedule CRD
// ============================================================================

/// VolumeSnapshotSchedule takes policy-driven snapshots of one volume claim
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "stork.libopenstorage.org",
    version = "v1alpha1",
    kind = "VolumeSnapshotSchedule",
    plural = "volumesnapshotschedules",
    shortname = "vss",
    status = "VolumeSnapshotScheduleStatus",
    namespaced,
    printcolumn = r#"{"name":"PolicyName","type":"string","jsonPath":".spec.schedulePolicyName"}"#,
    printcolumn = r#"{"name":"ClusterPair","type":"string","jsonPath":".spec.clusterPair"}"#,
    printcolumn = r#"{"name":"Enabled","type":"boolean","jsonPath":".spec.enabled"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSnapshotScheduleSpec {
    /// Cadence policy that decides which buckets are active
    pub schedule_policy_name: String,

    /// Volume claim this schedule snapshots
    #[serde(default)]
    pub persistent_volume_claim_name: String,

    /// Paired cluster the snapshots relate to
    pub cluster_pair: String,

    /// Rule run before each snapshot attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_exec_rule: Option<String>,

    /// Rule run after each snapshot attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_exec_rule: Option<String>,

    /// Disabled schedules are kept but never triggered
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Cadence bucket an execution belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SchedulePolicyType {
    Interval,
    Daily,
    Weekly,
    Monthly,
}

impl SchedulePolicyType {
    pub const ALL: [SchedulePolicyType; 4] = [
        SchedulePolicyType::Interval,
        SchedulePolicyType::Daily,
        SchedulePolicyType::Weekly,
        SchedulePolicyType::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interval => "Interval",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for SchedulePolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single snapshot execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub enum SnapshotCondition {
    #[default]
    Pending,
    Ready,
    Error,
    Unknown,
}

/// One attempted or completed snapshot execution
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSnapshotStatus {
    /// Execution identifier
    pub name: String,

    /// When the execution was started
    pub creation_timestamp: DateTime<Utc>,

    /// When the execution finished, unset while in progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_timestamp: Option<DateTime<Utc>>,

    /// Execution outcome
    #[serde(default)]
    pub status: SnapshotCondition,
}

impl ScheduledSnapshotStatus {
    /// An execution that has started but not finished.
    pub fn pending(name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            creation_timestamp: created,
            finish_timestamp: None,
            status: SnapshotCondition::Pending,
        }
    }

    /// Mark the execution finished with the given outcome.
    ///
    /// A finish time earlier than the creation time is clamped to it.
    pub fn finish(mut self, at: DateTime<Utc>, status: SnapshotCondition) -> Self {
        self.finish_timestamp = Some(at.max(self.creation_timestamp));
        self.status = status;
        self
    }

    /// An execution that started and succeeded at `at`.
    pub fn ready(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::pending(name, at).finish(at, SnapshotCondition::Ready)
    }

    pub fn is_ready(&self) -> bool {
        self.status == SnapshotCondition::Ready
    }
}

/// Execution history of a schedule, kept per cadence bucket
///
/// Records inside a bucket are in insertion (chronological) order. There is
/// no ordering across buckets.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSnapshotScheduleStatus {
    #[serde(default)]
    pub items: BTreeMap<SchedulePolicyType, Vec<ScheduledSnapshotStatus>>,
}

impl VolumeSnapshotScheduleStatus {
    /// Append a record to the end of a bucket, creating the bucket if needed.
    pub fn append(&mut self, bucket: SchedulePolicyType, record: ScheduledSnapshotStatus) {
        self.items.entry(bucket).or_default().push(record);
    }

    /// Records of one bucket, oldest first.
    pub fn bucket(&self, bucket: SchedulePolicyType) -> &[ScheduledSnapshotStatus] {
        self.items.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every record paired with the bucket it lives in.
    pub fn records(&self) -> impl Iterator<Item = (SchedulePolicyType, &ScheduledSnapshotStatus)> {
        self.items
            .iter()
            .flat_map(|(bucket, records)| records.iter().map(move |r| (*bucket, r)))
    }

    /// Total number of records across buckets.
    pub fn len(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Identity
// ============================================================================

/// `(namespace, name)` identity of a schedule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleId {
    pub namespace: String,
    pub name: String,
}

impl ScheduleId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl VolumeSnapshotSchedule {
    /// Build a namespaced schedule object ready to be created.
    pub fn namespaced(
        name: &str,
        namespace: &str,
        spec: VolumeSnapshotScheduleSpec,
    ) -> VolumeSnapshotSchedule {
        let mut schedule = VolumeSnapshotSchedule::new(name, spec);
        schedule.metadata.namespace = Some(namespace.to_string());
        schedule
    }

    pub fn id(&self) -> ScheduleId {
        ScheduleId::new(self.namespace().unwrap_or_default(), self.name_any())
    }

    /// Execution history, empty when the status was never written.
    pub fn history(&self) -> VolumeSnapshotScheduleStatus {
        self.status.clone().unwrap_or_default()
    }
}
