//! Report rows for listing schedules.
//!
//! Rows are typed; the frontend chooses between a table and a structured
//! (JSON/YAML) rendering. An empty report is a distinct outcome rather than
//! an empty table.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::crd::{SchedulePolicyType, VolumeSnapshotSchedule};
use crate::error::{Result, ScheduleError};
use crate::status::schedule_last_success;

/// Message printed when a request matched no schedules.
pub const NO_RESOURCES_FOUND: &str = "No resources found.";

/// Layout used for timestamps in tables: RFC 822 with a numeric zone.
pub const TIME_FORMAT: &str = "%d %b %y %H:%M %z";

/// One line of a schedule listing.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "POLICYNAME")]
    pub policy_name: String,

    #[tabled(rename = "CLUSTERPAIR")]
    pub cluster_pair: String,

    #[tabled(rename = "LAST-SUCCESS-TIME", display_with = "display_time")]
    pub last_success_time: Option<DateTime<Utc>>,

    /// Bucket the last success was recorded in. Structured output only.
    #[tabled(skip)]
    pub last_success_policy: Option<SchedulePolicyType>,
}

impl From<&VolumeSnapshotSchedule> for ScheduleRow {
    fn from(schedule: &VolumeSnapshotSchedule) -> Self {
        let last = schedule_last_success(schedule);
        Self {
            name: schedule.id().name,
            policy_name: schedule.spec.schedule_policy_name.clone(),
            cluster_pair: schedule.spec.cluster_pair.clone(),
            last_success_time: last.map(|(_, time)| time),
            last_success_policy: last.map(|(bucket, _)| bucket),
        }
    }
}

/// Render a timestamp in local time, or nothing when absent.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.with_timezone(&Local).format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn display_time(time: &Option<DateTime<Utc>>) -> String {
    format_time(*time)
}

/// Result of a list request.
///
/// Rows keep selection order. Per-identity lookup failures (names that do
/// not exist) are collected next to the rows instead of aborting the list.
#[derive(Debug, Default)]
pub struct ListReport {
    pub rows: Vec<ScheduleRow>,
    pub failures: Vec<ScheduleError>,
}

impl ListReport {
    /// True when nothing matched and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Borderless, kubectl-like table with a header line.
pub fn render_table(rows: &[ScheduleRow]) -> String {
    if rows.is_empty() {
        return NO_RESOURCES_FOUND.to_string();
    }
    Table::new(rows).with(Style::blank()).to_string()
}

pub fn render_json(rows: &[ScheduleRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn render_yaml(rows: &[ScheduleRow]) -> Result<String> {
    Ok(serde_yaml::to_string(rows)?)
}
