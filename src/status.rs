//! Derived status fields computed from a schedule's execution history.

use chrono::{DateTime, Utc};

use crate::crd::{SchedulePolicyType, VolumeSnapshotSchedule, VolumeSnapshotScheduleStatus};

/// Most recent successful execution across every bucket.
///
/// Only `Ready` records with a finish time count. Buckets are independent
/// so the whole history is scanned; the answer does not depend on which
/// buckets exist or in which order they are visited.
pub fn last_success_time(status: &VolumeSnapshotScheduleStatus) -> Option<DateTime<Utc>> {
    status
        .records()
        .filter(|(_, record)| record.is_ready())
        .filter_map(|(_, record)| record.finish_timestamp)
        .max()
}

/// Same as [`last_success_time`], but also names the bucket it came from.
///
/// When two buckets share the latest time the first one in bucket order wins.
pub fn last_success(
    status: &VolumeSnapshotScheduleStatus,
) -> Option<(SchedulePolicyType, DateTime<Utc>)> {
    let mut latest: Option<(SchedulePolicyType, DateTime<Utc>)> = None;
    for (bucket, record) in status.records() {
        let Some(finished) = record.finish_timestamp.filter(|_| record.is_ready()) else {
            continue;
        };
        match latest {
            Some((_, seen)) if seen >= finished => {}
            _ => latest = Some((bucket, finished)),
        }
    }
    latest
}

/// Last success of a stored schedule and its bucket, absent when it never ran.
pub fn schedule_last_success(
    schedule: &VolumeSnapshotSchedule,
) -> Option<(SchedulePolicyType, DateTime<Utc>)> {
    schedule.status.as_ref().and_then(last_success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{ScheduledSnapshotStatus, SnapshotCondition};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_empty_history_has_no_success() {
        let status = VolumeSnapshotScheduleStatus::default();
        assert_eq!(last_success_time(&status), None);
        assert_eq!(last_success(&status), None);
    }

    #[test]
    fn test_failed_and_pending_records_are_ignored() {
        let mut status = VolumeSnapshotScheduleStatus::default();
        status.append(
            SchedulePolicyType::Daily,
            ScheduledSnapshotStatus::pending("running", ts(500)),
        );
        status.append(
            SchedulePolicyType::Daily,
            ScheduledSnapshotStatus::pending("broken", ts(600)).finish(ts(700), SnapshotCondition::Error),
        );
        assert_eq!(last_success_time(&status), None);

        status.append(SchedulePolicyType::Weekly, ScheduledSnapshotStatus::ready("ok", ts(100)));
        assert_eq!(last_success_time(&status), Some(ts(100)));
    }

    #[test]
    fn test_later_bucket_wins_regardless_of_bucket_order() {
        let mut status = VolumeSnapshotScheduleStatus::default();
        status.append(SchedulePolicyType::Monthly, ScheduledSnapshotStatus::ready("m", ts(300)));
        status.append(SchedulePolicyType::Interval, ScheduledSnapshotStatus::ready("i", ts(100)));
        status.append(SchedulePolicyType::Daily, ScheduledSnapshotStatus::ready("d", ts(200)));

        assert_eq!(last_success_time(&status), Some(ts(300)));
        assert_eq!(last_success(&status), Some((SchedulePolicyType::Monthly, ts(300))));
    }

    #[test]
    fn test_tie_resolves_to_shared_timestamp() {
        let mut status = VolumeSnapshotScheduleStatus::default();
        status.append(SchedulePolicyType::Weekly, ScheduledSnapshotStatus::ready("w", ts(42)));
        status.append(SchedulePolicyType::Daily, ScheduledSnapshotStatus::ready("d", ts(42)));

        assert_eq!(last_success_time(&status), Some(ts(42)));
        assert_eq!(last_success(&status), Some((SchedulePolicyType::Daily, ts(42))));
    }

    #[test]
    fn test_out_of_order_records_within_bucket() {
        let mut status = VolumeSnapshotScheduleStatus::default();
        status.append(SchedulePolicyType::Daily, ScheduledSnapshotStatus::ready("late", ts(900)));
        status.append(SchedulePolicyType::Daily, ScheduledSnapshotStatus::ready("early", ts(10)));
        assert_eq!(last_success_time(&status), Some(ts(900)));
    }

    prop_compose! {
        fn arb_bucket()(idx in 0..4usize) -> SchedulePolicyType {
            SchedulePolicyType::ALL[idx]
        }
    }

    prop_compose! {
        fn arb_condition()(idx in 0..4u8) -> SnapshotCondition {
            match idx {
                0 => SnapshotCondition::Pending,
                1 => SnapshotCondition::Ready,
                2 => SnapshotCondition::Error,
                _ => SnapshotCondition::Unknown,
            }
        }
    }

    prop_compose! {
        fn arb_record()(
            created in 0i64..1_000_000,
            runtime in proptest::option::of(0i64..10_000),
            condition in arb_condition(),
        ) -> ScheduledSnapshotStatus {
            let record = ScheduledSnapshotStatus::pending("exec", ts(created));
            match runtime {
                Some(runtime) => record.finish(ts(created + runtime), condition),
                None => record,
            }
        }
    }

    prop_compose! {
        fn arb_status()(
            entries in proptest::collection::vec((arb_bucket(), arb_record()), 0..40)
        ) -> VolumeSnapshotScheduleStatus {
            let mut status = VolumeSnapshotScheduleStatus::default();
            for (bucket, record) in entries {
                status.append(bucket, record);
            }
            status
        }
    }

    proptest! {
        #[test]
        fn prop_matches_max_over_ready_records(status in arb_status()) {
            let mut expected: Option<DateTime<Utc>> = None;
            for records in status.items.values() {
                for record in records {
                    if record.status == SnapshotCondition::Ready {
                        if let Some(finished) = record.finish_timestamp {
                            if expected.map_or(true, |e| finished > e) {
                                expected = Some(finished);
                            }
                        }
                    }
                }
            }
            prop_assert_eq!(last_success_time(&status), expected);
            prop_assert_eq!(last_success(&status).map(|(_, t)| t), expected);
        }

        #[test]
        fn prop_idempotent(status in arb_status()) {
            prop_assert_eq!(last_success_time(&status), last_success_time(&status));
        }

        #[test]
        fn prop_monotonic_under_append(
            status in arb_status(),
            bucket in arb_bucket(),
            finished in 0i64..2_000_000,
        ) {
            let before = last_success_time(&status);
            let mut after = status.clone();
            after.append(bucket, ScheduledSnapshotStatus::ready("new", ts(finished)));
            let resolved = last_success_time(&after);

            prop_assert!(resolved >= before);
            match before {
                Some(prev) if prev >= ts(finished) => prop_assert_eq!(resolved, before),
                _ => prop_assert_eq!(resolved, Some(ts(finished))),
            }
        }
    }
}
