// Test fixtures for schedule integration tests

use chrono::{DateTime, TimeZone, Utc};

use snapsched::validation::{CreateRequest, CreateTarget};

pub const NAMESPACE: &str = "test";

/// Create request with the usual test policy, claim and cluster pair.
pub fn create_request(name: &str, claim: &str) -> CreateRequest {
    CreateRequest {
        names: vec![name.to_string()],
        target: CreateTarget::Namespace(NAMESPACE.to_string()),
        schedule_policy_name: "testpolicy".to_string(),
        persistent_volume_claim_name: claim.to_string(),
        cluster_pair: "clusterpair1".to_string(),
        pre_exec_rule: Some("preExec".to_string()),
        post_exec_rule: Some("postExec".to_string()),
        enabled: true,
    }
}

/// Fixed point in time, `minutes` after a base instant.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}
