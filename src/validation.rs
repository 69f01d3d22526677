//! Precondition checks for create and delete requests.
//!
//! Validation is pure: it runs before any record store call and never
//! touches the store itself.

use serde::{Deserialize, Serialize};

use crate::crd::VolumeSnapshotScheduleSpec;
use crate::error::ValidationError;
use crate::selection::Selector;

/// Where a create request places its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateTarget {
    /// One schedule in one namespace.
    Namespace(String),
    /// The same schedule in each listed namespace.
    Namespaces(Vec<String>),
}

impl CreateTarget {
    /// Namespaces to create in, in the order given.
    pub fn namespaces(&self) -> Vec<&str> {
        match self {
            CreateTarget::Namespace(ns) => vec![ns.as_str()],
            CreateTarget::Namespaces(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

/// Request to create a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Positional names; exactly one is accepted.
    pub names: Vec<String>,
    pub target: CreateTarget,
    pub schedule_policy_name: String,
    pub persistent_volume_claim_name: String,
    pub cluster_pair: String,
    pub pre_exec_rule: Option<String>,
    pub post_exec_rule: Option<String>,
    pub enabled: bool,
}

impl CreateRequest {
    /// Schedule spec carried by the request.
    pub fn to_spec(&self) -> VolumeSnapshotScheduleSpec {
        VolumeSnapshotScheduleSpec {
            schedule_policy_name: self.schedule_policy_name.clone(),
            persistent_volume_claim_name: self.persistent_volume_claim_name.clone(),
            cluster_pair: self.cluster_pair.clone(),
            pre_exec_rule: non_empty(self.pre_exec_rule.as_deref()),
            post_exec_rule: non_empty(self.post_exec_rule.as_deref()),
            enabled: self.enabled,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Request to delete schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub namespace: String,
    pub selector: Selector,
}

/// Check a create request.
///
/// Checks run in a fixed order and the first failure is returned: name,
/// cluster pair, namespace, then policy.
pub fn validate_create(req: &CreateRequest) -> Result<(), ValidationError> {
    if req.names.len() != 1 || req.names[0].trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if req.cluster_pair.trim().is_empty() {
        return Err(ValidationError::ClusterPairRequired);
    }

    let namespaces = req.target.namespaces();
    if namespaces.is_empty() || namespaces.iter().any(|ns| ns.trim().is_empty()) {
        return Err(ValidationError::NamespaceRequired);
    }

    if req.schedule_policy_name.trim().is_empty() {
        return Err(ValidationError::PolicyRequired);
    }

    Ok(())
}

/// Check a delete request: it must name schedules or filter by claim or
/// cluster pair.
pub fn validate_delete(req: &DeleteRequest) -> Result<(), ValidationError> {
    if req.selector.is_all() {
        return Err(ValidationError::SelectorRequired);
    }
    if req.namespace.trim().is_empty() {
        return Err(ValidationError::NamespaceRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateRequest {
        CreateRequest {
            names: vec!["s1".to_string()],
            target: CreateTarget::Namespace("test".to_string()),
            schedule_policy_name: "p1".to_string(),
            persistent_volume_claim_name: "pvc1".to_string(),
            cluster_pair: "cp1".to_string(),
            pre_exec_rule: Some("preExec".to_string()),
            post_exec_rule: Some(String::new()),
            enabled: true,
        }
    }

    #[test]
    fn test_valid_create() {
        let req = create_request();
        assert_eq!(validate_create(&req), Ok(()));

        let spec = req.to_spec();
        assert_eq!(spec.pre_exec_rule.as_deref(), Some("preExec"));
        assert_eq!(spec.post_exec_rule, None);
    }

    #[test]
    fn test_create_requires_exactly_one_name() {
        let mut req = create_request();
        req.names.clear();
        assert_eq!(validate_create(&req), Err(ValidationError::NameRequired));

        req.names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(validate_create(&req), Err(ValidationError::NameRequired));
    }

    #[test]
    fn test_create_requires_cluster_pair_before_policy() {
        let mut req = create_request();
        req.cluster_pair.clear();
        req.schedule_policy_name.clear();
        assert_eq!(validate_create(&req), Err(ValidationError::ClusterPairRequired));
    }

    #[test]
    fn test_create_requires_policy() {
        let mut req = create_request();
        req.schedule_policy_name = "  ".to_string();
        assert_eq!(validate_create(&req), Err(ValidationError::PolicyRequired));
    }

    #[test]
    fn test_bulk_create_requires_namespace() {
        let mut req = create_request();
        req.target = CreateTarget::Namespaces(vec![]);
        assert_eq!(validate_create(&req), Err(ValidationError::NamespaceRequired));

        req.target = CreateTarget::Namespaces(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(validate_create(&req), Ok(()));
    }

    #[test]
    fn test_delete_requires_selector() {
        let req = DeleteRequest {
            namespace: "default".to_string(),
            selector: Selector::default(),
        };
        assert_eq!(validate_delete(&req), Err(ValidationError::SelectorRequired));

        let req = DeleteRequest {
            namespace: "default".to_string(),
            selector: Selector::by_claim("pvc1"),
        };
        assert_eq!(validate_delete(&req), Ok(()));

        let req = DeleteRequest {
            namespace: "default".to_string(),
            selector: Selector::by_names(["s1"]),
        };
        assert_eq!(validate_delete(&req), Ok(()));

        let req = DeleteRequest {
            namespace: "default".to_string(),
            selector: Selector::by_cluster_pair("snapshot1"),
        };
        assert_eq!(validate_delete(&req), Ok(()));
    }
}
