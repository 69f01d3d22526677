//! Resolves list and delete requests into concrete schedule identities.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::crd::{ScheduleId, VolumeSnapshotSchedule};
use crate::error::Result;
use crate::store::ScheduleStore;

/// Which schedules a request addresses.
///
/// Explicit names take precedence over the claim and cluster pair filters.
/// When both filters are set a schedule must match both. With no names and
/// no filter, the selector matches every schedule in the namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub names: Vec<String>,
    pub volume_claim: Option<String>,
    pub cluster_pair: Option<String>,
}

impl Selector {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn by_claim(claim: impl Into<String>) -> Self {
        Self {
            volume_claim: Some(claim.into()),
            ..Self::default()
        }
    }

    pub fn by_cluster_pair(pair: impl Into<String>) -> Self {
        Self {
            cluster_pair: Some(pair.into()),
            ..Self::default()
        }
    }

    /// Claim filter, ignoring an empty string.
    pub fn claim(&self) -> Option<&str> {
        self.volume_claim.as_deref().filter(|c| !c.is_empty())
    }

    /// Cluster pair filter, ignoring an empty string.
    pub fn pair(&self) -> Option<&str> {
        self.cluster_pair.as_deref().filter(|p| !p.is_empty())
    }

    /// True when the selector names nothing and filters nothing.
    pub fn is_all(&self) -> bool {
        self.names.is_empty() && self.claim().is_none() && self.pair().is_none()
    }

    /// Whether a listed schedule passes every filter that is set.
    pub fn matches(&self, schedule: &VolumeSnapshotSchedule) -> bool {
        self.claim()
            .map_or(true, |claim| schedule.spec.persistent_volume_claim_name == claim)
            && self
                .pair()
                .map_or(true, |pair| schedule.spec.cluster_pair == pair)
    }
}

/// Outcome of resolving a selector.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Identities taken from explicit names. They have not been looked up;
    /// any of them may be missing from the store.
    Named(Vec<ScheduleId>),
    /// Schedules taken from the store listing.
    Listed(Vec<VolumeSnapshotSchedule>),
}

impl Selection {
    pub fn ids(&self) -> Vec<ScheduleId> {
        match self {
            Selection::Named(ids) => ids.clone(),
            Selection::Listed(schedules) => schedules.iter().map(VolumeSnapshotSchedule::id).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Named(ids) => ids.len(),
            Selection::Listed(schedules) => schedules.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drop repeated names, keeping the first occurrence.
pub fn dedup_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Resolve a selector within one namespace.
///
/// Explicit names never touch the store. A filtered or full listing costs
/// one `list` call and keeps the store's order.
pub async fn resolve<S>(store: &S, namespace: &str, selector: &Selector) -> Result<Selection>
where
    S: ScheduleStore + ?Sized,
{
    if !selector.names.is_empty() {
        let ids = dedup_names(&selector.names)
            .into_iter()
            .map(|name| ScheduleId::new(namespace, name))
            .collect();
        return Ok(Selection::Named(ids));
    }

    let mut schedules = store.list(namespace).await?;
    let mut seen = HashSet::new();
    schedules.retain(|s| selector.matches(s) && seen.insert(s.id()));

    debug!(
        namespace = %namespace,
        claim = ?selector.claim(),
        cluster_pair = ?selector.pair(),
        matched = schedules.len(),
        "Resolved schedule selection"
    );
    Ok(Selection::Listed(schedules))
}
