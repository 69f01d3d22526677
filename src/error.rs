//! Error types for snapshot schedule operations.
//!
//! This module provides a unified error type [`ScheduleError`] for all
//! schedule operations, along with a convenient [`Result`] type alias.
//!
//! # Error Categories
//!
//! - **Validation**: a request is missing a required field. These never
//!   reach the record store.
//! - **Record store**: the identity is absent, already taken, or a status
//!   update lost a race against a concurrent writer.
//! - **Transport**: the Kubernetes API could not be reached or returned an
//!   unexpected failure.
//!
//! # Example
//!
//! ```rust
//! use snapsched::error::{ScheduleError, ValidationError};
//!
//! let err = ScheduleError::from(ValidationError::ClusterPairRequired);
//! assert_eq!(err.to_string(), "cluster pair required");
//!
//! let err = ScheduleError::not_found("nightly", "default");
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

/// A request failed a precondition check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,

    #[error("policy required")]
    PolicyRequired,

    #[error("cluster pair required")]
    ClusterPairRequired,

    #[error("namespace required")]
    NamespaceRequired,

    #[error("selector required")]
    SelectorRequired,
}

impl ValidationError {
    /// Name of the request field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name",
            ValidationError::PolicyRequired => "schedulePolicyName",
            ValidationError::ClusterPairRequired => "clusterPair",
            ValidationError::NamespaceRequired => "namespace",
            ValidationError::SelectorRequired => "selector",
        }
    }
}

/// Main error type for schedule operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error from server (NotFound): volumesnapshotschedules.stork.libopenstorage.org \"{name}\" not found")]
    NotFound { name: String, namespace: String },

    #[error("Error from server (AlreadyExists): volumesnapshotschedules.stork.libopenstorage.org \"{name}\" already exists")]
    AlreadyExists { name: String, namespace: String },

    #[error("Error from server (Conflict): volumesnapshotschedules.stork.libopenstorage.org \"{name}\" was modified concurrently")]
    Conflict { name: String, namespace: String },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScheduleError {
    pub fn not_found(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        ScheduleError::NotFound {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn already_exists(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        ScheduleError::AlreadyExists {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn conflict(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        ScheduleError::Conflict {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Check if the error means the identity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScheduleError::NotFound { .. })
    }

    /// Check if the caller may re-fetch and retry the operation.
    ///
    /// Only lost status-update races qualify; nothing in this crate retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScheduleError::Conflict { .. })
    }

    /// The `(name, namespace)` identity the error refers to, if any.
    pub fn identity(&self) -> Option<(&str, &str)> {
        match self {
            ScheduleError::NotFound { name, namespace }
            | ScheduleError::AlreadyExists { name, namespace }
            | ScheduleError::Conflict { name, namespace } => Some((name.as_str(), namespace.as_str())),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        ScheduleError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for ScheduleError {
    fn from(e: serde_yaml::Error) -> Self {
        ScheduleError::Serialization(e.to_string())
    }
}

/// Result type alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
