//! Kubernetes client for the schedule record store

use anyhow::{Context, Result};
use kube::config::KubeConfigOptions;
use kube::Client;
use snapsched::store::KubeStore;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

/// Build a record store talking to the configured cluster
pub async fn connect(config: &Config) -> Result<KubeStore> {
    let mut kube_config = match config.context {
        Some(ref context) => {
            let options = KubeConfigOptions {
                context: Some(context.clone()),
                ..Default::default()
            };
            kube::Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context {:?}", context))?
        }
        None => kube::Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    let timeout = Duration::from_secs(config.timeout);
    kube_config.connect_timeout = Some(timeout);
    kube_config.read_timeout = Some(timeout);

    debug!(cluster = %kube_config.cluster_url, context = ?config.context, "Connecting to cluster");

    let client = Client::try_from(kube_config).context("Failed to build Kubernetes client")?;
    Ok(KubeStore::new(client))
}
