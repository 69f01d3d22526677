//! Command implementations

pub mod config;
pub mod crd;
pub mod create;
pub mod delete;
pub mod get;

use anyhow::{bail, Result};

/// Turn per-item failures into one error once every item was processed
pub fn summarize(failed: usize, total: usize, verb: &str) -> Result<()> {
    if failed > 0 {
        bail!("{} of {} snapshot schedules could not be {}", failed, total, verb);
    }
    Ok(())
}
