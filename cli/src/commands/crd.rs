//! CustomResourceDefinition output

use anyhow::Result;
use kube::CustomResourceExt;
use snapsched::VolumeSnapshotSchedule;

use crate::output::OutputFormat;

/// Render the schedule CRD, as YAML unless JSON was asked for
pub fn render(format: OutputFormat) -> Result<String> {
    let crd = VolumeSnapshotSchedule::crd();
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&crd)?,
        OutputFormat::Table | OutputFormat::Yaml => serde_yaml::to_string(&crd)?,
    };
    Ok(rendered)
}

pub fn execute(format: OutputFormat) -> Result<()> {
    println!("{}", render(format)?.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_crd() {
        let yaml = render(OutputFormat::Table).unwrap();
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("name: volumesnapshotschedules.stork.libopenstorage.org"));
    }

    #[test]
    fn test_json_crd() {
        let json = render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["spec"]["names"]["shortNames"][0], "vss");
    }
}
